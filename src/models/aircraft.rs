//! # 飞机几何数据模型
//!
//! 存储基准机翼/鸭翼平面形状参数，并按算例偏移量派生几何快照。
//!
//! ## 功能
//! - 每个部件一个显式可选字段（编译期检查部件是否存在）
//! - 鸭翼按 span/area/taper 准则缩放，根弦与 MAC 重新计算
//!
//! ## 依赖关系
//! - 被 `parsers/aircraft.rs` 构造
//! - 被 `commands/sweep.rs`, `sweep/manifest.rs` 使用

use crate::error::{CawixError, Result};
use serde::{Deserialize, Serialize};

/// 机身几何
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FuselageGeometry {
    /// 机身长度 (m)
    pub length: f64,
}

/// 等效升力面平面形状（单梯形面板）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurfacePlanform {
    /// 翼展 (m)
    pub span: f64,
    /// 参考面积 (m²)
    pub area: f64,
    /// 梢根比
    pub taper_ratio: f64,
    /// 根弦长 (m)
    pub root_chord: f64,
    /// 平均气动弦长 (m)
    pub mac: f64,
    /// 前缘后掠角 (deg)
    pub sweep_le_deg: f64,
    /// 上反角 (deg)
    pub dihedral_deg: f64,
    /// 安装角 (deg)
    pub rigging_deg: f64,
    /// 顶点 x 坐标 (m)
    pub x_apex: f64,
    /// 顶点 z 坐标 (m)
    pub z_apex: f64,
}

impl SurfacePlanform {
    /// 由平面形状参数构造，根弦与 MAC 从 span/area/taper 导出
    #[allow(clippy::too_many_arguments)]
    pub fn from_planform(
        span: f64,
        area: f64,
        taper_ratio: f64,
        sweep_le_deg: f64,
        dihedral_deg: f64,
        rigging_deg: f64,
        x_apex: f64,
        z_apex: f64,
    ) -> Self {
        let root_chord = root_chord_from(span, area, taper_ratio);
        let mac = mac_from(root_chord, taper_ratio);
        SurfacePlanform {
            span,
            area,
            taper_ratio,
            root_chord,
            mac,
            sweep_le_deg,
            dihedral_deg,
            rigging_deg,
            x_apex,
            z_apex,
        }
    }
}

/// 梯形翼根弦长: S = b·c_r·(1+λ)/2
fn root_chord_from(span: f64, area: f64, taper_ratio: f64) -> f64 {
    2.0 * area / (span * (1.0 + taper_ratio))
}

/// 梯形翼平均气动弦长
fn mac_from(root_chord: f64, taper_ratio: f64) -> f64 {
    (2.0 / 3.0) * root_chord * (1.0 + taper_ratio + taper_ratio * taper_ratio)
        / (1.0 + taper_ratio)
}

/// 飞机部件集合
///
/// 每个已知部件一个显式可选字段，"部件是否存在"由类型系统表达，
/// 而不是运行时的枚举键表查找。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AircraftModel {
    pub fuselage: Option<FuselageGeometry>,
    pub wing: Option<SurfacePlanform>,
    pub horizontal: Option<SurfacePlanform>,
    pub vertical: Option<SurfacePlanform>,
    pub canard: Option<SurfacePlanform>,
}

impl AircraftModel {
    /// 干扰研究必需的机翼，缺失为致命配置错误
    pub fn require_wing(&self) -> Result<&SurfacePlanform> {
        self.wing.as_ref().ok_or(CawixError::MissingComponent {
            component: "WING".to_string(),
        })
    }

    /// 干扰研究必需的鸭翼，缺失为致命配置错误
    pub fn require_canard(&self) -> Result<&SurfacePlanform> {
        self.canard.as_ref().ok_or(CawixError::MissingComponent {
            component: "CANARD".to_string(),
        })
    }

    /// 按声明顺序列出存在的部件名称
    pub fn component_names(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.fuselage.is_some() {
            names.push("FUSELAGE");
        }
        if self.wing.is_some() {
            names.push("WING");
        }
        if self.horizontal.is_some() {
            names.push("HORIZONTAL");
        }
        if self.vertical.is_some() {
            names.push("VERTICAL");
        }
        if self.canard.is_some() {
            names.push("CANARD");
        }
        names
    }
}

/// 单个算例施加于鸭翼的几何偏移量
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CanardOffsets {
    /// 顶点 x 位置偏移 (m)
    pub x_pos_m: f64,
    /// 顶点 z 位置偏移 (m)
    pub z_pos_m: f64,
    /// 翼展相对变化量（+0.1 即增大 10%）
    pub span_var: f64,
    /// 前缘后掠角增量 (deg)
    pub sweep_deg: f64,
    /// 上反角增量 (deg)
    pub dihedral_deg: f64,
    /// 安装角增量 (deg)
    pub rigging_deg: f64,
}

/// 单算例几何快照：基准 + 偏移量，派生一次后不再修改
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeometrySnapshot {
    /// CAD 导出单位制
    pub cad_units: String,
    /// 本算例参与仿真的部件
    pub components: Vec<String>,
    /// 机身长度 (m)，无机身时为 0
    pub fuselage_length: f64,
    /// 基准机翼平面形状
    pub wing: SurfacePlanform,
    /// 修改后的鸭翼平面形状
    pub canard: SurfacePlanform,
    /// 力矩参考点 x 坐标 (m)：机翼顶点 + MAC/4
    pub moment_pole_x: f64,
}

impl GeometrySnapshot {
    /// 从基准模型与算例偏移量派生几何快照
    ///
    /// 鸭翼按原面积与梢根比缩放翼展，根弦与 MAC 随之重新计算。
    pub fn derive(model: &AircraftModel, offsets: &CanardOffsets) -> Result<GeometrySnapshot> {
        let wing = model.require_wing()?.clone();
        let baseline = model.require_canard()?;

        let canard = SurfacePlanform::from_planform(
            baseline.span * (1.0 + offsets.span_var),
            baseline.area,
            baseline.taper_ratio,
            baseline.sweep_le_deg + offsets.sweep_deg,
            baseline.dihedral_deg + offsets.dihedral_deg,
            baseline.rigging_deg + offsets.rigging_deg,
            baseline.x_apex + offsets.x_pos_m,
            baseline.z_apex + offsets.z_pos_m,
        );

        let moment_pole_x = wing.x_apex + 0.25 * wing.mac;
        let fuselage_length = model.fuselage.as_ref().map(|f| f.length).unwrap_or(0.0);
        let components = model
            .component_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        Ok(GeometrySnapshot {
            cad_units: "mm".to_string(),
            components,
            fuselage_length,
            wing,
            canard,
            moment_pole_x,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_model() -> AircraftModel {
        AircraftModel {
            fuselage: Some(FuselageGeometry { length: 30.4 }),
            wing: Some(SurfacePlanform::from_planform(
                27.5, 61.0, 0.45, 27.0, 1.5, 2.5, 12.9, -1.2,
            )),
            horizontal: None,
            vertical: None,
            canard: Some(SurfacePlanform::from_planform(
                7.2, 6.5, 0.6, 20.0, 0.0, 1.0, 2.1, 0.4,
            )),
        }
    }

    #[test]
    fn test_planform_chords() {
        let p = SurfacePlanform::from_planform(10.0, 20.0, 0.5, 0.0, 0.0, 0.0, 0.0, 0.0);
        // c_r = 2*20/(10*1.5)
        assert!((p.root_chord - 8.0 / 3.0).abs() < 1e-12);
        // MAC = (2/3)*c_r*(1+0.5+0.25)/1.5
        assert!((p.mac - (2.0 / 3.0) * (8.0 / 3.0) * (1.75 / 1.5)).abs() < 1e-12);
    }

    #[test]
    fn test_derive_applies_offsets() {
        let model = sample_model();
        let offsets = CanardOffsets {
            x_pos_m: 0.5,
            z_pos_m: -0.1,
            span_var: 0.1,
            sweep_deg: 2.0,
            dihedral_deg: 1.0,
            rigging_deg: -0.5,
        };
        let snap = GeometrySnapshot::derive(&model, &offsets).unwrap();

        assert!((snap.canard.span - 7.2 * 1.1).abs() < 1e-12);
        assert!((snap.canard.sweep_le_deg - 22.0).abs() < 1e-12);
        assert!((snap.canard.dihedral_deg - 1.0).abs() < 1e-12);
        assert!((snap.canard.rigging_deg - 0.5).abs() < 1e-12);
        assert!((snap.canard.x_apex - 2.6).abs() < 1e-12);
        assert!((snap.canard.z_apex - 0.3).abs() < 1e-12);
        // 面积与梢根比保持不变，根弦随翼展缩小
        assert!((snap.canard.area - 6.5).abs() < 1e-12);
        let baseline_chord = model.canard.as_ref().unwrap().root_chord;
        assert!(snap.canard.root_chord < baseline_chord);
        // 机翼不受偏移量影响
        assert!((snap.wing.span - 27.5).abs() < 1e-12);
        assert_eq!(snap.components, vec!["FUSELAGE", "WING", "CANARD"]);
    }

    #[test]
    fn test_derive_without_canard_is_fatal() {
        let mut model = sample_model();
        model.canard = None;
        let offsets = CanardOffsets {
            x_pos_m: 0.0,
            z_pos_m: 0.0,
            span_var: 0.0,
            sweep_deg: 0.0,
            dihedral_deg: 0.0,
            rigging_deg: 0.0,
        };
        let err = GeometrySnapshot::derive(&model, &offsets).unwrap_err();
        assert!(matches!(
            err,
            CawixError::MissingComponent { ref component } if component == "CANARD"
        ));
    }
}
