//! # 鸭翼–机翼干扰量计算
//!
//! 聚合单个扫掠点全部迎角下的四种配置数据，计算升力线斜率、
//! 积分下洗/上洗因子与展向分布。
//!
//! ## 计算定义
//! - CLα(配置)：该配置 CL 对迎角的最小二乘斜率
//! - 积分下洗 dε/dα = 1 − CLα(W+C) / CLα(W)
//! - 积分上洗 = CLα(C+W) / CLα(C) − 1
//! - 展向下洗 ε(η) = (cl_W+C(η) − cl_W(η)) / CLα(W+C)，上洗对偶
//! - 各站位的迎角导数：分布值对迎角再做一次最小二乘
//!
//! ## 依赖关系
//! - 被 `commands/post.rs` 使用
//! - 使用 `analysis/regression.rs`, `models/records.rs`

use crate::analysis::regression::linear_fit;
use crate::error::{CawixError, Result};
use crate::models::{
    CoefficientKind, CoefficientRecord, ConfigTag, InterferenceReport, SpanwiseStation,
};

/// 单个扫掠点的全部解析数据
///
/// 展向 cl 矩阵按 `[迎角][站位]` 索引，行序与 `alphas` 一致，
/// 列序与对应升力面的站位列表一致。
#[derive(Debug, Default)]
pub struct SweepPointData {
    /// 迎角序列 (deg)，与扫掠定义一致
    pub alphas: Vec<f64>,
    /// 四种配置的全部积分系数记录
    pub coefficients: Vec<CoefficientRecord>,
    /// 机翼展向站位几何
    pub wing_stations: Vec<SpanwiseStation>,
    /// 鸭翼展向站位几何
    pub canard_stations: Vec<SpanwiseStation>,
    pub wing_alone_cl_y: Vec<Vec<f64>>,
    pub wing_combined_cl_y: Vec<Vec<f64>>,
    pub canard_alone_cl_y: Vec<Vec<f64>>,
    pub canard_combined_cl_y: Vec<Vec<f64>>,
}

impl SweepPointData {
    /// 某系数在某配置下的 (迎角, 数值) 样本对
    pub fn series(&self, kind: CoefficientKind, config: ConfigTag) -> Vec<(f64, f64)> {
        self.coefficients
            .iter()
            .filter(|r| r.kind == kind && r.config == config)
            .map(|r| (r.alpha, r.value))
            .collect()
    }

    /// 某配置的升力线斜率 CLα (1/deg)
    fn lift_slope(&self, config: ConfigTag) -> f64 {
        linear_fit(&self.series(CoefficientKind::Cl, config)).slope
    }

    /// 计算本扫掠点的全部干扰量
    pub fn analyze(&self) -> Result<InterferenceReport> {
        self.check_stations("WING", self.wing_stations.len(), &self.wing_alone_cl_y)?;
        self.check_stations("WING", self.wing_stations.len(), &self.wing_combined_cl_y)?;
        self.check_stations(
            "CANARD",
            self.canard_stations.len(),
            &self.canard_alone_cl_y,
        )?;
        self.check_stations(
            "CANARD",
            self.canard_stations.len(),
            &self.canard_combined_cl_y,
        )?;

        let cla_wing_alone = self.lift_slope(ConfigTag::WingAlone);
        let cla_canard_alone = self.lift_slope(ConfigTag::CanardAlone);
        let cla_wing_with_canard = self.lift_slope(ConfigTag::WingWithCanard);
        let cla_canard_with_wing = self.lift_slope(ConfigTag::CanardWithWing);

        let downwash_int = 1.0 - cla_wing_with_canard / cla_wing_alone;
        let upwash_int = cla_canard_with_wing / cla_canard_alone - 1.0;

        let downwash_y = spanwise_ratio(
            &self.wing_combined_cl_y,
            &self.wing_alone_cl_y,
            cla_wing_with_canard,
        );
        let upwash_y = spanwise_ratio(
            &self.canard_combined_cl_y,
            &self.canard_alone_cl_y,
            cla_canard_with_wing,
        );

        let downwash_slope = station_slopes(&self.alphas, &downwash_y);
        let upwash_slope = station_slopes(&self.alphas, &upwash_y);

        Ok(InterferenceReport {
            cla_wing_alone,
            cla_canard_alone,
            cla_wing_with_canard,
            cla_canard_with_wing,
            downwash_int,
            upwash_int,
            downwash_y,
            upwash_y,
            downwash_slope,
            upwash_slope,
        })
    }

    fn check_stations(&self, surface: &str, expected: usize, matrix: &[Vec<f64>]) -> Result<()> {
        for row in matrix {
            if row.len() != expected {
                return Err(CawixError::StationMismatch {
                    surface: surface.to_string(),
                    expected,
                    found: row.len(),
                });
            }
        }
        Ok(())
    }
}

/// 逐站位 (组合 − 单独) / CLα(组合)
fn spanwise_ratio(combined: &[Vec<f64>], alone: &[Vec<f64>], cla_combined: f64) -> Vec<Vec<f64>> {
    combined
        .iter()
        .zip(alone)
        .map(|(c_row, a_row)| {
            c_row
                .iter()
                .zip(a_row)
                .map(|(c, a)| (c - a) / cla_combined)
                .collect()
        })
        .collect()
}

/// 每个站位对迎角的最小二乘斜率
fn station_slopes(alphas: &[f64], matrix: &[Vec<f64>]) -> Vec<f64> {
    let stations = matrix.first().map(Vec::len).unwrap_or(0);
    (0..stations)
        .map(|s| {
            let pairs: Vec<(f64, f64)> = alphas
                .iter()
                .zip(matrix)
                .map(|(&a, row)| (a, row[s]))
                .collect();
            linear_fit(&pairs).slope
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Surface;

    fn record(config: ConfigTag, alpha: f64, value: f64) -> CoefficientRecord {
        CoefficientRecord {
            config,
            kind: CoefficientKind::Cl,
            alpha,
            value,
        }
    }

    fn station(eta: f64) -> SpanwiseStation {
        SpanwiseStation {
            y: eta * 10.0,
            eta,
            chord: 2.0,
        }
    }

    /// 线性升力曲线：CL(W) = 0.08α + 0.2, CL(W+C) = 0.06α + 0.2,
    /// CL(C) = 0.10α, CL(C+W) = 0.12α
    fn sample_point() -> SweepPointData {
        let alphas = vec![-2.0, 0.0, 2.0, 4.0];
        let mut coefficients = Vec::new();
        for &a in &alphas {
            coefficients.push(record(ConfigTag::WingAlone, a, 0.08 * a + 0.2));
            coefficients.push(record(ConfigTag::WingWithCanard, a, 0.06 * a + 0.2));
            coefficients.push(record(ConfigTag::CanardAlone, a, 0.10 * a));
            coefficients.push(record(ConfigTag::CanardWithWing, a, 0.12 * a));
        }

        // 站位 cl 同样线性：组合与单独的差随迎角线性增长
        let wing_alone_cl_y: Vec<Vec<f64>> =
            alphas.iter().map(|&a| vec![0.07 * a, 0.05 * a]).collect();
        let wing_combined_cl_y: Vec<Vec<f64>> = alphas
            .iter()
            .map(|&a| vec![0.07 * a - 0.012 * a, 0.05 * a - 0.006 * a])
            .collect();
        let canard_alone_cl_y: Vec<Vec<f64>> =
            alphas.iter().map(|&a| vec![0.09 * a, 0.08 * a]).collect();
        let canard_combined_cl_y: Vec<Vec<f64>> = alphas
            .iter()
            .map(|&a| vec![0.09 * a + 0.024 * a, 0.08 * a + 0.012 * a])
            .collect();

        SweepPointData {
            alphas,
            coefficients,
            wing_stations: vec![station(0.2), station(0.7)],
            canard_stations: vec![station(0.3), station(0.8)],
            wing_alone_cl_y,
            wing_combined_cl_y,
            canard_alone_cl_y,
            canard_combined_cl_y,
        }
    }

    #[test]
    fn test_integral_factors() {
        let report = sample_point().analyze().unwrap();

        assert!((report.cla_wing_alone - 0.08).abs() < 1e-12);
        assert!((report.cla_wing_with_canard - 0.06).abs() < 1e-12);
        assert!((report.cla_canard_alone - 0.10).abs() < 1e-12);
        assert!((report.cla_canard_with_wing - 0.12).abs() < 1e-12);

        // 1 − 0.06/0.08 与 0.12/0.10 − 1
        assert!((report.downwash_int - 0.25).abs() < 1e-12);
        assert!((report.upwash_int - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_spanwise_distributions_and_slopes() {
        let point = sample_point();
        let report = point.analyze().unwrap();

        // ε(η) = (cl差)/CLα(W+C)，α=2 的第一站: −0.012·2/0.06
        let alpha2 = &report.downwash_y[2];
        assert!((alpha2[0] - (-0.012 * 2.0 / 0.06)).abs() < 1e-12);
        assert!((alpha2[1] - (-0.006 * 2.0 / 0.06)).abs() < 1e-12);

        // 上洗第一站，α=4: 0.024·4/0.12
        let alpha4 = &report.upwash_y[3];
        assert!((alpha4[0] - (0.024 * 4.0 / 0.12)).abs() < 1e-12);

        // 分布对迎角线性，导数即系数比
        assert!((report.downwash_slope[0] - (-0.012 / 0.06)).abs() < 1e-12);
        assert!((report.downwash_slope[1] - (-0.006 / 0.06)).abs() < 1e-12);
        assert!((report.upwash_slope[0] - (0.024 / 0.12)).abs() < 1e-12);
        assert!((report.upwash_slope[1] - (0.012 / 0.12)).abs() < 1e-12);
    }

    #[test]
    fn test_no_interference_yields_zero_factors() {
        // 组合与单独升力曲线完全相同时，干扰因子必须恰为零
        let mut point = sample_point();
        point.coefficients = Vec::new();
        for &a in &point.alphas.clone() {
            point
                .coefficients
                .push(record(ConfigTag::WingAlone, a, 0.08 * a + 0.2));
            point
                .coefficients
                .push(record(ConfigTag::WingWithCanard, a, 0.08 * a + 0.2));
            point
                .coefficients
                .push(record(ConfigTag::CanardAlone, a, 0.10 * a));
            point
                .coefficients
                .push(record(ConfigTag::CanardWithWing, a, 0.10 * a));
        }

        let report = point.analyze().unwrap();
        assert_eq!(report.downwash_int, 0.0);
        assert_eq!(report.upwash_int, 0.0);
    }

    #[test]
    fn test_station_mismatch_is_typed() {
        let mut point = sample_point();
        point.wing_combined_cl_y[1].pop();
        let err = point.analyze().unwrap_err();
        assert!(matches!(
            err,
            CawixError::StationMismatch { ref surface, expected: 2, found: 1 }
                if surface == Surface::Wing.as_str()
        ));
    }

    #[test]
    fn test_series_filters_kind_and_config() {
        let point = sample_point();
        let series = point.series(CoefficientKind::Cl, ConfigTag::WingAlone);
        assert_eq!(series.len(), 4);
        assert!((series[0].0 - (-2.0)).abs() < 1e-12);
        assert!((series[0].1 - (0.08 * -2.0 + 0.2)).abs() < 1e-12);
    }
}
