//! # 算例数据清单写出
//!
//! 将工况、几何与仿真参数序列化为求解器宏消费的 XML 数据文件
//! （`Data_<id>.xml`），写入算例目录与暂存目录，写出后不再修改。
//!
//! ## 依赖关系
//! - 被 `commands/sweep.rs` 使用
//! - 使用 `models/operating.rs`, `models/aircraft.rs`

use crate::error::{CawixError, Result};
use crate::models::{GeometrySnapshot, OperatingPoint};
use crate::sweep::grid::CaseIndex;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// 仿真参数节
#[derive(Debug, Clone)]
pub struct SimulationSettings {
    /// 求解模式，如 "EULER"
    pub sim_type: String,
    /// 对称半模
    pub symmetrical: bool,
    /// 是否执行自动网格
    pub execute_automesh: bool,
    /// 轴名称，与算例索引一一对应
    pub axis_names: Vec<String>,
}

/// 单算例数据清单：三个逻辑节，写出一次后不变
#[derive(Debug, Clone)]
pub struct CaseManifest {
    pub operating: OperatingPoint,
    pub geometry: GeometrySnapshot,
    pub simulation: SimulationSettings,
    pub case: CaseIndex,
}

impl CaseManifest {
    /// 序列化为 XML 文本
    pub fn to_xml(&self) -> String {
        let mut xml = String::new();
        let op = &self.operating;
        let geo = &self.geometry;

        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        xml.push_str("<data>\n");

        // 工况节
        xml.push_str("    <operating_conditions>\n");
        tag(&mut xml, "angle_of_attack", None, op.alpha_deg);
        tag(&mut xml, "sideslip_angle", None, op.sideslip_deg);
        tag(&mut xml, "Mach", None, op.mach);
        tag(&mut xml, "Reynolds", None, op.reynolds);
        tag(&mut xml, "altitude", Some("ft"), op.altitude_ft);
        tag(&mut xml, "pressure", Some("Pa"), op.atmosphere.pressure);
        tag(&mut xml, "density", Some("kg/m^3"), op.atmosphere.density);
        tag(&mut xml, "temperature", Some("K"), op.atmosphere.temperature);
        tag(
            &mut xml,
            "speed_of_sound",
            Some("m/s"),
            op.atmosphere.speed_of_sound,
        );
        tag(
            &mut xml,
            "dynamic_viscosity",
            Some("Pa*s"),
            op.atmosphere.dynamic_viscosity,
        );
        tag(&mut xml, "velocity", Some("m/s"), op.velocity);
        xml.push_str("    </operating_conditions>\n");

        // 几何节
        xml.push_str("    <geometric_data>\n");
        let _ = writeln!(xml, "        <CAD_units>{}</CAD_units>", geo.cad_units);
        let _ = writeln!(
            xml,
            "        <aero_components>[{}]</aero_components>",
            geo.components.join(", ")
        );
        let counts = vec!["1"; geo.components.len()].join(", ");
        let _ = writeln!(
            xml,
            "        <components_number>[{}]</components_number>",
            counts
        );
        tag(&mut xml, "fuselage_length", Some("m"), geo.fuselage_length);
        tag(&mut xml, "wing_MAC", Some("m"), geo.wing.mac);
        tag(
            &mut xml,
            "equivalent_wing_root_chord",
            Some("m"),
            geo.wing.root_chord,
        );
        tag(
            &mut xml,
            "equivalent_wing_taper_ratio",
            None,
            geo.wing.taper_ratio,
        );
        tag(&mut xml, "wing_S", Some("m^2"), geo.wing.area);
        tag(&mut xml, "wing_span", Some("m"), geo.wing.span);
        tag(&mut xml, "moment_pole_Xcoord", Some("m"), geo.moment_pole_x);
        tag(&mut xml, "wing_x_position", Some("m"), geo.wing.x_apex);
        tag(&mut xml, "wing_z_position", Some("m"), geo.wing.z_apex);
        tag(
            &mut xml,
            "wing_LEsweep_angle",
            Some("degree"),
            geo.wing.sweep_le_deg,
        );
        tag(
            &mut xml,
            "wing_dihedral_angle",
            Some("degree"),
            geo.wing.dihedral_deg,
        );
        tag(
            &mut xml,
            "wing_rigging_angle",
            Some("degree"),
            geo.wing.rigging_deg,
        );
        tag(&mut xml, "canard_x_position", Some("m"), geo.canard.x_apex);
        tag(&mut xml, "canard_z_position", Some("m"), geo.canard.z_apex);
        tag(
            &mut xml,
            "equivalent_canard_root_chord",
            Some("m"),
            geo.canard.root_chord,
        );
        tag(
            &mut xml,
            "equivalent_canard_taper_ratio",
            None,
            geo.canard.taper_ratio,
        );
        tag(&mut xml, "canard_span", Some("m"), geo.canard.span);
        tag(
            &mut xml,
            "canard_LEsweep_angle",
            Some("degree"),
            geo.canard.sweep_le_deg,
        );
        tag(
            &mut xml,
            "canard_dihedral_angle",
            Some("degree"),
            geo.canard.dihedral_deg,
        );
        tag(
            &mut xml,
            "canard_rigging_angle",
            Some("degree"),
            geo.canard.rigging_deg,
        );
        xml.push_str("    </geometric_data>\n");

        // 仿真参数节，每个设计轴一个 `<轴名_case>` 元素
        xml.push_str("    <simulation_parameters>\n");
        let _ = writeln!(xml, "        <type>{}</type>", self.simulation.sim_type);
        let _ = writeln!(
            xml,
            "        <symmetrical>{}</symmetrical>",
            self.simulation.symmetrical
        );
        let _ = writeln!(
            xml,
            "        <execute_automesh>{}</execute_automesh>",
            self.simulation.execute_automesh
        );
        for (name, index) in self
            .simulation
            .axis_names
            .iter()
            .zip(self.case.indices())
        {
            let _ = writeln!(xml, "        <{0}_case>{1}</{0}_case>", name, index);
        }
        xml.push_str("    </simulation_parameters>\n");

        xml.push_str("</data>\n");
        xml
    }

    /// 写出清单文件
    pub fn write(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_xml()).map_err(|e| CawixError::FileWriteError {
            path: path.display().to_string(),
            source: e,
        })
    }
}

fn tag(xml: &mut String, name: &str, unit: Option<&str>, value: f64) {
    let _ = match unit {
        Some(u) => writeln!(xml, "        <{0} unit=\"{1}\">{2}</{0}>", name, u, value),
        None => writeln!(xml, "        <{0}>{1}</{0}>", name, value),
    };
}
