//! # 飞机定义文件解析器
//!
//! 解析分节键值格式的飞机定义文件（`[section]` + `key = value`），
//! 构造 `AircraftModel`。`#` 起始为注释行，空行忽略。
//!
//! ## 格式示例
//! ```text
//! [fuselage]
//! length = 30.4
//!
//! [wing]
//! span = 27.5
//! area = 61.0
//! taper_ratio = 0.45
//! sweep_le = 27.0
//! dihedral = 1.5
//! rigging = 2.5
//! x_apex = 12.9
//! z_apex = -1.2
//! ```
//!
//! ## 依赖关系
//! - 被 `commands/sweep.rs` 使用
//! - 构造 `models/aircraft.rs` 的类型

use crate::error::{CawixError, Result};
use crate::models::{AircraftModel, FuselageGeometry, SurfacePlanform};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// 解析飞机定义文件
pub fn parse_aircraft_file(path: &Path) -> Result<AircraftModel> {
    let content = fs::read_to_string(path).map_err(|e| CawixError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_aircraft_content(&content, &path.display().to_string())
}

/// 解析飞机定义文本
pub fn parse_aircraft_content(content: &str, label: &str) -> Result<AircraftModel> {
    let mut model = AircraftModel::default();
    let mut section: Option<String> = None;
    let mut keys: HashMap<String, f64> = HashMap::new();

    for (line_no, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(name) = line.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
            if let Some(prev) = section.take() {
                apply_section(&mut model, &prev, &keys, label)?;
            }
            section = Some(name.trim().to_lowercase());
            keys.clear();
            continue;
        }

        let Some(current) = &section else {
            return Err(parse_error(
                label,
                line_no + 1,
                "key outside of any [section]",
            ));
        };

        let Some((key, value)) = line.split_once('=') else {
            return Err(parse_error(label, line_no + 1, "expected 'key = value'"));
        };
        let value: f64 = value.trim().parse().map_err(|_| {
            parse_error(
                label,
                line_no + 1,
                &format!("invalid number for '{}' in [{}]", key.trim(), current),
            )
        })?;
        keys.insert(key.trim().to_lowercase(), value);
    }

    if let Some(prev) = section {
        apply_section(&mut model, &prev, &keys, label)?;
    }

    Ok(model)
}

fn apply_section(
    model: &mut AircraftModel,
    section: &str,
    keys: &HashMap<String, f64>,
    label: &str,
) -> Result<()> {
    match section {
        "fuselage" => {
            model.fuselage = Some(FuselageGeometry {
                length: require(keys, section, "length", label)?,
            });
        }
        "wing" | "canard" | "horizontal" | "vertical" => {
            let surface = SurfacePlanform::from_planform(
                require(keys, section, "span", label)?,
                require(keys, section, "area", label)?,
                require(keys, section, "taper_ratio", label)?,
                require(keys, section, "sweep_le", label)?,
                require(keys, section, "dihedral", label)?,
                require(keys, section, "rigging", label)?,
                require(keys, section, "x_apex", label)?,
                require(keys, section, "z_apex", label)?,
            );
            match section {
                "wing" => model.wing = Some(surface),
                "canard" => model.canard = Some(surface),
                "horizontal" => model.horizontal = Some(surface),
                _ => model.vertical = Some(surface),
            }
        }
        other => {
            return Err(CawixError::ParseError {
                format: "aircraft".to_string(),
                path: label.to_string(),
                reason: format!("unknown section [{}]", other),
            });
        }
    }
    Ok(())
}

fn require(keys: &HashMap<String, f64>, section: &str, key: &str, label: &str) -> Result<f64> {
    keys.get(key).copied().ok_or_else(|| CawixError::ParseError {
        format: "aircraft".to_string(),
        path: label.to_string(),
        reason: format!("missing key '{}' in [{}]", key, section),
    })
}

fn parse_error(label: &str, line: usize, reason: &str) -> CawixError {
    CawixError::ParseError {
        format: "aircraft".to_string(),
        path: label.to_string(),
        reason: format!("line {}: {}", line, reason),
    }
}
