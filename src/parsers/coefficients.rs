//! # 积分系数报告解析器
//!
//! 解析求解器宏导出的系数报告 CSV：每行首个逗号字段为复合表头
//! （`<系数>_<配置标签>`），末个逗号字段为数值。`Angle` 行给出
//! 本文件全部记录共享的迎角。
//!
//! ## 表头解码规则
//! - `Angle` 前缀 → 迎角行
//! - 无下划线 → 结构行，静默跳过
//! - 其余按首个下划线切分：前段必须是已知系数名，后段子串匹配
//!   升力面标签，`CANARD` 先于 `WING` 检查（`CANARD_WING` 归鸭翼）
//! - 解码失败的表头带标签记入 `skipped`，不中止解析
//!
//! ## 依赖关系
//! - 被 `commands/post.rs` 使用
//! - 构造 `models/records.rs` 的类型

use crate::error::{CawixError, Result};
use crate::models::{CoefficientKind, CoefficientRecord, ConfigTag, Surface};
use std::fs;
use std::path::Path;

/// 表头解码结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderKind {
    /// 迎角行
    Angle,
    /// 结构/配平监控行，无下划线，不参与气动分析
    Structural,
    /// 系数行
    Coefficient {
        kind: CoefficientKind,
        surface: Surface,
    },
}

/// 解码单个复合表头
pub fn decode_header(header: &str) -> Result<HeaderKind> {
    if header.starts_with("Angle") {
        return Ok(HeaderKind::Angle);
    }

    let Some((token, rest)) = header.split_once('_') else {
        return Ok(HeaderKind::Structural);
    };

    let kind = CoefficientKind::parse(token).ok_or_else(|| CawixError::UnknownHeader {
        header: header.to_string(),
    })?;

    // CANARD 必须先于 WING 检查，否则 CANARD_WING 会被误判
    let surface = if rest.contains("CANARD") {
        Surface::Canard
    } else if rest.contains("WING") {
        Surface::Wing
    } else {
        return Err(CawixError::UnknownHeader {
            header: header.to_string(),
        });
    };

    Ok(HeaderKind::Coefficient { kind, surface })
}

/// 单个系数报告文件的解析结果
#[derive(Debug)]
pub struct ParsedCoefficients {
    /// 本文件全部记录共享的迎角 (deg)
    pub alpha: f64,
    pub records: Vec<CoefficientRecord>,
    /// 解码失败、已跳过的表头
    pub skipped: Vec<String>,
}

/// 解析系数报告文件
pub fn parse_coefficient_file(path: &Path, combined: bool) -> Result<ParsedCoefficients> {
    let content = fs::read_to_string(path).map_err(|e| CawixError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_coefficient_content(&content, &path.display().to_string(), combined)
}

/// 解析系数报告文本
///
/// 第一遍扫描取得迎角（Angle 行），第二遍构造各系数记录。
/// 缺失 Angle 行为格式错误。
pub fn parse_coefficient_content(
    content: &str,
    label: &str,
    combined: bool,
) -> Result<ParsedCoefficients> {
    let mut alpha: Option<f64> = None;
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let header = line.split(',').next().unwrap_or_default();
        if header.starts_with("Angle") {
            alpha = Some(last_field(line, label)?);
            break;
        }
    }
    let alpha = alpha.ok_or_else(|| CawixError::ParseError {
        format: "coefficient report".to_string(),
        path: label.to_string(),
        reason: "no 'Angle' row found".to_string(),
    })?;

    let mut records = Vec::new();
    let mut skipped = Vec::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let header = line.split(',').next().unwrap_or_default();

        match decode_header(header) {
            Ok(HeaderKind::Angle) | Ok(HeaderKind::Structural) => {}
            Ok(HeaderKind::Coefficient { kind, surface }) => {
                records.push(CoefficientRecord {
                    config: ConfigTag::from_surface(surface, combined),
                    kind,
                    alpha,
                    value: last_field(line, label)?,
                });
            }
            Err(CawixError::UnknownHeader { header }) => skipped.push(header),
            Err(e) => return Err(e),
        }
    }

    Ok(ParsedCoefficients {
        alpha,
        records,
        skipped,
    })
}

fn last_field(line: &str, label: &str) -> Result<f64> {
    let field = line.rsplit(',').next().unwrap_or_default().trim();
    field.parse().map_err(|_| CawixError::ParseError {
        format: "coefficient report".to_string(),
        path: label.to_string(),
        reason: format!("invalid value '{}' in line '{}'", field, line),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMBINED: &str = "\
Angle of Attack,,,,2.0
CD_CANARD_WING,,,,0.0123
CL_CANARD,,,,0.45
CL_WING,,,,0.82
CM_WING_BODY,,,,-0.031
Iterations,,,,1500
XYZ_FOO,,,2.0
";

    #[test]
    fn test_canard_checked_before_wing() {
        let kind = decode_header("CD_CANARD_WING").unwrap();
        assert_eq!(
            kind,
            HeaderKind::Coefficient {
                kind: CoefficientKind::Cd,
                surface: Surface::Canard
            }
        );
    }

    #[test]
    fn test_structural_header_is_skipped_silently() {
        assert_eq!(decode_header("Iterations").unwrap(), HeaderKind::Structural);
    }

    #[test]
    fn test_unknown_coefficient_is_tagged() {
        let err = decode_header("XYZ_FOO").unwrap_err();
        assert!(matches!(err, CawixError::UnknownHeader { ref header } if header == "XYZ_FOO"));
        let err = decode_header("CL_TAIL").unwrap_err();
        assert!(matches!(err, CawixError::UnknownHeader { .. }));
    }

    #[test]
    fn test_parse_combined_report() {
        let parsed = parse_coefficient_content(COMBINED, "test", true).unwrap();
        assert!((parsed.alpha - 2.0).abs() < 1e-12);
        assert_eq!(parsed.records.len(), 4);
        assert_eq!(parsed.skipped, vec!["XYZ_FOO"]);

        let cd = &parsed.records[0];
        assert_eq!(cd.kind, CoefficientKind::Cd);
        assert_eq!(cd.config, ConfigTag::CanardWithWing);
        assert!((cd.value - 0.0123).abs() < 1e-12);
        assert!((cd.alpha - 2.0).abs() < 1e-12);

        let cl_wing = &parsed.records[2];
        assert_eq!(cl_wing.config, ConfigTag::WingWithCanard);
        assert!((cl_wing.value - 0.82).abs() < 1e-12);
    }

    #[test]
    fn test_parse_alone_report_uses_alone_tags() {
        let text = "Angle of Attack,,,,0.0\nCL_WING,,,,0.31\n";
        let parsed = parse_coefficient_content(text, "test", false).unwrap();
        assert_eq!(parsed.records[0].config, ConfigTag::WingAlone);
    }

    #[test]
    fn test_missing_angle_row_is_error() {
        let err = parse_coefficient_content("CL_WING,,,,0.3\n", "test", false).unwrap_err();
        assert!(matches!(err, CawixError::ParseError { .. }));
        assert!(err.to_string().contains("Angle"));
    }

    #[test]
    fn test_bad_value_is_error() {
        let text = "Angle of Attack,,,,2.0\nCL_WING,,,,abc\n";
        let err = parse_coefficient_content(text, "test", false).unwrap_err();
        assert!(err.to_string().contains("invalid value"));
    }
}
