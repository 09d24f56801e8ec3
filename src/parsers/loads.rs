//! # 展向载荷报告解析器
//!
//! 解析求解器宏导出的展向载荷 CSV。首列为展向坐标 y，随后为
//! eta 与当地弦长，第四列为 c·Cl，末列为当地升力系数 cl。
//! 以 `y` 开头的表头行跳过。
//!
//! ## 依赖关系
//! - 被 `commands/post.rs` 使用
//! - 构造 `models/records.rs` 的 `LoadRow`

use crate::error::{CawixError, Result};
use crate::models::LoadRow;
use std::fs;
use std::path::Path;

/// 解析展向载荷报告文件
pub fn parse_loads_file(path: &Path) -> Result<Vec<LoadRow>> {
    let content = fs::read_to_string(path).map_err(|e| CawixError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_loads_content(&content, &path.display().to_string())
}

/// 解析展向载荷文本，行序即站位序（翼根到翼梢）
pub fn parse_loads_content(content: &str, label: &str) -> Result<Vec<LoadRow>> {
    let mut rows = Vec::new();

    for (line_no, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        // 表头行首列非数值
        if fields[0].parse::<f64>().is_err() {
            continue;
        }
        if fields.len() < 5 {
            return Err(CawixError::ParseError {
                format: "loads report".to_string(),
                path: label.to_string(),
                reason: format!("line {}: expected at least 5 columns", line_no + 1),
            });
        }

        let value = |i: usize| -> Result<f64> {
            fields[i].parse().map_err(|_| CawixError::ParseError {
                format: "loads report".to_string(),
                path: label.to_string(),
                reason: format!("line {}: invalid number '{}'", line_no + 1, fields[i]),
            })
        };

        rows.push(LoadRow {
            y: value(0)?,
            eta: value(1)?,
            chord: value(2)?,
            ccl: value(3)?,
            cl: value(fields.len() - 1)?,
        });
    }

    Ok(rows)
}
