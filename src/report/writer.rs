//! # 扫掠点结果 CSV 写出
//!
//! 每个扫掠点写三个多节 CSV：系数汇总（resume）、下洗、上洗。
//! 节与节之间以标题行分隔，行数随迎角与站位数变化，
//! 故 CSV 写出器开启 flexible 模式。
//!
//! ## 依赖关系
//! - 被 `commands/post.rs` 使用
//! - 使用 `analysis/interference.rs`, `models/records.rs`

use crate::analysis::SweepPointData;
use crate::error::{CawixError, Result};
use crate::models::{CoefficientKind, ConfigTag, InterferenceReport};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// 汇总表的列顺序（配置）
const RESUME_CONFIGS: [ConfigTag; 4] = [
    ConfigTag::WingAlone,
    ConfigTag::WingWithCanard,
    ConfigTag::CanardAlone,
    ConfigTag::CanardWithWing,
];

/// 汇总表包含的系数
const RESUME_KINDS: [CoefficientKind; 3] = [
    CoefficientKind::Cd,
    CoefficientKind::Cl,
    CoefficientKind::Cm,
];

/// 写系数汇总报告
pub fn write_resume(point: &SweepPointData, path: &Path) -> Result<()> {
    write_with(path, |w| write_resume_to(point, w))
}

/// 写下洗报告
pub fn write_downwash(
    point: &SweepPointData,
    report: &InterferenceReport,
    path: &Path,
) -> Result<()> {
    write_with(path, |w| write_downwash_to(point, report, w))
}

/// 写上洗报告
pub fn write_upwash(
    point: &SweepPointData,
    report: &InterferenceReport,
    path: &Path,
) -> Result<()> {
    write_with(path, |w| write_upwash_to(point, report, w))
}

fn write_with(path: &Path, body: impl FnOnce(&mut dyn Write) -> Result<()>) -> Result<()> {
    let mut file = File::create(path).map_err(|e| CawixError::FileWriteError {
        path: path.display().to_string(),
        source: e,
    })?;
    body(&mut file)
}

fn write_resume_to(point: &SweepPointData, w: &mut dyn Write) -> Result<()> {
    let mut csv = csv::WriterBuilder::new().flexible(true).from_writer(w);

    csv.write_record(["Aerodynamic Coefficients"])?;
    for kind in RESUME_KINDS {
        csv.write_record([kind.as_str()])?;
        csv.write_record(["Alpha", "Wing", "Wing(Canard)", "Canard", "Canard(Wing)"])?;

        for &alpha in &point.alphas {
            let mut row = vec![fmt(alpha)];
            for config in RESUME_CONFIGS {
                row.push(lookup(point, kind, config, alpha));
            }
            csv.write_record(&row)?;
        }
    }

    csv.flush().map_err(csv_io)?;
    Ok(())
}

fn write_downwash_to(
    point: &SweepPointData,
    report: &InterferenceReport,
    w: &mut dyn Write,
) -> Result<()> {
    write_wash_to(
        w,
        "Wing Spanwise Downwash",
        "Downwash",
        "Integral Downwash",
        report.downwash_int,
        &point.alphas,
        &point.wing_stations.iter().map(|s| s.eta).collect::<Vec<_>>(),
        &report.downwash_y,
        &report.downwash_slope,
    )
}

fn write_upwash_to(
    point: &SweepPointData,
    report: &InterferenceReport,
    w: &mut dyn Write,
) -> Result<()> {
    write_wash_to(
        w,
        "Canard Spanwise Upwash",
        "Upwash",
        "Integral Upwash",
        report.upwash_int,
        &point.alphas,
        &point
            .canard_stations
            .iter()
            .map(|s| s.eta)
            .collect::<Vec<_>>(),
        &report.upwash_y,
        &report.upwash_slope,
    )
}

/// 下洗与上洗报告共享的节结构
#[allow(clippy::too_many_arguments)]
fn write_wash_to(
    w: &mut dyn Write,
    spanwise_title: &str,
    quantity: &str,
    integral_title: &str,
    integral_value: f64,
    alphas: &[f64],
    etas: &[f64],
    spanwise: &[Vec<f64>],
    slopes: &[f64],
) -> Result<()> {
    let mut csv = csv::WriterBuilder::new().flexible(true).from_writer(w);

    csv.write_record([integral_title])?;
    csv.write_record([fmt(integral_value)])?;

    for (alpha, row) in alphas.iter().zip(spanwise) {
        csv.write_record([""])?;
        csv.write_record([format!("{} at Alpha = {}", spanwise_title, fmt(*alpha))])?;
        csv.write_record(["eta".to_string(), format!("{}(eta)", quantity)])?;
        for (eta, value) in etas.iter().zip(row) {
            csv.write_record([fmt(*eta), fmt(*value)])?;
        }
    }

    csv.write_record([""])?;
    csv.write_record([format!("{} Derivative", spanwise_title)])?;
    csv.write_record(["eta".to_string(), format!("d{}/dAlpha(eta)", quantity)])?;
    for (eta, slope) in etas.iter().zip(slopes) {
        csv.write_record([fmt(*eta), fmt(*slope)])?;
    }

    csv.flush().map_err(csv_io)?;
    Ok(())
}

/// 迎角匹配容差 (deg)：报告间的迎角格式漂移远小于此值
const ALPHA_TOL: f64 = 1e-6;

/// 汇总表单元格：缺失记录留空
fn lookup(point: &SweepPointData, kind: CoefficientKind, config: ConfigTag, alpha: f64) -> String {
    point
        .coefficients
        .iter()
        .find(|r| r.kind == kind && r.config == config && (r.alpha - alpha).abs() < ALPHA_TOL)
        .map(|r| fmt(r.value))
        .unwrap_or_default()
}

fn fmt(value: f64) -> String {
    format!("{}", value)
}

fn csv_io(e: std::io::Error) -> CawixError {
    CawixError::Other(format!("CSV flush failed: {}", e))
}
