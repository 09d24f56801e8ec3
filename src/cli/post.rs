//! # post 子命令 CLI 定义
//!
//! 扫掠结果后处理：按扫掠点聚合报告、计算干扰量、写结果 CSV。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/post.rs`

use crate::cli::AxisArgs;
use clap::Args;
use std::path::PathBuf;

/// post 子命令参数
///
/// 设计轴必须与 sweep 阶段完全一致，扫掠点目录按同一枚举顺序定位。
#[derive(Args, Debug)]
pub struct PostArgs {
    /// Root directory containing the case folders
    #[arg(long, default_value = "cases")]
    pub cases_root: PathBuf,

    #[command(flatten)]
    pub axes: AxisArgs,

    // ─────────────────────────────────────────────────────────────
    // Solver options (report extraction macro)
    // ─────────────────────────────────────────────────────────────
    /// Solver executable
    #[arg(long, default_value = "starccm+")]
    pub solver_exe: String,

    /// Extra solver options (licensing, parallelism), whitespace-separated
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub solver_options: String,

    /// Directory containing the solver macro (solver working directory)
    #[arg(long, default_value = ".")]
    pub macro_dir: PathBuf,

    /// Solver macro file name
    #[arg(long, default_value = "ExtractReports.java")]
    pub macro_name: String,

    /// Per-case solver timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    // ─────────────────────────────────────────────────────────────
    // Execution control
    // ─────────────────────────────────────────────────────────────
    /// Parse existing report files without re-running the extraction macro
    #[arg(long, default_value_t = false)]
    pub skip_macro: bool,
}
