//! # sweep 子命令 CLI 定义
//!
//! DOE 扫掠：枚举算例、准备目录、写数据清单、逐例调用求解器。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/sweep.rs`

use crate::cli::AxisArgs;
use clap::{ArgAction, Args, ValueEnum};
use std::path::PathBuf;

/// 仿真构型选择
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum Configuration {
    /// Canard + wing combined
    Combined,
    /// Canard alone
    CanardAlone,
    /// Wing alone
    WingAlone,
}

/// sweep 子命令参数
#[derive(Args, Debug)]
pub struct SweepArgs {
    /// Path to the aircraft definition file
    #[arg(long)]
    pub model: PathBuf,

    /// Root directory for case folders
    #[arg(long, default_value = "cases")]
    pub cases_root: PathBuf,

    /// Directory containing CAD geometry exports
    #[arg(long)]
    pub geometry_dir: PathBuf,

    /// Solver scratch directory, cleaned before every case
    #[arg(long)]
    pub scratch_dir: PathBuf,

    /// Configuration to simulate
    #[arg(long, value_enum, default_value = "combined")]
    pub configuration: Configuration,

    #[command(flatten)]
    pub axes: AxisArgs,

    // ─────────────────────────────────────────────────────────────
    // Operating conditions
    // ─────────────────────────────────────────────────────────────
    /// Flight altitude in ft
    #[arg(long, default_value_t = 0.0)]
    pub altitude: f64,

    // ─────────────────────────────────────────────────────────────
    // Solver options
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
    #[arg(long, default_value = "RunCase.java")]
    pub macro_name: String,

    /// Per-case solver timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    // ─────────────────────────────────────────────────────────────
    // Simulation parameters
    // ─────────────────────────────────────────────────────────────
    /// Solver mode written to the case manifest
    #[arg(long, default_value = "EULER")]
    pub sim_type: String,

    /// Simulate the symmetrical half-model
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub symmetrical: bool,

    /// Run the automated meshing step
    #[arg(long, default_value_t = false)]
    pub automesh: bool,

    // ─────────────────────────────────────────────────────────────
    // Execution control
    // ─────────────────────────────────────────────────────────────
    /// Prepare case folders and manifests without invoking the solver
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}
