//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `sweep`: 枚举 DOE 算例、准备算例目录并逐例调用求解器
//! - `post`: 解析求解器报告、计算干扰量并写出结果 CSV
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: sweep, post

pub mod post;
pub mod sweep;

use clap::{Args, Parser, Subcommand};

/// CaWiX - 鸭翼–机翼气动干扰扫掠工具箱
#[derive(Parser)]
#[command(name = "cawix")]
#[command(version)]
#[command(about = "A canard-wing aerodynamic interference DOE sweep toolkit", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Enumerate DOE cases, stage geometry and run the CFD solver per case
    Sweep(sweep::SweepArgs),

    /// Parse solver reports and compute interference results per sweep point
    Post(post::PostArgs),
}

/// 设计轴取值，逗号分隔的数值列表
///
/// 轴的声明顺序即枚举顺序（最后一轴变化最快），
/// 目录与文件名中的索引按此顺序编码。
#[derive(Args, Debug, Clone)]
pub struct AxisArgs {
    /// Canard apex x-position offsets in m (comma-separated)
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true, default_values_t = [0.0])]
    pub x_position: Vec<f64>,

    /// Canard apex z-position offsets in m (comma-separated)
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true, default_values_t = [0.0])]
    pub z_position: Vec<f64>,

    /// Canard span variations, fraction of baseline (comma-separated)
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true, default_values_t = [0.0])]
    pub span: Vec<f64>,

    /// Canard LE sweep increments in deg (comma-separated)
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true, default_values_t = [0.0])]
    pub sweep: Vec<f64>,

    /// Canard dihedral increments in deg (comma-separated)
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true, default_values_t = [0.0])]
    pub dihedral: Vec<f64>,

    /// Canard rigging increments in deg (comma-separated)
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true, default_values_t = [0.0])]
    pub rigging: Vec<f64>,

    /// Freestream Mach numbers (comma-separated)
    #[arg(long, value_delimiter = ',', default_values_t = [0.3])]
    pub mach: Vec<f64>,

    /// Angles of attack in deg (comma-separated, varies fastest)
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true,
          default_values_t = [-2.0, 0.0, 2.0, 4.0])]
    pub alpha: Vec<f64>,
}
