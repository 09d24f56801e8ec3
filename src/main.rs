//! # CaWiX - 鸭翼/机翼气动干扰扫掠工具箱
//!
//! 围绕外部 CFD 批处理求解器自动化鸭式布局的参数干扰研究：
//! 枚举几何/工况组合、准备每个算例的输入、驱动求解器、
//! 归并升力线斜率与下洗/上洗分布。
//!
//! ## 子命令
//! - `sweep` - 枚举 DOE 算例网格，暂存几何与数据文件并逐例调用求解器
//! - `post`  - 解析求解器报告，计算干扰系数并写出结果 CSV
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── sweep/     (算例枚举、工作目录、求解器调用)
//!   │     ├── parsers/   (求解器报告解析器)
//!   │     ├── analysis/  (回归与干扰计算)
//!   │     ├── report/    (结果报告写出)
//!   │     └── models/    (数据模型)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod analysis;
mod cli;
mod commands;
mod error;
mod models;
mod parsers;
mod report;
mod sweep;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
