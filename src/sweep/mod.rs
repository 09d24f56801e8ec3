//! # 扫掠引擎模块
//!
//! DOE 算例枚举、工作目录编排、求解器调用与算例清单写出。
//!
//! ## 依赖关系
//! - 被 `commands/sweep.rs`, `commands/post.rs` 使用
//! - 子模块: grid, workspace, solver, manifest

pub mod grid;
pub mod manifest;
pub mod solver;
pub mod workspace;

pub use grid::{CaseIndex, DesignAxis, SweepGrid};
pub use solver::{SolverOutcome, SolverRunner};
pub use workspace::CaseWorkspace;
