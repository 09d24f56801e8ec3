//! # 结果报告写出模块
//!
//! 将扫掠点的干扰计算结果写为三个多节 CSV 文件。
//!
//! ## 依赖关系
//! - 被 `commands/post.rs` 使用
//! - 使用 `analysis/`, `models/` 的数据结构

pub mod writer;

pub use writer::{write_downwash, write_resume, write_upwash};
