//! # 气动干扰分析模块
//!
//! 最小二乘直线拟合与鸭翼–机翼干扰量计算。
//!
//! ## 依赖关系
//! - 被 `commands/post.rs` 使用
//! - 使用 `models/records.rs` 的数据结构

pub mod interference;
pub mod regression;

pub use interference::SweepPointData;
pub use regression::linear_fit;
