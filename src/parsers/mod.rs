//! # 求解器输入/输出解析模块
//!
//! 手写逐行解析器：飞机定义文件、积分系数报告、展向载荷报告。
//!
//! ## 依赖关系
//! - 被 `commands/sweep.rs`, `commands/post.rs` 使用
//! - 使用 `models/` 的数据结构

pub mod aircraft;
pub mod coefficients;
pub mod loads;

pub use aircraft::parse_aircraft_file;
pub use coefficients::{parse_coefficient_file, ParsedCoefficients};
pub use loads::parse_loads_file;
