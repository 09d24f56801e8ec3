//! # 最小二乘直线拟合
//!
//! 对成对的 (x, y) 样本做普通最小二乘拟合 y = a + b·x。
//! 样本以成对形式传入，拟合不依赖两个序列的位置对应关系。
//!
//! ## 依赖关系
//! - 被 `analysis/interference.rs` 使用

use crate::models::RegressionFit;

/// 普通最小二乘直线拟合
///
/// 退化输入（样本数 < 2 或所有 x 相同）得到 NaN 系数，
/// 由调用方的数值检查兜底，这里不判错。
pub fn linear_fit(pairs: &[(f64, f64)]) -> RegressionFit {
    let n = pairs.len() as f64;
    let sum_x: f64 = pairs.iter().map(|(x, _)| x).sum();
    let sum_y: f64 = pairs.iter().map(|(_, y)| y).sum();
    let sum_xy: f64 = pairs.iter().map(|(x, y)| x * y).sum();
    let sum_xx: f64 = pairs.iter().map(|(x, _)| x * x).sum();

    let denom = n * sum_xx - sum_x * sum_x;
    let slope = (n * sum_xy - sum_x * sum_y) / denom;
    let intercept = (sum_y * sum_xx - sum_x * sum_xy) / denom;

    RegressionFit { slope, intercept }
}
