//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `sweep/`, `parsers/`, `analysis/`, `report/`, `utils/`
//! - 子模块: sweep, post

pub mod post;
pub mod sweep;

use crate::cli::{AxisArgs, Commands};
use crate::error::Result;
use crate::sweep::{DesignAxis, SweepGrid};

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Sweep(args) => sweep::execute(args),
        Commands::Post(args) => post::execute(args),
    }
}

/// 由命令行轴参数构造扫掠网格
///
/// 轴顺序固定，迎角最后声明、变化最快。sweep 与 post
/// 必须以相同的轴取值调用，目录名中的索引才能对齐。
pub(crate) fn build_grid(axes: &AxisArgs) -> Result<SweepGrid> {
    SweepGrid::new(vec![
        DesignAxis::new("x_position", axes.x_position.clone())?,
        DesignAxis::new("z_position", axes.z_position.clone())?,
        DesignAxis::new("span", axes.span.clone())?,
        DesignAxis::new("sweep", axes.sweep.clone())?,
        DesignAxis::new("dihedral", axes.dihedral.clone())?,
        DesignAxis::new("rigging", axes.rigging.clone())?,
        DesignAxis::new("mach", axes.mach.clone())?,
        DesignAxis::new("alpha", axes.alpha.clone())?,
    ])
}
