//! # DOE 算例网格
//!
//! 有名参数轴的笛卡尔积枚举器。
//!
//! ## 功能
//! - 字典序枚举，最后声明的轴变化最快
//! - 惰性、有限、可重新开始的多重索引序列
//! - 枚举顺序是对外契约：下游目录/文件名按声明顺序编码索引
//!
//! ## 依赖关系
//! - 被 `commands/sweep.rs`, `commands/post.rs` 使用

use crate::error::{CawixError, Result};
use serde::{Deserialize, Serialize};

/// 有名设计轴：离散数值偏移量的有序列表
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignAxis {
    name: String,
    values: Vec<f64>,
}

impl DesignAxis {
    /// 构造设计轴，至少一个取值
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Result<DesignAxis> {
        let name = name.into();
        if values.is_empty() {
            return Err(CawixError::InvalidAxis {
                name,
                reason: "axis must have at least one value".to_string(),
            });
        }
        Ok(DesignAxis { name, values })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

/// 算例多重索引，每轴一个分量
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseIndex {
    indices: Vec<usize>,
}

impl CaseIndex {
    pub fn new(indices: Vec<usize>) -> CaseIndex {
        CaseIndex { indices }
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn get(&self, axis: usize) -> usize {
        self.indices[axis]
    }

    /// 规范字符串 id：索引按轴声明顺序以 `_` 连接
    pub fn id(&self) -> String {
        self.indices
            .iter()
            .map(|i| i.to_string())
            .collect::<Vec<_>>()
            .join("_")
    }

    /// 在末尾追加一个索引分量（扫掠点 id + 迎角序号）
    pub fn with_component(&self, index: usize) -> CaseIndex {
        let mut indices = self.indices.clone();
        indices.push(index);
        CaseIndex { indices }
    }
}

impl std::fmt::Display for CaseIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// 扫掠网格：有序设计轴列表的笛卡尔积
#[derive(Debug, Clone)]
pub struct SweepGrid {
    axes: Vec<DesignAxis>,
}

impl SweepGrid {
    pub fn new(axes: Vec<DesignAxis>) -> Result<SweepGrid> {
        if axes.is_empty() {
            return Err(CawixError::InvalidAxis {
                name: "<grid>".to_string(),
                reason: "grid must have at least one axis".to_string(),
            });
        }
        Ok(SweepGrid { axes })
    }

    pub fn axes(&self) -> &[DesignAxis] {
        &self.axes
    }

    /// 算例总数 Πkᵢ
    pub fn len(&self) -> usize {
        self.axes.iter().map(|a| a.len()).product()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 算例索引对应的各轴取值
    pub fn values(&self, case: &CaseIndex) -> Vec<f64> {
        self.axes
            .iter()
            .zip(case.indices())
            .map(|(axis, &i)| axis.values()[i])
            .collect()
    }

    /// 去掉最后一个轴的网格（post 阶段的扫掠点网格）
    pub fn leading(&self) -> Result<SweepGrid> {
        SweepGrid::new(self.axes[..self.axes.len() - 1].to_vec())
    }

    /// 惰性枚举全部算例索引，字典序，最后声明的轴变化最快
    pub fn enumerate(&self) -> CaseEnumerator {
        CaseEnumerator {
            dims: self.axes.iter().map(|a| a.len()).collect(),
            next: Some(vec![0; self.axes.len()]),
        }
    }
}

/// 算例枚举器（里程表进位）
pub struct CaseEnumerator {
    dims: Vec<usize>,
    next: Option<Vec<usize>>,
}

impl Iterator for CaseEnumerator {
    type Item = CaseIndex;

    fn next(&mut self) -> Option<CaseIndex> {
        let current = self.next.take()?;
        let item = CaseIndex::new(current.clone());

        // 从最后一轴向前进位
        let mut indices = current;
        for axis in (0..self.dims.len()).rev() {
            indices[axis] += 1;
            if indices[axis] < self.dims[axis] {
                self.next = Some(indices);
                return Some(item);
            }
            indices[axis] = 0;
        }
        // 溢出，枚举结束
        Some(item)
    }
}
