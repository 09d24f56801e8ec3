//! # 气动结果数据模型
//!
//! 存储从求解器报告解析出的系数与展向载荷记录，
//! 以及回归和干扰计算的结果结构。
//!
//! ## 依赖关系
//! - 被 `parsers/`, `analysis/`, `report/` 使用

use serde::{Deserialize, Serialize};

/// 升力面标识（线格式中的配置标签子串）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Surface {
    Canard,
    Wing,
}

impl Surface {
    pub fn as_str(&self) -> &'static str {
        match self {
            Surface::Canard => "CANARD",
            Surface::Wing => "WING",
        }
    }
}

impl std::fmt::Display for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 配置标签：区分单独与组合状态下的同一升力面
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigTag {
    WingAlone,
    CanardAlone,
    WingWithCanard,
    CanardWithWing,
}

impl ConfigTag {
    /// 由升力面与报告上下文（是否组合算例）确定配置标签
    pub fn from_surface(surface: Surface, combined: bool) -> ConfigTag {
        match (surface, combined) {
            (Surface::Wing, false) => ConfigTag::WingAlone,
            (Surface::Canard, false) => ConfigTag::CanardAlone,
            (Surface::Wing, true) => ConfigTag::WingWithCanard,
            (Surface::Canard, true) => ConfigTag::CanardWithWing,
        }
    }
}

impl std::fmt::Display for ConfigTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ConfigTag::WingAlone => "WING_ALONE",
            ConfigTag::CanardAlone => "CANARD_ALONE",
            ConfigTag::WingWithCanard => "WING_WITH_CANARD",
            ConfigTag::CanardWithWing => "CANARD_WITH_WING",
        };
        write!(f, "{}", s)
    }
}

/// 气动系数名称
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoefficientKind {
    Cd,
    Cy,
    Cl,
    CRoll,
    Cm,
    Cn,
}

impl CoefficientKind {
    /// 解析线格式中的系数名；未知名称返回 None
    pub fn parse(token: &str) -> Option<CoefficientKind> {
        match token {
            "CD" => Some(CoefficientKind::Cd),
            "CY" => Some(CoefficientKind::Cy),
            "CL" => Some(CoefficientKind::Cl),
            "CRoll" => Some(CoefficientKind::CRoll),
            "CM" => Some(CoefficientKind::Cm),
            "CN" => Some(CoefficientKind::Cn),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CoefficientKind::Cd => "CD",
            CoefficientKind::Cy => "CY",
            CoefficientKind::Cl => "CL",
            CoefficientKind::CRoll => "CRoll",
            CoefficientKind::Cm => "CM",
            CoefficientKind::Cn => "CN",
        }
    }
}

impl std::fmt::Display for CoefficientKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 单条积分气动系数记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoefficientRecord {
    pub config: ConfigTag,
    pub kind: CoefficientKind,
    /// 迎角 (deg)，取自同一报告文件的 Angle 行
    pub alpha: f64,
    pub value: f64,
}

/// 展向站位几何（对所有迎角不变）
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SpanwiseStation {
    /// 展向坐标 (m)
    pub y: f64,
    /// 无量纲展向位置，0 为翼根，1 为翼梢
    pub eta: f64,
    /// 当地弦长 (m)
    pub chord: f64,
}

/// 展向载荷报告中的一行
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LoadRow {
    pub y: f64,
    pub eta: f64,
    pub chord: f64,
    /// 当地载荷 c·Cl
    pub ccl: f64,
    /// 当地升力系数 cl
    pub cl: f64,
}

impl LoadRow {
    pub fn station(&self) -> SpanwiseStation {
        SpanwiseStation {
            y: self.y,
            eta: self.eta,
            chord: self.chord,
        }
    }
}

/// 最小二乘直线拟合结果 y = intercept + slope·x
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RegressionFit {
    pub slope: f64,
    pub intercept: f64,
}

/// 单个扫掠点的干扰计算结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterferenceReport {
    /// 各配置的升力线斜率 CLα (1/deg)
    pub cla_wing_alone: f64,
    pub cla_canard_alone: f64,
    pub cla_wing_with_canard: f64,
    pub cla_canard_with_wing: f64,
    /// 积分下洗 dε/dα = 1 − CLα(W+C)/CLα(W)
    pub downwash_int: f64,
    /// 积分上洗 = CLα(C+W)/CLα(C) − 1
    pub upwash_int: f64,
    /// 展向下洗 [迎角][站位]
    pub downwash_y: Vec<Vec<f64>>,
    /// 展向上洗 [迎角][站位]
    pub upwash_y: Vec<Vec<f64>>,
    /// 各站位下洗对迎角的导数
    pub downwash_slope: Vec<f64>,
    /// 各站位上洗对迎角的导数
    pub upwash_slope: Vec<f64>,
}
