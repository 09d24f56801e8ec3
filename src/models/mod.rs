//! # 数据模型模块
//!
//! ## 依赖关系
//! - 被 `sweep/`, `parsers/`, `analysis/`, `report/` 使用
//! - 子模块: aircraft, operating, records

pub mod aircraft;
pub mod operating;
pub mod records;

pub use aircraft::{
    AircraftModel, CanardOffsets, FuselageGeometry, GeometrySnapshot, SurfacePlanform,
};
pub use operating::{isa_atmosphere, Atmosphere, OperatingPoint};
pub use records::{
    CoefficientKind, CoefficientRecord, ConfigTag, InterferenceReport, LoadRow, RegressionFit,
    SpanwiseStation, Surface,
};
