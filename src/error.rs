//! # 统一错误处理模块
//!
//! 定义 CaWiX 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// CaWiX 统一错误类型
#[derive(Error, Debug)]
pub enum CawixError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: String },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ─────────────────────────────────────────────────────────────
    // 解析错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to parse {format} file: {path}\nReason: {reason}")]
    ParseError {
        format: String,
        path: String,
        reason: String,
    },

    #[error("Unrecognized report header: {header}")]
    UnknownHeader { header: String },

    // ─────────────────────────────────────────────────────────────
    // 配置错误（致命，整个批次中止）
    // ─────────────────────────────────────────────────────────────
    #[error("Required component '{component}' is missing from the aircraft model")]
    MissingComponent { component: String },

    #[error("Invalid design axis '{name}': {reason}")]
    InvalidAxis { name: String, reason: String },

    // ─────────────────────────────────────────────────────────────
    // 外部求解器错误
    // ─────────────────────────────────────────────────────────────
    #[error("Solver executable '{command}' could not be spawned")]
    CommandNotFound { command: String },

    #[error("Solver invocation failed: {command}\n{stderr}")]
    CommandFailed { command: String, stderr: String },

    #[error("Solver timed out after {seconds} s")]
    SolverTimeout { seconds: u64 },

    // ─────────────────────────────────────────────────────────────
    // 数据一致性错误
    // ─────────────────────────────────────────────────────────────
    #[error("Spanwise station count mismatch for {surface}: expected {expected}, found {found}")]
    StationMismatch {
        surface: String,
        expected: usize,
        found: usize,
    },

    // ─────────────────────────────────────────────────────────────
    // CSV 错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    // ─────────────────────────────────────────────────────────────
    // 其他
    // ─────────────────────────────────────────────────────────────
    #[error("{0}")]
    Other(String),
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, CawixError>;
