//! # 统一错误处理模块
//!
//! 定义 msibi-utils 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// msibi-utils 统一错误类型
#[derive(Error, Debug)]
pub enum MsibiError {
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

    #[error("Invalid pair name '{0}' (expected 'type1-type2')")]
    InvalidPairName(String),

    // ─────────────────────────────────────────────────────────────
    // 最佳迭代选择错误
    // ─────────────────────────────────────────────────────────────
    #[error("Pair '{0}' not found in log")]
    UnknownPair(String),

    #[error("Pair '{pair}' has no state containing '{marker}'")]
    NoQualifyingStates { pair: String, marker: String },

    #[error("Pair '{pair}' has states with different iteration counts: {lengths}")]
    RaggedStates { pair: String, lengths: String },

    #[error("Invalid fit value '{value}' for {pair}/{state}")]
    InvalidFitValue {
        pair: String,
        state: String,
        value: String,
    },

    // ─────────────────────────────────────────────────────────────
    // 参数与配置错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid configuration in {path}\nReason: {reason}")]
    ConfigError { path: String, reason: String },

    // ─────────────────────────────────────────────────────────────
    // 绘图错误
    // ─────────────────────────────────────────────────────────────
    #[error("Plotting failed: {0}")]
    PlotError(String),

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
pub type Result<T> = std::result::Result<T, MsibiError>;
