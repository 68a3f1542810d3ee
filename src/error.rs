//! # 统一错误处理模块
//!
//! 定义 xafs-table 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// xafs-table 统一错误类型
#[derive(Error, Debug)]
pub enum XafsError {
    // ─────────────────────────────────────────────────────────────
    // 扫描表计算错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid {region} region: {reason}")]
    InvalidRegion { region: String, reason: String },

    #[error("Bragg condition unsatisfiable at {energy} eV (asin argument {argument:.6} outside [-1, 1])")]
    Domain { energy: f64, argument: f64 },

    #[error("Division by zero: {context}")]
    DivisionByZero { context: String },

    #[error("Scan regions are inconsistent:\n{details}")]
    RegionOverlap { details: String },

    // ─────────────────────────────────────────────────────────────
    // 仪器读数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Instrument source unavailable for '{identifier}': {reason}")]
    SourceUnavailable { identifier: String, reason: String },

    #[error("External command '{command}' not found in PATH")]
    CommandNotFound { command: String },

    #[error("External command failed: {command}\n{stderr}")]
    CommandFailed { command: String, stderr: String },

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

    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: String },

    #[error("Output file already exists: {path} (use --overwrite)")]
    OutputExists { path: String },

    // ─────────────────────────────────────────────────────────────
    // 参数与预设错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to parse preset file: {path}\nReason: {reason}")]
    PresetParse { path: String, reason: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // ─────────────────────────────────────────────────────────────
    // 导出错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Plot rendering failed: {0}")]
    PlotError(String),
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, XafsError>;
