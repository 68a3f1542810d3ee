//! # batch 子命令 CLI 定义
//!
//! 对目录中的每个 TOML 预设生成一个扫描表。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/batch.rs`

use clap::Args;
use std::path::PathBuf;

/// batch 子命令参数
#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Directory containing preset files
    pub input: PathBuf,

    /// Output directory for the generated tables
    #[arg(short, long)]
    pub output: PathBuf,

    /// Glob pattern for preset files (comma-separated for several)
    #[arg(long, default_value = "*.toml")]
    pub pattern: String,

    /// Number of parallel jobs (0 = auto)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,

    /// Recurse into subdirectories
    #[arg(long, default_value_t = false)]
    pub recursive: bool,

    /// Fail a preset when its regions overlap or run backwards
    #[arg(long, default_value_t = false)]
    pub strict: bool,

    /// Overwrite existing output files
    #[arg(long, default_value_t = false)]
    pub overwrite: bool,
}
