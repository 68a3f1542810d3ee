//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `models/`, `scan/`, `instrument/`, `utils/`
//! - 子模块: generate, readback, batch

pub mod batch;
pub mod generate;
pub mod readback;

use crate::cli::Commands;
use crate::error::Result;

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Generate(args) => generate::execute(args),
        Commands::Readback(args) => readback::execute(args),
        Commands::Batch(args) => batch::execute(args),
    }
}
