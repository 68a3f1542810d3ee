//! # xafs-table - XAFS 扫描表生成工具
//!
//! 由 pre-edge / XANES / EXAFS 扫描区间参数生成能量 - DCM 位置扫描表，
//! 导出为束线控制软件读取的分号分隔文件。
//!
//! ## 子命令
//! - `generate` - 生成扫描表（可选图表与预览）
//! - `readback` - 读取 DCM y2/theta 并显示标定偏移量
//! - `batch`    - 按目录中的预设文件批量生成
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── scan/       (能量网格、Bragg 几何、导出、绘图)
//!   │     ├── instrument/ (过程变量读数)
//!   │     ├── batch/      (批量处理)
//!   │     └── models/     (数据模型与预设)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod error;
mod instrument;
mod models;
mod scan;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error_chain(&e);
        std::process::exit(1);
    }
}
