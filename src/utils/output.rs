//! # 终端输出工具
//!
//! 统一的带标签彩色输出，信息类写 stdout，警告与错误写 stderr。
//!
//! ## 依赖关系
//! - 被 `commands/` 与 `main.rs` 使用
//! - 使用 `colored` crate

use colored::{ColoredString, Colorize};
use std::error::Error;

/// 消息级别
#[derive(Debug, Clone, Copy)]
enum Level {
    Info,
    Success,
    Done,
    Skip,
    Warning,
    Error,
}

impl Level {
    fn tag(self) -> ColoredString {
        match self {
            Level::Info => "[*]".blue().bold(),
            Level::Success => "[OK]".green().bold(),
            Level::Done => "[DONE]".green().bold(),
            Level::Skip => "[SKIP]".dimmed(),
            Level::Warning => "[WARN]".yellow().bold(),
            Level::Error => "[ERR]".red().bold(),
        }
    }

    fn to_stderr(self) -> bool {
        matches!(self, Level::Warning | Level::Error)
    }
}

fn emit(level: Level, msg: &str) {
    if level.to_stderr() {
        eprintln!("{} {}", level.tag(), msg);
    } else {
        println!("{} {}", level.tag(), msg);
    }
}

pub fn print_info(msg: &str) {
    emit(Level::Info, msg);
}

pub fn print_success(msg: &str) {
    emit(Level::Success, msg);
}

pub fn print_done(msg: &str) {
    emit(Level::Done, msg);
}

pub fn print_skip(msg: &str) {
    emit(Level::Skip, msg);
}

pub fn print_warning(msg: &str) {
    emit(Level::Warning, msg);
}

pub fn print_error(msg: &str) {
    emit(Level::Error, msg);
}

/// 打印错误及其完整的 source 链
pub fn print_error_chain(err: &dyn Error) {
    print_error(&err.to_string());
    let mut source = err.source();
    while let Some(cause) = source {
        eprintln!("      {} {}", "caused by:".dimmed(), cause);
        source = cause.source();
    }
}

/// 打印标题栏
pub fn print_header(title: &str) {
    let line = "─".repeat(60);
    println!("\n{}", line.dimmed());
    println!("  {}", title.bold());
    println!("{}\n", line.dimmed());
}

/// 打印分隔线
pub fn print_separator() {
    println!("{}", "─".repeat(60).dimmed());
}
