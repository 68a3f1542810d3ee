//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `generate`: 生成扫描表文件
//! - `readback`: 读取 DCM y2/theta 并显示标定偏移量
//! - `batch`: 按预设文件批量生成扫描表
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: generate, readback, batch

pub mod batch;
pub mod generate;
pub mod readback;

use clap::{Parser, Subcommand};

/// xafs-table - XAFS 扫描表生成工具
#[derive(Parser)]
#[command(name = "xafs-table")]
#[command(version)]
#[command(
    about = "Generate energy / DCM position scan tables for XAFS beamlines",
    long_about = None
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Generate a scan table from region parameters
    Generate(generate::GenerateArgs),

    /// Read the DCM y2 and theta PVs and show the calibration offset
    Readback(readback::ReadbackArgs),

    /// Generate scan tables for every preset file in a directory
    Batch(batch::BatchArgs),
}
