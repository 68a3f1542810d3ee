//! # 仪器读数模块
//!
//! 读取 DCM 的 y2 与 theta 当前值，用于计算标定偏移量。
//!
//! ## 读数来源
//! - `CagetSource`: 调用 EPICS 命令行工具 `caget -t <PV>`
//!
//! ## 依赖关系
//! - 被 `commands/generate.rs`, `commands/readback.rs` 使用
//! - 外部命令: `caget`

use crate::error::{Result, XafsError};
use crate::models::Calibration;

use std::io::ErrorKind;
use std::process::Command;

/// 默认的 caget 程序名
pub const DEFAULT_CAGET: &str = "caget";

/// 数值型过程变量读数来源
pub trait InstrumentSource {
    /// 读取指定通道的当前值
    fn read(&self, identifier: &str) -> Result<f64>;
}

/// 通过 `caget -t` 读取 EPICS 过程变量
pub struct CagetSource {
    program: String,
}

impl CagetSource {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl InstrumentSource for CagetSource {
    fn read(&self, identifier: &str) -> Result<f64> {
        let output = Command::new(&self.program)
            .args(["-t", identifier])
            .output()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => XafsError::CommandNotFound {
                    command: self.program.clone(),
                },
                _ => XafsError::CommandFailed {
                    command: format!("{} -t {}", self.program, identifier),
                    stderr: e.to_string(),
                },
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(XafsError::SourceUnavailable {
                identifier: identifier.to_string(),
                reason: if stderr.is_empty() {
                    format!("{} exited with {}", self.program, output.status)
                } else {
                    stderr
                },
            });
        }

        parse_reading(identifier, &String::from_utf8_lossy(&output.stdout))
    }
}

/// 解析 caget 输出的数值
pub fn parse_reading(identifier: &str, text: &str) -> Result<f64> {
    let trimmed = text.trim();
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| XafsError::SourceUnavailable {
            identifier: identifier.to_string(),
            reason: format!("unreadable value '{}'", trimmed),
        })
}

/// 读取 y2 与 theta，组成标定读数
pub fn read_calibration(
    source: &dyn InstrumentSource,
    y2_pv: &str,
    theta_pv: &str,
) -> Result<Calibration> {
    let y2 = source.read(y2_pv)?;
    let theta = source.read(theta_pv)?;
    Ok(Calibration::Readings { y2, theta })
}
