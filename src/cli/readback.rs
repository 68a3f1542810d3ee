//! # readback 子命令 CLI 定义
//!
//! DCM 过程变量名称，`generate` 也复用这组参数。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs`, `cli/generate.rs` 使用
//! - 参数传递给 `commands/readback.rs`

use crate::instrument::DEFAULT_CAGET;

use clap::Args;

/// DCM 过程变量参数
#[derive(Args, Debug, Clone)]
pub struct PvArgs {
    /// EPICS PV of the DCM y2 position
    #[arg(long, env = "XAFS_Y2_PV")]
    pub y2_pv: Option<String>,

    /// EPICS PV of the DCM theta angle
    #[arg(long, env = "XAFS_THETA_PV")]
    pub theta_pv: Option<String>,

    /// caget executable used to read PVs
    #[arg(long, env = "XAFS_CAGET", default_value = DEFAULT_CAGET)]
    pub caget: String,
}

impl PvArgs {
    /// 两个 PV 名称都已给出时返回
    pub fn names(&self) -> Option<(&str, &str)> {
        match (&self.y2_pv, &self.theta_pv) {
            (Some(y2), Some(theta)) => Some((y2.as_str(), theta.as_str())),
            _ => None,
        }
    }
}

/// readback 子命令参数
#[derive(Args, Debug)]
pub struct ReadbackArgs {
    #[command(flatten)]
    pub pv: PvArgs,
}
