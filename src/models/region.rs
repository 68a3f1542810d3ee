//! # 扫描区间数据模型
//!
//! 定义扫描区间参数（相对 E0 输入）及其绝对区间表示。
//!
//! ## 区间顺序
//! 1. Pre-edge: `[e0 - start, e0 - stop)`
//! 2. XANES-1: `[e0 - start, e0 + stop)`
//! 3. XANES-2: `[e0 + start, e0 + stop)`
//! 4. EXAFS: k 空间 `[start, stop)`，单位 Å⁻¹
//!
//! ## 依赖关系
//! - 被 `models/params.rs`, `models/preset.rs` 使用
//! - 被 `scan/grid.rs` 使用

use serde::Deserialize;

/// 区间参数（操作员输入的原始值）
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegionParams {
    pub start: f64,
    pub stop: f64,
    pub step: f64,
}

impl RegionParams {
    pub fn new(start: f64, stop: f64, step: f64) -> Self {
        Self { start, stop, step }
    }
}

/// 区间类型，按扫描顺序排列
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionKind {
    PreEdge,
    Xanes1,
    Xanes2,
    Exafs,
}

impl RegionKind {
    /// 固定的扫描顺序
    pub const ALL: [RegionKind; 4] = [
        RegionKind::PreEdge,
        RegionKind::Xanes1,
        RegionKind::Xanes2,
        RegionKind::Exafs,
    ];

    /// EXAFS 区间以波数 k 定义
    pub fn is_k_space(&self) -> bool {
        matches!(self, RegionKind::Exafs)
    }

    /// 将相对 E0 的输入换算为绝对区间（EXAFS 保持 k 空间）
    pub fn absolute(&self, e0: f64, params: &RegionParams) -> ScanRegion {
        let (start, stop) = match self {
            RegionKind::PreEdge => (e0 - params.start, e0 - params.stop),
            RegionKind::Xanes1 => (e0 - params.start, e0 + params.stop),
            RegionKind::Xanes2 => (e0 + params.start, e0 + params.stop),
            RegionKind::Exafs => (params.start, params.stop),
        };
        ScanRegion {
            start,
            stop,
            step: params.step,
        }
    }
}

impl std::fmt::Display for RegionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegionKind::PreEdge => write!(f, "pre-edge"),
            RegionKind::Xanes1 => write!(f, "XANES-1"),
            RegionKind::Xanes2 => write!(f, "XANES-2"),
            RegionKind::Exafs => write!(f, "EXAFS"),
        }
    }
}

/// 绝对区间 `[start, stop)`，步长符号决定方向
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanRegion {
    pub start: f64,
    pub stop: f64,
    pub step: f64,
}
