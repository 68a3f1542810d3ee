//! # 扫描表行
//!
//! ## 依赖关系
//! - 由 `scan/builder.rs` 生成
//! - 被 `scan/export.rs`, `scan/plot.rs` 使用

/// 扫描表中的一行：能量 (keV) 与 DCM 位置
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanTableRow {
    pub energy_kev: f64,
    pub position: f64,
}

impl ScanTableRow {
    /// 由网格能量 (eV) 构造
    pub fn from_ev(energy_ev: f64, position: f64) -> Self {
        ScanTableRow {
            energy_kev: energy_ev / 1000.0,
            position,
        }
    }
}
