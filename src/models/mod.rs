//! # 数据模型模块
//!
//! 定义扫描区间、扫描参数、参数预设与扫描表数据模型。
//!
//! ## 依赖关系
//! - 被 `scan/` 和 `commands/` 使用
//! - 子模块: region, params, preset, table

pub mod params;
pub mod preset;
pub mod region;
pub mod table;

pub use params::{Calibration, ScanParams, TableLabels};
pub use preset::ScanPreset;
pub use region::{RegionKind, RegionParams, ScanRegion};
pub use table::ScanTableRow;
