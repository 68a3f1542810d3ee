//! # 扫描表计算模块
//!
//! 由扫描区间参数生成能量网格，并换算为 DCM 第二晶体位置。
//!
//! ## 子模块
//! - `grid`: 能量网格生成
//! - `geometry`: Bragg 几何与标定偏移量
//! - `builder`: 扫描表构建与区间检查
//! - `export`: 分号分隔文件导出
//! - `plot`: 图表生成
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 使用 `models/`

pub mod builder;
pub mod export;
pub mod geometry;
pub mod grid;
pub mod plot;

pub use builder::{build_scan_table, check_region_order, summarize_regions, RegionSummary};
