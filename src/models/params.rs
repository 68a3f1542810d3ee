//! # 扫描参数数据模型
//!
//! 一次扫描表计算所需的全部输入，构造后不可变。
//!
//! ## 依赖关系
//! - 由 `models/preset.rs` 解析生成
//! - 被 `scan/builder.rs` 使用
//! - 使用 `scan/geometry.rs` 的 DcmGeometry

use crate::models::region::RegionParams;
use crate::scan::geometry::{calibration_offset, DcmGeometry};

/// 默认能量列标签
pub const DEFAULT_ENERGY_LABEL: &str = "Energy";
/// 默认位置列标签
pub const DEFAULT_POSITION_LABEL: &str = "DCM_Y2";

/// DCM 标定来源
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Calibration {
    /// y2 (mm) 与 theta (度) 读数，偏移量由二者推导
    Readings { y2: f64, theta: f64 },
    /// 外部直接给定的偏移量
    Offset(f64),
}

impl Calibration {
    /// 标定偏移量（每次计算只求一次）
    pub fn offset(&self) -> f64 {
        match *self {
            Calibration::Readings { y2, theta } => calibration_offset(y2, theta),
            Calibration::Offset(offset) => offset,
        }
    }
}

/// 输出文件表头标签
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableLabels {
    pub energy: String,
    pub position: String,
}

impl TableLabels {
    /// 表头行，不带注释前缀
    pub fn header(&self) -> String {
        format!("{};{}", self.energy, self.position)
    }
}

impl Default for TableLabels {
    fn default() -> Self {
        TableLabels {
            energy: DEFAULT_ENERGY_LABEL.to_string(),
            position: DEFAULT_POSITION_LABEL.to_string(),
        }
    }
}

/// 扫描参数
#[derive(Debug, Clone, PartialEq)]
pub struct ScanParams {
    /// 吸收边能量 (eV)
    pub e0: f64,
    /// Pre-edge：E0 之下的起止距离 (eV)
    pub pre: RegionParams,
    /// XANES-1：起点在 E0 之下，终点在 E0 之上 (eV)
    pub xanes1: RegionParams,
    /// XANES-2：E0 之上 (eV)
    pub xanes2: RegionParams,
    /// EXAFS：k 空间 (Å⁻¹)
    pub exafs: RegionParams,
    pub calibration: Calibration,
    pub geometry: DcmGeometry,
    pub labels: TableLabels,
}
