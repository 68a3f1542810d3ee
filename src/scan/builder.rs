//! # 扫描表构建
//!
//! 单次、无状态的计算流程：标定偏移量 → 能量网格 → 每点 DCM 位置 → 表格行。
//! 任一点失败则整个计算失败，不返回部分结果。
//!
//! ## 依赖关系
//! - 被 `commands/generate.rs`, `commands/batch.rs` 调用
//! - 使用 `scan/grid.rs` 生成能量网格
//! - 使用 `scan/geometry.rs` 计算位置

use crate::error::{Result, XafsError};
use crate::models::{RegionKind, ScanParams, ScanTableRow};
use crate::scan::geometry::energy_to_motor_position;
use crate::scan::grid::{build_energy_grid, region_energies};

/// 单个区间的概况
#[derive(Debug, Clone, PartialEq)]
pub struct RegionSummary {
    pub kind: RegionKind,
    /// 第一个能量点 (eV)
    pub first_ev: Option<f64>,
    /// 最后一个能量点 (eV)
    pub last_ev: Option<f64>,
    pub points: usize,
}

/// 区间衔接问题
#[derive(Debug, Clone, PartialEq)]
pub struct RegionIssue {
    pub kind: RegionKind,
    pub message: String,
}

impl std::fmt::Display for RegionIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

/// 计算完整扫描表
pub fn build_scan_table(params: &ScanParams) -> Result<Vec<ScanTableRow>> {
    let offset = params.calibration.offset();
    if !offset.is_finite() {
        return Err(XafsError::InvalidArgument(format!(
            "calibration offset is not finite ({})",
            offset
        )));
    }

    let grid = build_energy_grid(
        params.e0,
        &params.pre,
        &params.xanes1,
        &params.xanes2,
        &params.exafs,
    )?;

    grid.iter()
        .map(|&energy| -> Result<ScanTableRow> {
            let position = energy_to_motor_position(&params.geometry, energy, offset)?;
            Ok(ScanTableRow::from_ev(energy, position))
        })
        .collect()
}

/// 各区间的起止能量与点数
pub fn summarize_regions(params: &ScanParams) -> Result<Vec<RegionSummary>> {
    RegionKind::ALL
        .iter()
        .map(|&kind| -> Result<RegionSummary> {
            let region = match kind {
                RegionKind::PreEdge => &params.pre,
                RegionKind::Xanes1 => &params.xanes1,
                RegionKind::Xanes2 => &params.xanes2,
                RegionKind::Exafs => &params.exafs,
            };
            let energies = region_energies(kind, params.e0, region)?;
            Ok(RegionSummary {
                kind,
                first_ev: energies.first().copied(),
                last_ev: energies.last().copied(),
                points: energies.len(),
            })
        })
        .collect()
}

/// 检查区间是否依次递增且互不重叠。
///
/// 网格本身不排序也不去重，这里只报告问题，由调用方决定警告还是中止。
pub fn check_region_order(summaries: &[RegionSummary]) -> Vec<RegionIssue> {
    let mut issues = Vec::new();
    let mut previous: Option<(RegionKind, f64)> = None;

    for summary in summaries {
        let (first, last) = match (summary.first_ev, summary.last_ev) {
            (Some(first), Some(last)) => (first, last),
            _ => continue,
        };

        if last < first {
            issues.push(RegionIssue {
                kind: summary.kind,
                message: format!("runs downward ({:.4} -> {:.4} eV)", first, last),
            });
        }

        if let Some((prev_kind, prev_last)) = previous {
            if first <= prev_last {
                issues.push(RegionIssue {
                    kind: summary.kind,
                    message: format!(
                        "starts at {:.4} eV, not above the end of {} ({:.4} eV)",
                        first, prev_kind, prev_last
                    ),
                });
            }
        }

        previous = Some((summary.kind, first.max(last)));
    }

    issues
}
