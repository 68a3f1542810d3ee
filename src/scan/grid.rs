//! # 能量网格生成
//!
//! 按固定顺序拼接 pre-edge、XANES-1、XANES-2、EXAFS 四个区间的能量点。
//!
//! ## 算法概述
//! 1. 每个区间按半开区间 `[start, stop)` 以步长取点，点数为 `ceil((stop - start) / step)`
//! 2. EXAFS 区间在 k 空间取点，再用 E = k²/0.263 + E0 换算为能量（保留 4 位小数）
//! 3. 各区间结果一次性拼接，不排序也不去重
//!
//! ## 依赖关系
//! - 被 `scan/builder.rs` 调用
//! - 使用 `models/region.rs`

use crate::error::{Result, XafsError};
use crate::models::{RegionKind, RegionParams, ScanRegion};

/// k (Å⁻¹) 与动能 (eV) 的换算系数: E - E0 = k² / 0.263
pub const K_TO_EV: f64 = 0.263;

/// 单个区间允许的最大点数
pub const MAX_REGION_POINTS: usize = 1_000_000;

/// 区间点数，步长为零或数值非有限时报错
pub fn point_count(kind: RegionKind, region: &ScanRegion) -> Result<usize> {
    let invalid = |reason: String| XafsError::InvalidRegion {
        region: kind.to_string(),
        reason,
    };

    if !(region.start.is_finite() && region.stop.is_finite() && region.step.is_finite()) {
        return Err(invalid(format!(
            "bounds and step must be finite (start {}, stop {}, step {})",
            region.start, region.stop, region.step
        )));
    }
    if region.step == 0.0 {
        return Err(invalid("step must be nonzero".to_string()));
    }

    let n = ((region.stop - region.start) / region.step).ceil();
    if !n.is_finite() || n > MAX_REGION_POINTS as f64 {
        return Err(invalid(format!(
            "too many points ({} from {} to {} with step {}, limit {})",
            n, region.start, region.stop, region.step, MAX_REGION_POINTS
        )));
    }
    Ok(if n > 0.0 { n as usize } else { 0 })
}

/// 生成区间点 `start, start + step, ...`，不含 `stop`
pub fn region_points(kind: RegionKind, region: &ScanRegion) -> Result<Vec<f64>> {
    let n = point_count(kind, region)?;
    Ok((0..n)
        .map(|i| region.start + i as f64 * region.step)
        .collect())
}

/// 将 k 换算为绝对能量 (eV)，保留 4 位小数
pub fn k_to_energy(k: f64, e0: f64) -> f64 {
    round_to(k * k / K_TO_EV + e0, 4)
}

/// 单个区间的能量点 (eV)
pub fn region_energies(kind: RegionKind, e0: f64, params: &RegionParams) -> Result<Vec<f64>> {
    let region = kind.absolute(e0, params);
    let points = region_points(kind, &region)?;
    if kind.is_k_space() {
        Ok(points.into_iter().map(|k| k_to_energy(k, e0)).collect())
    } else {
        Ok(points)
    }
}

/// 生成完整能量网格 (eV)
pub fn build_energy_grid(
    e0: f64,
    pre: &RegionParams,
    xanes1: &RegionParams,
    xanes2: &RegionParams,
    exafs: &RegionParams,
) -> Result<Vec<f64>> {
    let parts = [
        region_energies(RegionKind::PreEdge, e0, pre)?,
        region_energies(RegionKind::Xanes1, e0, xanes1)?,
        region_energies(RegionKind::Xanes2, e0, xanes2)?,
        region_energies(RegionKind::Exafs, e0, exafs)?,
    ];
    Ok(parts.concat())
}

/// 四舍五入到指定小数位
fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(start: f64, stop: f64, step: f64) -> ScanRegion {
        ScanRegion { start, stop, step }
    }

    #[test]
    fn test_pre_edge_half_open() {
        let pre = RegionParams::new(40.0, 10.0, 5.0);
        let points = region_energies(RegionKind::PreEdge, 11564.0, &pre).unwrap();
        assert_eq!(
            points,
            vec![11524.0, 11529.0, 11534.0, 11539.0, 11544.0, 11549.0]
        );
        assert!(!points.contains(&11554.0));
    }

    #[test]
    fn test_point_count_matches_ceil() {
        let cases = [(0.0, 10.0, 3.0), (1.5, 2.0, 0.1), (100.0, 130.0, 0.5), (0.0, 1.0, 0.3)];
        for (start, stop, step) in cases {
            let r = region(start, stop, step);
            let points = region_points(RegionKind::Xanes2, &r).unwrap();
            let expected = ((stop - start) / step).ceil() as usize;
            assert_eq!(points.len(), expected, "region {:?}", r);
            assert_eq!(points[0], start);
            assert!(*points.last().unwrap() < stop);
        }
    }

    #[test]
    fn test_negative_step_descends() {
        let points = region_points(RegionKind::Xanes2, &region(10.0, 0.0, -2.5)).unwrap();
        assert_eq!(points, vec![10.0, 7.5, 5.0, 2.5]);
    }

    #[test]
    fn test_empty_region_is_not_an_error() {
        assert!(region_points(RegionKind::PreEdge, &region(10.0, 10.0, 1.0))
            .unwrap()
            .is_empty());
        assert!(region_points(RegionKind::PreEdge, &region(20.0, 10.0, 1.0))
            .unwrap()
            .is_empty());
        assert!(region_points(RegionKind::PreEdge, &region(0.0, 10.0, -1.0))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_zero_step_rejected() {
        for (start, stop) in [(0.0, 10.0), (10.0, 0.0), (5.0, 5.0)] {
            let err = region_points(RegionKind::Xanes1, &region(start, stop, 0.0)).unwrap_err();
            match err {
                XafsError::InvalidRegion { region, .. } => assert_eq!(region, "XANES-1"),
                other => panic!("unexpected error: {}", other),
            }
        }
    }

    #[test]
    fn test_non_finite_rejected() {
        let err = region_points(RegionKind::Exafs, &region(3.0, f64::NAN, 0.05)).unwrap_err();
        assert!(matches!(err, XafsError::InvalidRegion { .. }));
    }

    #[test]
    fn test_huge_region_rejected() {
        let err = region_points(RegionKind::PreEdge, &region(0.0, 1e30, 1e-10)).unwrap_err();
        match err {
            XafsError::InvalidRegion { region, reason } => {
                assert_eq!(region, "pre-edge");
                assert!(reason.contains("too many points"), "{}", reason);
            }
            other => panic!("unexpected error: {}", other),
        }

        // 步长笔误：150 → 30 eV，步长 1e-10
        let pre = RegionParams::new(150.0, 30.0, 0.0000000001);
        assert!(region_energies(RegionKind::PreEdge, 11564.0, &pre).is_err());

        let limit = region(0.0, MAX_REGION_POINTS as f64, 1.0);
        assert_eq!(point_count(RegionKind::Xanes2, &limit).unwrap(), MAX_REGION_POINTS);
    }

    #[test]
    fn test_exafs_single_point() {
        let exafs = RegionParams::new(3.0, 4.0, 1.0);
        let energies = region_energies(RegionKind::Exafs, 11564.0, &exafs).unwrap();
        assert_eq!(energies.len(), 1);
        assert!((energies[0] - 11598.2205).abs() < 1e-9, "{}", energies[0]);
    }

    #[test]
    fn test_exafs_rounding_is_stable() {
        for k in [3.0, 3.67, 5.13, 7.26, 11.95] {
            let first = k_to_energy(k, 8979.0);
            let second = k_to_energy(k, 8979.0);
            assert_eq!(first, second);
            assert_eq!(round_to(first, 4), first);
        }
    }

    #[test]
    fn test_grid_concatenates_in_order() {
        let e0 = 11564.0;
        let pre = RegionParams::new(40.0, 10.0, 5.0);
        let xa1 = RegionParams::new(10.0, 20.0, 10.0);
        let xa2 = RegionParams::new(20.0, 40.0, 10.0);
        let exafs = RegionParams::new(3.0, 4.0, 1.0);

        let grid = build_energy_grid(e0, &pre, &xa1, &xa2, &exafs).unwrap();
        assert_eq!(grid.len(), 6 + 3 + 2 + 1);
        assert_eq!(grid[6], 11554.0);
        assert_eq!(grid[8], 11574.0);
        assert_eq!(grid[9], 11584.0);
        assert_eq!(grid[10], 11594.0);
        assert!((grid[11] - 11598.2205).abs() < 1e-9);
    }

    #[test]
    fn test_grid_propagates_region_error() {
        let ok = RegionParams::new(40.0, 10.0, 5.0);
        let bad = RegionParams::new(20.0, 40.0, 0.0);
        let err = build_energy_grid(11564.0, &ok, &ok, &bad, &ok).unwrap_err();
        assert!(err.to_string().contains("XANES-2"));
    }
}
