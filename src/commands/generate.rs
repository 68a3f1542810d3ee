//! # generate 命令实现
//!
//! 由扫描区间参数生成扫描表文件。
//!
//! ## 功能
//! - 参数来自 TOML 预设和命令行（命令行优先）
//! - 标定来自 offset、y2/theta 读数，或实时读取的过程变量
//! - 区间衔接检查（默认警告，`--strict` 时中止）
//! - 可选图表输出与终端预览
//!
//! ## 依赖关系
//! - 使用 `cli/generate.rs` 定义的参数
//! - 使用 `scan/` 进行计算、导出与绘图
//! - 使用 `commands/readback.rs` 读取过程变量

use super::readback::read_live_calibration;
use crate::cli::generate::GenerateArgs;
use crate::error::{Result, XafsError};
use crate::models::preset::{CalibrationPreset, GeometryPreset, LabelsPreset};
use crate::models::{Calibration, ScanParams, ScanPreset, ScanTableRow};
use crate::scan::builder::RegionIssue;
use crate::scan::{self, RegionSummary};
use crate::utils::output;

/// 计算结果及检查信息
pub(crate) struct BuiltTable {
    pub rows: Vec<ScanTableRow>,
    pub summaries: Vec<RegionSummary>,
    pub issues: Vec<RegionIssue>,
}

/// 执行 generate 命令
pub fn execute(args: GenerateArgs) -> Result<()> {
    output::print_header("XAFS Scan Table Generation");

    if args.output.exists() && !args.overwrite {
        return Err(XafsError::OutputExists {
            path: args.output.display().to_string(),
        });
    }

    let base = match &args.preset {
        Some(path) => {
            output::print_info(&format!("Loading preset '{}'", path.display()));
            ScanPreset::load(path)?
        }
        None => ScanPreset::default(),
    };

    let mut overrides = overrides_from_args(&args);
    if overrides.calibration.is_empty() && args.pv.names().is_some() {
        overrides.calibration = read_live_calibration(&args.pv)?.into();
    }

    let params = base.merge(overrides).resolve()?;
    print_parameters(&params);

    let table = build_checked(&params, args.strict)?;
    for issue in &table.issues {
        output::print_warning(&issue.to_string());
    }

    scan::export::write_table(&args.output, &params.labels.header(), &table.rows)?;
    output::print_success(&format!(
        "Scan table with {} points saved to '{}'",
        table.rows.len(),
        args.output.display()
    ));

    if let Some(plot_path) = &args.plot {
        let title = format!("XAFS scan (E0 = {:.1} eV)", params.e0);
        scan::plot::generate_scan_plot(
            &table.rows,
            params.e0,
            plot_path,
            &title,
            args.width,
            args.height,
        )?;
        output::print_success(&format!("Plot saved to '{}'", plot_path.display()));
    }

    if args.preview > 0 {
        print_region_table(&table.summaries);
        print_row_table(&table.rows, args.preview);
    }

    Ok(())
}

/// 计算扫描表，`strict` 时区间问题视为错误
pub(crate) fn build_checked(params: &ScanParams, strict: bool) -> Result<BuiltTable> {
    let summaries = scan::summarize_regions(params)?;
    let issues = scan::check_region_order(&summaries);

    if strict && !issues.is_empty() {
        return Err(XafsError::RegionOverlap {
            details: issues
                .iter()
                .map(|i| format!("  {}", i))
                .collect::<Vec<_>>()
                .join("\n"),
        });
    }

    let rows = scan::build_scan_table(params)?;
    Ok(BuiltTable {
        rows,
        summaries,
        issues,
    })
}

/// 命令行参数转换为覆盖用的预设
fn overrides_from_args(args: &GenerateArgs) -> ScanPreset {
    let calibration: CalibrationPreset = match (args.offset, args.y2, args.theta) {
        (Some(offset), _, _) => Calibration::Offset(offset).into(),
        (None, Some(y2), Some(theta)) => Calibration::Readings { y2, theta }.into(),
        _ => CalibrationPreset::default(),
    };

    ScanPreset {
        e0: args.e0,
        labels: LabelsPreset {
            energy: args.energy_label.clone(),
            position: args.position_label.clone(),
        },
        pre: args.pre,
        xanes1: args.xanes1,
        xanes2: args.xanes2,
        exafs: args.exafs,
        calibration,
        geometry: GeometryPreset {
            hc: args.hc,
            d_spacing: args.d_spacing,
        },
    }
}

/// 打印计算参数
fn print_parameters(params: &ScanParams) {
    output::print_info(&format!("Edge energy E0: {:.2} eV", params.e0));
    match params.calibration {
        Calibration::Readings { y2, theta } => output::print_info(&format!(
            "Calibration: y2 = {:.4} mm, theta = {:.4}° -> offset {:.6}",
            y2,
            theta,
            params.calibration.offset()
        )),
        Calibration::Offset(offset) => {
            output::print_info(&format!("Calibration offset: {:.6}", offset))
        }
    }
    output::print_info(&format!(
        "Crystal d-spacing: {} nm, hc: {} keV·nm",
        params.geometry.d_spacing, params.geometry.hc
    ));
}

/// 打印区间概况表格
fn print_region_table(summaries: &[RegionSummary]) {
    use tabled::{Table, Tabled};

    #[derive(Tabled)]
    struct RegionRow {
        #[tabled(rename = "Region")]
        region: String,
        #[tabled(rename = "First (eV)")]
        first: String,
        #[tabled(rename = "Last (eV)")]
        last: String,
        #[tabled(rename = "Points")]
        points: usize,
    }

    let fmt_ev = |v: Option<f64>| v.map(|e| format!("{:.4}", e)).unwrap_or_else(|| "-".to_string());

    let rows: Vec<RegionRow> = summaries
        .iter()
        .map(|s| RegionRow {
            region: s.kind.to_string(),
            first: fmt_ev(s.first_ev),
            last: fmt_ev(s.last_ev),
            points: s.points,
        })
        .collect();

    output::print_header("Scan Regions");
    println!("{}", Table::new(&rows));
}

/// 打印扫描表前若干行
fn print_row_table(rows: &[ScanTableRow], count: usize) {
    use tabled::{Table, Tabled};

    #[derive(Tabled)]
    struct PreviewRow {
        #[tabled(rename = "#")]
        index: usize,
        #[tabled(rename = "Energy (keV)")]
        energy: String,
        #[tabled(rename = "Position")]
        position: String,
    }

    let preview: Vec<PreviewRow> = rows
        .iter()
        .take(count)
        .enumerate()
        .map(|(i, r)| PreviewRow {
            index: i + 1,
            energy: format!("{:.4}", r.energy_kev),
            position: format!("{:.4}", r.position),
        })
        .collect();

    if !preview.is_empty() {
        output::print_header(&format!("First {} of {} Rows", preview.len(), rows.len()));
        println!("{}", Table::new(&preview));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RegionParams, TableLabels};
    use crate::scan::geometry::DcmGeometry;

    fn params() -> ScanParams {
        ScanParams {
            e0: 11564.0,
            pre: RegionParams::new(40.0, 10.0, 5.0),
            xanes1: RegionParams::new(10.0, 20.0, 1.0),
            xanes2: RegionParams::new(20.0, 40.0, 2.0),
            exafs: RegionParams::new(6.0, 7.0, 1.0),
            calibration: Calibration::Offset(50.0),
            geometry: DcmGeometry::default(),
            labels: TableLabels::default(),
        }
    }

    #[test]
    fn test_build_checked_clean() {
        let table = build_checked(&params(), true).unwrap();
        assert_eq!(table.rows.len(), 6 + 30 + 10 + 1);
        assert!(table.issues.is_empty());
        assert_eq!(table.summaries.len(), 4);
    }

    #[test]
    fn test_build_checked_strict_rejects_overlap() {
        let mut p = params();
        p.xanes1.start = 100.0;

        let lenient = build_checked(&p, false).unwrap();
        assert_eq!(lenient.issues.len(), 1);

        let err = build_checked(&p, true).err().unwrap();
        assert!(matches!(err, XafsError::RegionOverlap { .. }));
    }
}
