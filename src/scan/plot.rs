//! # 扫描表图表
//!
//! 使用 `plotters` 绘制能量 - DCM 位置曲线，便于在提交扫描前目视检查。
//!
//! ## 功能
//! - 每个扫描点标记为圆点，点间连线
//! - 竖线标出吸收边 E0
//! - 支持 PNG 和 SVG 输出
//!
//! ## 依赖关系
//! - 被 `commands/generate.rs` 调用
//! - 使用 `models/table.rs` 的 ScanTableRow
//! - 使用 `plotters` 渲染图表

use crate::error::{Result, XafsError};
use crate::models::ScanTableRow;

use plotters::prelude::*;
use std::path::Path;

/// 根据扩展名判断是否输出 SVG
pub fn is_svg_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|s| s.eq_ignore_ascii_case("svg"))
        .unwrap_or(false)
}

/// 生成扫描表图表
pub fn generate_scan_plot(
    rows: &[ScanTableRow],
    e0: f64,
    output_path: &Path,
    title: &str,
    width: u32,
    height: u32,
) -> Result<()> {
    if rows.is_empty() {
        return Err(XafsError::PlotError("scan table is empty".to_string()));
    }

    if is_svg_path(output_path) {
        let root = SVGBackend::new(output_path, (width, height)).into_drawing_area();
        draw_scan_chart(&root, rows, e0, title)?;
        root.present()
            .map_err(|e| XafsError::PlotError(e.to_string()))?;
    } else {
        let root = BitMapBackend::new(output_path, (width, height)).into_drawing_area();
        draw_scan_chart(&root, rows, e0, title)?;
        root.present()
            .map_err(|e| XafsError::PlotError(e.to_string()))?;
    }
    Ok(())
}

/// 绘制图表的核心逻辑
fn draw_scan_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    rows: &[ScanTableRow],
    e0: f64,
    title: &str,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)
        .map_err(|e| XafsError::PlotError(format!("{:?}", e)))?;

    let (x_min, x_max) = padded_range(rows.iter().map(|r| r.energy_kev));
    let (y_min, y_max) = padded_range(rows.iter().map(|r| r.position));

    let mut chart = ChartBuilder::on(root)
        .caption(title, ("sans-serif", 28).into_font())
        .margin(30)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(|e| XafsError::PlotError(format!("{:?}", e)))?;

    chart
        .configure_mesh()
        .x_desc("Energy (keV)")
        .y_desc("DCM position (mm)")
        .x_label_style(("sans-serif", 16))
        .y_label_style(("sans-serif", 16))
        .axis_desc_style(("sans-serif", 18))
        .draw()
        .map_err(|e| XafsError::PlotError(format!("{:?}", e)))?;

    let line_color = RGBColor(0, 102, 204);
    chart
        .draw_series(LineSeries::new(
            rows.iter().map(|r| (r.energy_kev, r.position)),
            line_color.stroke_width(1),
        ))
        .map_err(|e| XafsError::PlotError(format!("{:?}", e)))?;

    chart
        .draw_series(
            rows.iter()
                .map(|r| Circle::new((r.energy_kev, r.position), 2, line_color.filled())),
        )
        .map_err(|e| XafsError::PlotError(format!("{:?}", e)))?;

    // 标出吸收边
    let edge_kev = e0 / 1000.0;
    if edge_kev > x_min && edge_kev < x_max {
        chart
            .draw_series(std::iter::once(PathElement::new(
                vec![(edge_kev, y_min), (edge_kev, y_max)],
                RED.stroke_width(1),
            )))
            .map_err(|e| XafsError::PlotError(format!("{:?}", e)))?;

        chart
            .draw_series(std::iter::once(Text::new(
                format!("E0 = {:.1} eV", e0),
                (edge_kev, y_max),
                ("sans-serif", 14).into_font().color(&RED),
            )))
            .map_err(|e| XafsError::PlotError(format!("{:?}", e)))?;
    }

    Ok(())
}

/// 数据范围两侧各留 5% 边距，单点时给固定宽度
fn padded_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    let span = max - min;
    let pad = if span > 0.0 { span * 0.05 } else { min.abs().max(1.0) * 0.01 };
    (min - pad, max + pad)
}
