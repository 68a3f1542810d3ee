//! # generate 子命令 CLI 定义
//!
//! 扫描区间、标定与输出参数。区间参数可来自 TOML 预设，命令行值优先。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/generate.rs`

use super::readback::PvArgs;
use crate::models::RegionParams;

use clap::Args;
use std::path::PathBuf;

/// 解析 "start:stop:step" 形式的区间参数
pub fn parse_region(s: &str) -> Result<RegionParams, String> {
    let parts: Vec<&str> = s.split(':').collect();
    if parts.len() != 3 {
        return Err(format!(
            "Invalid region '{}'. Use 'start:stop:step' (e.g., 150:30:5)",
            s
        ));
    }

    let parse = |value: &str, name: &str| {
        value
            .trim()
            .parse::<f64>()
            .map_err(|_| format!("Invalid {} value '{}' in region '{}'", name, value, s))
    };

    Ok(RegionParams::new(
        parse(parts[0], "start")?,
        parse(parts[1], "stop")?,
        parse(parts[2], "step")?,
    ))
}

/// generate 子命令参数
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Output scan table file (';'-separated)
    #[arg(short, long)]
    pub output: PathBuf,

    /// TOML preset with scan parameters (command-line values override it)
    #[arg(short, long)]
    pub preset: Option<PathBuf>,

    /// Absorption edge energy E0 in eV
    #[arg(long, allow_negative_numbers = true)]
    pub e0: Option<f64>,

    // ─────────────────────────────────────────────────────────────
    // 扫描区间
    // ─────────────────────────────────────────────────────────────
    /// Pre-edge region 'start:stop:step', start/stop in eV below E0
    #[arg(long, value_parser = parse_region, allow_hyphen_values = true)]
    pub pre: Option<RegionParams>,

    /// XANES 1 region 'start:stop:step', start in eV below E0, stop in eV above E0
    #[arg(long, value_parser = parse_region, allow_hyphen_values = true)]
    pub xanes1: Option<RegionParams>,

    /// XANES 2 region 'start:stop:step', start/stop in eV above E0
    #[arg(long, value_parser = parse_region, allow_hyphen_values = true)]
    pub xanes2: Option<RegionParams>,

    /// EXAFS region 'start:stop:step' in k-space (1/Å), e.g. 3.67:12:0.05
    #[arg(long, value_parser = parse_region, allow_hyphen_values = true)]
    pub exafs: Option<RegionParams>,

    // ─────────────────────────────────────────────────────────────
    // 标定
    // ─────────────────────────────────────────────────────────────
    /// Calibration offset, used directly instead of y2/theta readings
    #[arg(long, conflicts_with_all = ["y2", "theta"], allow_negative_numbers = true)]
    pub offset: Option<f64>,

    /// DCM y2 reading in mm
    #[arg(long, requires = "theta", allow_hyphen_values = true)]
    pub y2: Option<f64>,

    /// DCM theta reading in degrees
    #[arg(long, requires = "y2", allow_hyphen_values = true)]
    pub theta: Option<f64>,

    // 未给出 offset 或读数时，从过程变量实时读取
    #[command(flatten)]
    pub pv: PvArgs,

    /// Product hc in keV·nm
    #[arg(long)]
    pub hc: Option<f64>,

    /// Monochromator crystal d-spacing in nm
    #[arg(long)]
    pub d_spacing: Option<f64>,

    // ─────────────────────────────────────────────────────────────
    // 输出
    // ─────────────────────────────────────────────────────────────
    /// Header label of the energy column
    #[arg(long, env = "XAFS_ENERGY_LABEL")]
    pub energy_label: Option<String>,

    /// Header label of the position column
    #[arg(long, env = "XAFS_POSITION_LABEL")]
    pub position_label: Option<String>,

    /// Also plot energy vs. position (PNG, or SVG by extension)
    #[arg(long)]
    pub plot: Option<PathBuf>,

    /// Plot width in pixels
    #[arg(long, default_value_t = 1200)]
    pub width: u32,

    /// Plot height in pixels
    #[arg(long, default_value_t = 800)]
    pub height: u32,

    /// Number of table rows to preview in the terminal (0 = none)
    #[arg(long, default_value_t = 10)]
    pub preview: usize,

    /// Fail instead of warning when regions overlap or run backwards
    #[arg(long, default_value_t = false)]
    pub strict: bool,

    /// Overwrite existing output files
    #[arg(long, default_value_t = false)]
    pub overwrite: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_region() {
        assert_eq!(
            parse_region("150:30:5").unwrap(),
            RegionParams::new(150.0, 30.0, 5.0)
        );
        assert_eq!(
            parse_region(" 3.67 : 12 : 0.05 ").unwrap(),
            RegionParams::new(3.67, 12.0, 0.05)
        );
        assert_eq!(
            parse_region("10:0:-2.5").unwrap(),
            RegionParams::new(10.0, 0.0, -2.5)
        );
    }

    #[test]
    fn test_parse_region_errors() {
        assert!(parse_region("150:30").is_err());
        assert!(parse_region("150:30:5:1").is_err());
        assert!(parse_region("a:30:5").unwrap_err().contains("start"));
    }
}
