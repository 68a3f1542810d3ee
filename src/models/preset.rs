//! # 扫描参数预设
//!
//! TOML 格式的参数预设文件，所有字段可选，命令行参数逐项覆盖。
//!
//! ## 文件格式
//! ```toml
//! e0 = 11564.0
//!
//! [pre]
//! start = 150.0
//! stop = 30.0
//! step = 5.0
//!
//! [calibration]
//! y2 = 12.5
//! theta = 10.0
//! ```
//!
//! ## 依赖关系
//! - 被 `commands/generate.rs`, `commands/batch.rs` 使用
//! - 使用 `serde` + `toml` 反序列化

use crate::error::{Result, XafsError};
use crate::models::params::{Calibration, ScanParams, TableLabels};
use crate::models::region::RegionParams;
use crate::scan::geometry::DcmGeometry;

use serde::Deserialize;
use std::fs;
use std::path::Path;

/// 表头标签预设
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LabelsPreset {
    pub energy: Option<String>,
    pub position: Option<String>,
}

/// 标定预设（`offset` 或 `y2` + `theta`）
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CalibrationPreset {
    pub y2: Option<f64>,
    pub theta: Option<f64>,
    pub offset: Option<f64>,
}

impl CalibrationPreset {
    pub fn is_empty(&self) -> bool {
        self.y2.is_none() && self.theta.is_none() && self.offset.is_none()
    }

    fn resolve(&self) -> Result<Calibration> {
        if let Some(offset) = self.offset {
            return Ok(Calibration::Offset(offset));
        }
        match (self.y2, self.theta) {
            (Some(y2), Some(theta)) => Ok(Calibration::Readings { y2, theta }),
            (None, None) => Err(XafsError::InvalidArgument(
                "missing calibration: give an offset, y2 and theta, or the y2/theta PV names"
                    .to_string(),
            )),
            _ => Err(XafsError::InvalidArgument(
                "calibration needs both y2 and theta".to_string(),
            )),
        }
    }
}

impl From<Calibration> for CalibrationPreset {
    fn from(calibration: Calibration) -> Self {
        match calibration {
            Calibration::Readings { y2, theta } => CalibrationPreset {
                y2: Some(y2),
                theta: Some(theta),
                offset: None,
            },
            Calibration::Offset(offset) => CalibrationPreset {
                offset: Some(offset),
                ..Default::default()
            },
        }
    }
}

/// DCM 几何常数预设
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeometryPreset {
    pub hc: Option<f64>,
    pub d_spacing: Option<f64>,
}

/// 扫描参数预设
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScanPreset {
    pub e0: Option<f64>,
    #[serde(default)]
    pub labels: LabelsPreset,
    pub pre: Option<RegionParams>,
    pub xanes1: Option<RegionParams>,
    pub xanes2: Option<RegionParams>,
    pub exafs: Option<RegionParams>,
    #[serde(default)]
    pub calibration: CalibrationPreset,
    #[serde(default)]
    pub geometry: GeometryPreset,
}

impl ScanPreset {
    /// 从 TOML 文本解析（`origin` 仅用于错误信息）
    pub fn from_toml_str(content: &str, origin: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| XafsError::PresetParse {
            path: origin.to_string(),
            reason: e.to_string(),
        })
    }

    /// 读取预设文件
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(XafsError::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let content = fs::read_to_string(path).map_err(|e| XafsError::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_toml_str(&content, &path.display().to_string())
    }

    /// 合并预设，`overrides` 中已设置的字段优先。
    /// 标定作为整体替换，避免旧的 offset 掩盖新的读数。
    pub fn merge(self, overrides: ScanPreset) -> ScanPreset {
        ScanPreset {
            e0: overrides.e0.or(self.e0),
            labels: LabelsPreset {
                energy: overrides.labels.energy.or(self.labels.energy),
                position: overrides.labels.position.or(self.labels.position),
            },
            pre: overrides.pre.or(self.pre),
            xanes1: overrides.xanes1.or(self.xanes1),
            xanes2: overrides.xanes2.or(self.xanes2),
            exafs: overrides.exafs.or(self.exafs),
            calibration: if overrides.calibration.is_empty() {
                self.calibration
            } else {
                overrides.calibration
            },
            geometry: GeometryPreset {
                hc: overrides.geometry.hc.or(self.geometry.hc),
                d_spacing: overrides.geometry.d_spacing.or(self.geometry.d_spacing),
            },
        }
    }

    /// 生成不可变的扫描参数，缺失字段报错
    pub fn resolve(self) -> Result<ScanParams> {
        let e0 = required(self.e0, "e0")?;
        if !e0.is_finite() {
            return Err(XafsError::InvalidArgument(format!(
                "e0 must be a finite energy, got {}",
                e0
            )));
        }

        let defaults = DcmGeometry::default();
        let geometry = DcmGeometry::new(
            self.geometry.hc.unwrap_or(defaults.hc),
            self.geometry.d_spacing.unwrap_or(defaults.d_spacing),
        )?;

        let default_labels = TableLabels::default();

        Ok(ScanParams {
            e0,
            pre: required(self.pre, "pre")?,
            xanes1: required(self.xanes1, "xanes1")?,
            xanes2: required(self.xanes2, "xanes2")?,
            exafs: required(self.exafs, "exafs")?,
            calibration: self.calibration.resolve()?,
            geometry,
            labels: TableLabels {
                energy: self.labels.energy.unwrap_or(default_labels.energy),
                position: self.labels.position.unwrap_or(default_labels.position),
            },
        })
    }
}

fn required<T>(value: Option<T>, name: &str) -> Result<T> {
    value.ok_or_else(|| XafsError::InvalidArgument(format!("missing parameter '{}'", name)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRESET: &str = r#"
e0 = 11564.0

[labels]
energy = "Pt_L3"

[pre]
start = 150.0
stop = 30.0
step = 5.0

[xanes1]
start = 30.0
stop = 20.0
step = 0.5

[xanes2]
start = 20.0
stop = 50.0
step = 2.0

[exafs]
start = 3.67
stop = 12.0
step = 0.05

[calibration]
y2 = 12.5
theta = 10.0
"#;

    #[test]
    fn test_parse_and_resolve_preset() {
        let preset = ScanPreset::from_toml_str(PRESET, "test").unwrap();
        let params = preset.resolve().unwrap();

        assert_eq!(params.e0, 11564.0);
        assert_eq!(params.pre, RegionParams::new(150.0, 30.0, 5.0));
        assert_eq!(params.exafs.step, 0.05);
        assert_eq!(
            params.calibration,
            Calibration::Readings {
                y2: 12.5,
                theta: 10.0
            }
        );
        assert_eq!(params.labels.energy, "Pt_L3");
        assert_eq!(params.labels.position, "DCM_Y2");
        assert_eq!(params.geometry, DcmGeometry::default());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = ScanPreset::from_toml_str("e0 = 1.0\nbogus = 2.0\n", "bad.toml").unwrap_err();
        assert!(matches!(err, XafsError::PresetParse { .. }));
    }

    #[test]
    fn test_merge_overrides_win() {
        let base = ScanPreset::from_toml_str(PRESET, "test").unwrap();
        let overrides = ScanPreset {
            e0: Some(7112.0),
            calibration: CalibrationPreset {
                offset: Some(25.0),
                ..Default::default()
            },
            ..Default::default()
        };

        let params = base.merge(overrides).resolve().unwrap();
        assert_eq!(params.e0, 7112.0);
        assert_eq!(params.pre, RegionParams::new(150.0, 30.0, 5.0));
        assert_eq!(params.calibration, Calibration::Offset(25.0));
    }

    #[test]
    fn test_merge_readings_replace_preset_offset() {
        let base = ScanPreset {
            calibration: CalibrationPreset {
                offset: Some(25.0),
                ..Default::default()
            },
            ..Default::default()
        };
        let overrides = ScanPreset {
            calibration: CalibrationPreset {
                y2: Some(10.0),
                theta: Some(5.0),
                offset: None,
            },
            ..Default::default()
        };

        let merged = base.merge(overrides);
        assert_eq!(merged.calibration.offset, None);
        assert_eq!(merged.calibration.y2, Some(10.0));
    }

    #[test]
    fn test_missing_fields_reported() {
        let err = ScanPreset::default().resolve().unwrap_err();
        assert!(err.to_string().contains("e0"));

        let mut preset = ScanPreset::from_toml_str(PRESET, "test").unwrap();
        preset.calibration.theta = None;
        let err = preset.resolve().unwrap_err();
        assert!(err.to_string().contains("both y2 and theta"));
    }

    #[test]
    fn test_geometry_override() {
        let mut preset = ScanPreset::from_toml_str(PRESET, "test").unwrap();
        preset.geometry.d_spacing = Some(0.19201);
        let params = preset.resolve().unwrap();
        assert_eq!(params.geometry.d_spacing, 0.19201);
        assert_eq!(params.geometry.hc, DcmGeometry::default().hc);
    }
}
