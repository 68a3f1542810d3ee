//! # DCM Bragg 几何
//!
//! 能量到单色器第二晶体位置的换算。
//!
//! ## 公式
//! - Bragg 条件: sin(θ) = λ / (2d)，λ (nm) = hc / E (keV)
//! - 位置: y2 = offset / (2 cos θ)
//! - 标定偏移量: offset = 2 · y2 · cos(θ_readback)
//!
//! ## 依赖关系
//! - 被 `scan/builder.rs` 调用
//! - 被 `models/params.rs` 用于计算标定偏移量

use crate::error::{Result, XafsError};

use serde::Deserialize;

/// hc 乘积 (keV·nm)
pub const DEFAULT_HC: f64 = 1.239842;

/// 单色器晶体面间距 d (nm)
pub const DEFAULT_D_SPACING: f64 = 0.31356;

/// DCM 几何常数
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct DcmGeometry {
    /// hc 乘积 (keV·nm)
    pub hc: f64,
    /// 晶体面间距 (nm)
    pub d_spacing: f64,
}

impl Default for DcmGeometry {
    fn default() -> Self {
        DcmGeometry {
            hc: DEFAULT_HC,
            d_spacing: DEFAULT_D_SPACING,
        }
    }
}

impl DcmGeometry {
    /// 创建几何常数，两者都必须为正的有限值
    pub fn new(hc: f64, d_spacing: f64) -> Result<Self> {
        if !(hc.is_finite() && hc > 0.0) {
            return Err(XafsError::InvalidArgument(format!(
                "hc must be positive, got {}",
                hc
            )));
        }
        if !(d_spacing.is_finite() && d_spacing > 0.0) {
            return Err(XafsError::InvalidArgument(format!(
                "d-spacing must be positive, got {}",
                d_spacing
            )));
        }
        Ok(DcmGeometry { hc, d_spacing })
    }

    /// 计算 asin 的参数 λ/(2d)
    pub fn bragg_sine(&self, energy_ev: f64) -> Result<f64> {
        if energy_ev == 0.0 {
            return Err(XafsError::DivisionByZero {
                context: "Bragg angle requested for 0 eV".to_string(),
            });
        }
        Ok(self.hc / (2.0 * self.d_spacing) / energy_ev * 1000.0)
    }

    /// Bragg 角（弧度）
    pub fn bragg_angle(&self, energy_ev: f64) -> Result<f64> {
        let argument = self.bragg_sine(energy_ev)?;
        // NaN 也在这里被拒绝
        if !(argument.abs() <= 1.0) {
            return Err(XafsError::Domain {
                energy: energy_ev,
                argument,
            });
        }
        Ok(argument.asin())
    }
}

/// 由 y2 (mm) 与 theta (度) 读数计算标定偏移量
pub fn calibration_offset(y2: f64, theta_deg: f64) -> f64 {
    y2 * 2.0 * theta_deg.to_radians().cos()
}

/// 能量 (eV) 对应的 DCM 第二晶体位置
pub fn energy_to_motor_position(geometry: &DcmGeometry, energy_ev: f64, offset: f64) -> Result<f64> {
    let theta = geometry.bragg_angle(energy_ev)?;
    Ok(offset / (2.0 * theta.cos()))
}
