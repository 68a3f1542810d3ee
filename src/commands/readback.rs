//! # readback 命令实现
//!
//! 读取 DCM 的 y2 与 theta 过程变量，显示由此得到的标定偏移量。
//!
//! ## 依赖关系
//! - 使用 `cli/readback.rs` 定义的参数
//! - 使用 `instrument/` 读取过程变量
//! - 使用 `utils/output.rs`, `utils/progress.rs`

use crate::cli::readback::{PvArgs, ReadbackArgs};
use crate::error::{Result, XafsError};
use crate::instrument::{self, CagetSource};
use crate::models::Calibration;
use crate::utils::{output, progress};

/// 执行 readback 命令
pub fn execute(args: ReadbackArgs) -> Result<()> {
    output::print_header("DCM Readback");

    let calibration = read_live_calibration(&args.pv)?;
    output::print_success(&format!(
        "Calibration offset: {:.6}",
        calibration.offset()
    ));

    Ok(())
}

/// 通过 caget 读取 y2/theta，两者都必须可读
pub(crate) fn read_live_calibration(pv: &PvArgs) -> Result<Calibration> {
    let (y2_pv, theta_pv) = pv.names().ok_or_else(|| {
        XafsError::InvalidArgument(
            "both --y2-pv and --theta-pv are required (or set XAFS_Y2_PV / XAFS_THETA_PV)"
                .to_string(),
        )
    })?;

    let source = CagetSource::new(pv.caget.as_str());
    let spinner = progress::create_spinner(&format!("Reading {} and {}", y2_pv, theta_pv));
    let result = instrument::read_calibration(&source, y2_pv, theta_pv);
    spinner.finish_and_clear();

    let calibration = result?;
    if let Calibration::Readings { y2, theta } = calibration {
        output::print_info(&format!("{} = {:.6} mm", y2_pv, y2));
        output::print_info(&format!("{} = {:.6}°", theta_pv, theta));
    }

    Ok(calibration)
}
