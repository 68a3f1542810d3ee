//! # 扫描表导出
//!
//! 写出束线控制软件读取的分号分隔文本文件。
//!
//! ## 文件格式
//! ```text
//! Energy;DCM_Y2
//! 8.8290;6.4158
//! 8.8340;6.4160
//! ```
//! - 首行为表头，不带注释前缀
//! - 数据行均保留 4 位小数
//!
//! ## 依赖关系
//! - 被 `commands/generate.rs`, `commands/batch.rs` 调用
//! - 使用 `models/table.rs` 的 ScanTableRow
//! - 使用 `csv` 库写入数据行

use crate::error::{Result, XafsError};
use crate::models::ScanTableRow;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// 字段分隔符
pub const DELIMITER: u8 = b';';

/// 写出扫描表
pub fn write_table(output_path: &Path, header: &str, rows: &[ScanTableRow]) -> Result<()> {
    let write_error = |e: std::io::Error| XafsError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    };

    let file = File::create(output_path).map_err(write_error)?;
    let mut writer = BufWriter::new(file);
    writeln!(writer, "{}", header).map_err(write_error)?;

    let mut wtr = csv::WriterBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    for row in rows {
        wtr.write_record(&[
            format!("{:.4}", row.energy_kev),
            format!("{:.4}", row.position),
        ])?;
    }

    wtr.flush().map_err(write_error)?;

    Ok(())
}
