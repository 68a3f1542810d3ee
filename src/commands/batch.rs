//! # batch 命令实现
//!
//! 为目录中的每个 TOML 预设生成一个扫描表，输出为 `<预设名>.csv`。
//!
//! ## 功能
//! - 并行计算（rayon）
//! - 已存在的输出默认跳过
//! - 失败文件汇总报告，不影响其他预设
//!
//! ## 依赖关系
//! - 使用 `cli/batch.rs` 定义的 BatchArgs
//! - 使用 `batch/` 模块进行批量处理
//! - 使用 `commands/generate.rs` 的计算与检查流程

use super::generate::build_checked;
use crate::batch::{BatchRunner, FileCollector, ProcessResult};
use crate::cli::batch::BatchArgs;
use crate::error::{Result, XafsError};
use crate::models::ScanPreset;
use crate::scan;
use crate::utils::output;

use std::fs;
use std::path::{Path, PathBuf};

/// 批量处理配置
struct BatchConfig {
    output_dir: PathBuf,
    strict: bool,
    overwrite: bool,
}

/// 执行 batch 命令
pub fn execute(args: BatchArgs) -> Result<()> {
    output::print_header("Batch Scan Table Generation");

    if !args.input.is_dir() {
        return Err(XafsError::DirectoryNotFound {
            path: args.input.display().to_string(),
        });
    }

    let files = FileCollector::new(args.input.clone())
        .with_pattern(&args.pattern)?
        .recursive(args.recursive)
        .collect();

    if files.is_empty() {
        output::print_warning(&format!(
            "No matching files found with pattern '{}'",
            args.pattern
        ));
        return Ok(());
    }

    output::print_info(&format!("Found {} preset files", files.len()));

    // 确保输出目录存在
    fs::create_dir_all(&args.output).map_err(|e| XafsError::FileWriteError {
        path: args.output.display().to_string(),
        source: e,
    })?;

    let config = BatchConfig {
        output_dir: args.output.clone(),
        strict: args.strict,
        overwrite: args.overwrite,
    };

    let runner = BatchRunner::new(args.jobs);
    let result = runner.run(files, |file| process_preset_file(file, &config))?;

    // 打印统计
    output::print_separator();
    for reason in result.skip_reasons.iter().take(10) {
        output::print_skip(reason);
    }
    output::print_done(&format!(
        "Batch complete ({} presets): {} success, {} skipped, {} failed",
        result.total(),
        result.success,
        result.skipped,
        result.failed
    ));

    if !result.failures.is_empty() {
        output::print_warning("Failed presets:");
        for (path, err) in result.failures.iter().take(10) {
            output::print_error(&format!("  {}: {}", path, err));
        }
        if result.failures.len() > 10 {
            output::print_warning(&format!("  ... and {} more", result.failures.len() - 10));
        }
    }

    Ok(())
}

/// 处理批量模式中的单个预设
fn process_preset_file(input: &PathBuf, config: &BatchConfig) -> ProcessResult {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("scan");
    let output_file = config.output_dir.join(format!("{}.csv", stem));

    if output_file.exists() && !config.overwrite {
        return ProcessResult::Skipped(format!(
            "Output exists, skipping: {}",
            output_file.display()
        ));
    }

    match generate_from_preset(input, &output_file, config.strict) {
        Ok(points) => ProcessResult::Success(format!(
            "{} -> {} ({} points)",
            input.display(),
            output_file.display(),
            points
        )),
        Err(e) => ProcessResult::Failed(input.display().to_string(), e.to_string()),
    }
}

/// 读取预设、计算并写出扫描表，返回点数
fn generate_from_preset(input: &Path, output: &Path, strict: bool) -> Result<usize> {
    let params = ScanPreset::load(input)?.resolve()?;
    let table = build_checked(&params, strict)?;
    scan::export::write_table(output, &params.labels.header(), &table.rows)?;
    Ok(table.rows.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRESET: &str = r#"
e0 = 8979.0

[labels]
energy = "Cu_K"
position = "y2"

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
offset = 25.0
"#;

    #[test]
    fn test_generate_from_preset() {
        let dir = std::env::temp_dir().join(format!("xafs_table_batch_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let preset = dir.join("cu_k.toml");
        let output = dir.join("cu_k.csv");
        fs::write(&preset, PRESET).unwrap();

        let points = generate_from_preset(&preset, &output, true).unwrap();
        let content = fs::read_to_string(&output).unwrap();

        let config = BatchConfig {
            output_dir: dir.clone(),
            strict: false,
            overwrite: false,
        };
        let second = process_preset_file(&preset, &config);
        let _ = fs::remove_dir_all(&dir);

        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "Cu_K;y2");
        assert_eq!(lines.len(), points + 1);
        assert!(lines[1].starts_with("8.8290;"));
        assert!(matches!(second, ProcessResult::Skipped(_)));
    }

    #[test]
    fn test_missing_calibration_fails_preset() {
        let dir = std::env::temp_dir().join(format!("xafs_table_batch_bad_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let preset = dir.join("bad.toml");
        fs::write(&preset, PRESET.replace("offset = 25.0", "")).unwrap();

        let config = BatchConfig {
            output_dir: dir.clone(),
            strict: false,
            overwrite: true,
        };
        let result = process_preset_file(&preset, &config);
        let _ = fs::remove_dir_all(&dir);

        match result {
            ProcessResult::Failed(_, err) => assert!(err.contains("calibration")),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
