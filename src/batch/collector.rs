//! # 文件收集器
//!
//! 根据输入目录和 glob 模式收集待处理的预设文件。
//!
//! ## 功能
//! - 逗号分隔的多个 glob 模式
//! - 可选递归目录搜索
//! - 结果按路径排序，保证批处理顺序稳定
//!
//! ## 依赖关系
//! - 被 `commands/batch.rs` 调用
//! - 使用 `walkdir` 遍历目录，`glob` 匹配文件名

use crate::error::{Result, XafsError};

use glob::Pattern;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 文件收集器
pub struct FileCollector {
    /// 输入目录
    input: PathBuf,
    /// 匹配模式列表
    patterns: Vec<Pattern>,
    /// 是否递归
    recursive: bool,
}

impl FileCollector {
    /// 创建新的文件收集器，默认匹配所有文件
    pub fn new(input: PathBuf) -> Self {
        Self {
            input,
            patterns: Vec::new(),
            recursive: false,
        }
    }

    /// 设置匹配模式（逗号分隔的多模式）
    pub fn with_pattern(mut self, pattern: &str) -> Result<Self> {
        self.patterns = pattern
            .split(',')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|s| {
                Pattern::new(s).map_err(|e| {
                    XafsError::InvalidArgument(format!("Invalid pattern '{}': {}", s, e))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(self)
    }

    /// 设置是否递归搜索
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// 收集所有匹配的文件
    pub fn collect(&self) -> Vec<PathBuf> {
        if self.input.is_file() {
            return vec![self.input.clone()];
        }

        if !self.input.is_dir() {
            return vec![];
        }

        let max_depth = if self.recursive { usize::MAX } else { 1 };

        let mut files: Vec<PathBuf> = WalkDir::new(&self.input)
            .max_depth(max_depth)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|entry| self.matches_patterns(entry.path()))
            .map(|e| e.path().to_path_buf())
            .collect();

        files.sort();
        files
    }

    /// 检查文件名是否匹配任一模式
    fn matches_patterns(&self, path: &Path) -> bool {
        let filename = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name,
            None => return false,
        };

        self.patterns.is_empty() || self.patterns.iter().any(|p| p.matches(filename))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_pattern_matching() {
        let collector = FileCollector::new(PathBuf::from("."))
            .with_pattern("*.toml, cu_?.preset")
            .unwrap();

        assert!(collector.matches_patterns(Path::new("presets/fe_k.toml")));
        assert!(collector.matches_patterns(Path::new("cu_k.preset")));
        assert!(!collector.matches_patterns(Path::new("cu_kb.preset")));
        assert!(!collector.matches_patterns(Path::new("fe_k.csv")));
    }

    #[test]
    fn test_invalid_pattern() {
        let result = FileCollector::new(PathBuf::from(".")).with_pattern("[*.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_collect_directory() {
        let dir = std::env::temp_dir().join(format!("xafs_table_collect_{}", std::process::id()));
        let nested = dir.join("nested");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.join("b.toml"), "").unwrap();
        fs::write(dir.join("a.toml"), "").unwrap();
        fs::write(dir.join("notes.txt"), "").unwrap();
        fs::write(nested.join("c.toml"), "").unwrap();

        let flat = FileCollector::new(dir.clone())
            .with_pattern("*.toml")
            .unwrap()
            .collect();
        let deep = FileCollector::new(dir.clone())
            .with_pattern("*.toml")
            .unwrap()
            .recursive(true)
            .collect();
        let _ = fs::remove_dir_all(&dir);

        assert_eq!(flat, vec![dir.join("a.toml"), dir.join("b.toml")]);
        assert_eq!(deep.len(), 3);
    }
}
