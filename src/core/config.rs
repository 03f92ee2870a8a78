//! # Sidecar Config Module / 附属配置模块
//!
//! Per-directory runner settings, loaded from an optional `.nbtest.yml`
//! next to the notebooks it applies to.
//!
//! 针对单个目录的运行器设置，从 notebook 旁边可选的
//! `.nbtest.yml` 文件加载。

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

use crate::core::masking::MaskSet;
use crate::infra::t;

/// Name of the sidecar config file looked up in the notebook's directory.
/// 在 notebook 目录中查找的附属配置文件名。
pub const CONFIG_FILE_NAME: &str = ".nbtest.yml";

/// Settings that apply to every notebook in one directory.
/// 应用于一个目录中所有 notebook 的设置。
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct NbtestConfig {
    /// An ordered list of regular expressions masked out of cell output
    /// before comparison. Defaults to empty.
    /// 一组有序的正则表达式，在比较之前从单元输出中被掩码掉。
    /// 默认为空。
    #[serde(default)]
    pub masks: Vec<String>,
}

impl NbtestConfig {
    /// Loads the config for a notebook directory. A missing file yields the
    /// defaults; an unreadable or unparsable file is an error.
    ///
    /// 加载 notebook 目录的配置。文件缺失时返回默认值；
    /// 无法读取或无法解析的文件是错误。
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE_NAME);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(e)
                    .with_context(|| t!("io.read_failed", path = path.display()).to_string());
            }
        };
        serde_yaml::from_str(&raw)
            .with_context(|| t!("io.parse_failed", path = path.display()).to_string())
    }

    /// Compiles the configured mask patterns.
    /// 编译配置的掩码模式。
    pub fn compile_masks(&self) -> Result<MaskSet> {
        MaskSet::compile(&self.masks)
    }
}
