//! # Environment File Module / 环境文件模块
//!
//! Loads `KEY=VALUE` pairs from the configured env file into the process
//! environment before any notebook runs, so notebooks and their kernels see
//! the same variables the committed outputs were recorded with.
//!
//! 在任何 notebook 运行之前，将配置的环境文件中的 `KEY=VALUE`
//! 对加载到进程环境中，使 notebook 及其内核看到与记录输出时
//! 相同的变量。

use anyhow::{Context, Result};
use std::io;
use std::path::Path;

use crate::infra::t;

/// Loads the env file at `path`. A missing file is not an error, matching
/// the default of an optional `.env` in the working directory.
///
/// 加载位于 `path` 的环境文件。文件缺失不是错误，
/// 与工作目录中可选的 `.env` 的默认行为一致。
pub fn load_env_file(path: &Path) -> Result<()> {
    match dotenvy::from_path(path) {
        Ok(()) => Ok(()),
        Err(dotenvy::Error::Io(e)) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => {
            Err(e).with_context(|| t!("env.load_failed", path = path.display()).to_string())
        }
    }
}
