// src/commands/run.rs

use anyhow::Result;
use std::path::PathBuf;

use crate::core::runner;
use crate::infra::engine::JupyterEngine;
use crate::infra::env;
use crate::infra::kernel::{KernelGuard, TEST_KERNEL_NAME};

/// Runs a batch of notebooks and returns the number of failing ones.
///
/// The environment file is loaded first so notebooks and lifecycle
/// notebooks see the configured variables. The test kernel is registered
/// for the whole batch and deregistered again when the guard drops, on
/// success and failure alike.
///
/// 运行一批 notebook 并返回失败的数量。
///
/// 首先加载环境文件，使 notebook 和生命周期 notebook 看到配置的
/// 变量。测试内核在整个批处理期间保持注册，并在 guard 被丢弃时
/// 重新注销，无论成功或失败。
pub async fn execute(notebooks: Vec<PathBuf>, env_file: PathBuf, verbose: bool) -> Result<i32> {
    env::load_env_file(&env_file)?;

    let kernel = KernelGuard::register(TEST_KERNEL_NAME)?;
    let engine = JupyterEngine::new(kernel.name());

    Ok(runner::run_batch(&engine, &notebooks, verbose).await)
}
