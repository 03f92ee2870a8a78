//! # Kernel Registration Module / 内核注册模块
//!
//! Notebooks are executed against a dedicated test kernel so that the
//! runner never depends on whatever kernels a developer happens to have
//! installed. The kernelspec is registered once at process start and held
//! by a guard whose `Drop` deregisters it, so cleanup happens on every
//! exit path, including failures.
//!
//! notebook 针对一个专用的测试内核执行，这样运行器就不依赖开发者
//! 恰好安装了哪些内核。kernelspec 在进程启动时注册一次，
//! 由一个 guard 持有，其 `Drop` 负责注销，
//! 因此在包括失败在内的每条退出路径上都会进行清理。

use anyhow::{Context, Result, bail};
use std::fs;
use std::process::Command;

use crate::infra::engine::JUPYTER_ENV;
use crate::infra::t;

/// Name under which the test kernel is registered, shared by every
/// execution in the process.
/// 注册测试内核使用的名称，进程内的每次执行共享。
pub const TEST_KERNEL_NAME: &str = "python3-test";

/// Holds the registered kernelspec for the lifetime of a batch.
/// 在一次批处理的生命周期内持有已注册的 kernelspec。
#[derive(Debug)]
pub struct KernelGuard {
    name: String,
}

impl KernelGuard {
    /// Stages a `kernel.json` in a temporary directory and installs it as a
    /// user-level kernelspec under `name`.
    ///
    /// 在临时目录中暂存 `kernel.json`，并将其安装为名为 `name`
    /// 的用户级 kernelspec。
    pub fn register(name: &str) -> Result<Self> {
        let staging = tempfile::tempdir()
            .with_context(|| t!("kernel.staging_failed", name = name).to_string())?;
        let spec_dir = staging.path().join(name);
        fs::create_dir(&spec_dir)
            .with_context(|| t!("kernel.staging_failed", name = name).to_string())?;

        let spec = serde_json::json!({
            "argv": ["python3", "-m", "ipykernel_launcher", "-f", "{connection_file}"],
            "display_name": "Python 3 (nbtest)",
            "language": "python",
        });
        fs::write(spec_dir.join("kernel.json"), serde_json::to_vec_pretty(&spec)?)
            .with_context(|| t!("kernel.staging_failed", name = name).to_string())?;

        let output = Command::new("jupyter")
            .args(["kernelspec", "install", "--user", "--name", name])
            .arg(&spec_dir)
            .envs(JUPYTER_ENV)
            .output()
            .with_context(|| t!("engine.launch_failed").to_string())?;
        if !output.status.success() {
            bail!(
                "{}\n{}",
                t!("kernel.install_failed", name = name),
                String::from_utf8_lossy(&output.stderr).trim_end()
            );
        }

        Ok(Self {
            name: name.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Drop for KernelGuard {
    fn drop(&mut self) {
        // Best effort: deregistration must not panic during unwind, and a
        // stale kernelspec is only cosmetic.
        // 尽力而为：注销在栈展开期间不得 panic，
        // 而残留的 kernelspec 只是外观问题。
        let _ = Command::new("jupyter")
            .args(["kernelspec", "remove", "-f", &self.name])
            .envs(JUPYTER_ENV)
            .output();
    }
}
