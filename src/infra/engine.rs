//! # Execution Engine Module / 执行引擎模块
//!
//! The runner never executes notebook code itself; it hands the document to
//! an execution engine that runs every code cell in order against a named
//! kernel and populates the cells' output records. The production engine
//! shells out to `jupyter nbconvert`; tests substitute a scripted one
//! through the `ExecutionEngine` seam.
//!
//! 运行器自身从不执行 notebook 代码；它将文档交给一个执行引擎，
//! 由其针对命名内核按顺序运行每个代码单元并填充单元的输出记录。
//! 生产引擎调用 `jupyter nbconvert`；测试通过 `ExecutionEngine`
//! 接缝替换为脚本化的引擎。

use anyhow::{Context, Result, bail};
use std::future::Future;
use std::path::Path;
use std::time::Duration;

use crate::core::notebook::Notebook;
use crate::infra::command::{spawn_and_capture, tail_lines};
use crate::infra::t;

/// Fixed wall-clock budget for one notebook execution. A run that exceeds
/// it is an execution failure.
/// 单次 notebook 执行的固定时钟预算。超出即为执行失败。
pub const EXECUTION_TIMEOUT: Duration = Duration::from_secs(600);

/// How many trailing output lines to keep in an execution error report.
const ERROR_TAIL_LINES: usize = 40;

/// Environment for every spawned jupyter process. Suppresses the warnings
/// jupyter emits on startup.
/// 每个派生的 jupyter 进程的环境。抑制 jupyter 启动时发出的警告。
pub(crate) const JUPYTER_ENV: [(&str, &str); 2] = [
    ("JUPYTER_PLATFORM_DIRS", "1"),
    ("PYDEVD_DISABLE_FILE_VALIDATION", "1"),
];

/// The external collaborator that executes a notebook's code cells in order
/// and fills in their output records, mutating the document in place.
///
/// 外部协作者：按顺序执行 notebook 的代码单元并填充其输出记录，
/// 就地修改文档。
pub trait ExecutionEngine {
    fn execute(
        &self,
        notebook: &mut Notebook,
        workdir: &Path,
    ) -> impl Future<Output = Result<()>>;
}

/// The directory a notebook executes in. Relative paths inside the notebook
/// resolve against its own directory.
/// notebook 执行所在的目录。notebook 内的相对路径以其自身目录解析。
pub fn workdir_for(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// Executes notebooks by round-tripping them through `jupyter nbconvert`.
///
/// The working document is written to a scratch `.ipynb` beside the
/// original, executed in place, and read back. The timeout is enforced
/// twice: per cell by nbconvert and for the whole process here; the spawned
/// process is `kill_on_drop`, so an expired timeout also reaps it.
///
/// 通过 `jupyter nbconvert` 往返执行 notebook。
///
/// 工作文档被写入原始文件旁边的临时 `.ipynb`，就地执行后再读回。
/// 超时强制执行两次：nbconvert 按单元执行，这里对整个进程执行；
/// 派生的进程是 `kill_on_drop` 的，因此超时到期也会回收它。
pub struct JupyterEngine {
    kernel_name: String,
    timeout: Duration,
}

impl JupyterEngine {
    pub fn new(kernel_name: &str) -> Self {
        Self {
            kernel_name: kernel_name.to_string(),
            timeout: EXECUTION_TIMEOUT,
        }
    }
}

impl ExecutionEngine for JupyterEngine {
    async fn execute(&self, notebook: &mut Notebook, workdir: &Path) -> Result<()> {
        let scratch = tempfile::Builder::new()
            .prefix("_nbtest_exec_")
            .suffix(".ipynb")
            .tempfile_in(workdir)
            .context("failed to create a scratch notebook")?;
        notebook.write(scratch.path())?;

        let mut cmd = tokio::process::Command::new("jupyter");
        cmd.args(["nbconvert", "--to", "notebook", "--execute", "--inplace"])
            .arg(format!(
                "--ExecutePreprocessor.kernel_name={}",
                self.kernel_name
            ))
            .arg(format!(
                "--ExecutePreprocessor.timeout={}",
                self.timeout.as_secs()
            ))
            .arg(scratch.path())
            .current_dir(workdir)
            .envs(JUPYTER_ENV)
            .kill_on_drop(true);

        let (status_res, output) =
            match tokio::time::timeout(self.timeout, spawn_and_capture(cmd)).await {
                Ok(captured) => captured,
                Err(_) => bail!(t!("engine.timeout", secs = self.timeout.as_secs()).to_string()),
            };
        let status = status_res.with_context(|| t!("engine.launch_failed").to_string())?;
        if !status.success() {
            bail!(
                "{}\n{}",
                t!("engine.exited", status = status),
                tail_lines(&output, ERROR_TAIL_LINES)
            );
        }

        let executed = Notebook::read(scratch.path())?.with_context(|| {
            t!("engine.reread_failed", path = scratch.path().display()).to_string()
        })?;
        *notebook = executed;
        Ok(())
    }
}
