//! # Subprocess Capture Module / 子进程捕获模块
//!
//! Thin wrapper around `tokio::process` used by the execution engine and
//! the kernel registration glue: spawn a command, drain stdout and stderr
//! concurrently, and hand the combined output back so failures can be
//! reported with detail.
//!
//! 执行引擎和内核注册胶水代码使用的 `tokio::process` 轻量封装：
//! 派生一个命令，并发读取 stdout 和 stderr，
//! 并返回合并后的输出，以便在失败时报告细节。

use std::process::{ExitStatus, Stdio};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};

/// Spawns a command and captures its stdout and stderr.
///
/// # Returns
/// A tuple containing:
/// - The `ExitStatus` of the process wrapped in an `io::Result`.
/// - The captured output as a `String` (stdout first, then stderr).
///
/// 派生一个命令并捕获其 stdout 和 stderr。
///
/// # Returns
/// 一个元组，包含：
/// - 进程的 `ExitStatus`（包装在 `io::Result` 中）。
/// - 捕获的输出字符串（先 stdout，后 stderr）。
pub async fn spawn_and_capture(
    mut cmd: tokio::process::Command,
) -> (std::io::Result<ExitStatus>, String) {
    let mut child = match cmd
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
    {
        Ok(child) => child,
        Err(e) => {
            // If spawning fails, there is no output to report.
            // 如果派生失败，则没有输出可报告。
            return (Err(e), String::new());
        }
    };

    let stdout = child.stdout.take();
    let stderr = child.stderr.take();

    // Both pipes are drained while waiting, so a chatty child cannot
    // deadlock on a full pipe buffer.
    // 在等待的同时读空两个管道，这样输出多的子进程不会因管道缓冲区
    // 填满而死锁。
    let (status, out, err) = tokio::join!(child.wait(), drain(stdout), drain(stderr));
    (status, format!("{}{}", out, err))
}

async fn drain<R: AsyncRead + Unpin>(pipe: Option<R>) -> String {
    let Some(pipe) = pipe else {
        return String::new();
    };
    let mut lines = BufReader::new(pipe).lines();
    let mut output = String::new();
    while let Ok(Some(line)) = lines.next_line().await {
        output.push_str(&line);
        output.push('\n');
    }
    output
}

/// Keeps only the last `max_lines` lines of a command's output. Jupyter
/// prints the interesting part (the traceback) at the end, so the tail is
/// what belongs in an error report.
///
/// 仅保留命令输出的最后 `max_lines` 行。Jupyter 会把关键信息
/// （traceback）打印在末尾，因此错误报告中应包含的是尾部。
pub fn tail_lines(raw_output: &str, max_lines: usize) -> String {
    let lines: Vec<&str> = raw_output.lines().collect();
    if lines.len() <= max_lines {
        raw_output.trim_end().to_string()
    } else {
        lines[lines.len() - max_lines..].join("\n")
    }
}
