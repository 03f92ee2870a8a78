//! # Console Reporting Module / 控制台报告模块
//!
//! All user-facing status lines of a notebook run: the `Running ...`
//! progress line, per-notebook verdicts, lifecycle failures, and the
//! per-cell lines printed in verbose mode.
//!
//! notebook 运行的所有面向用户的状态行：`Running ...` 进度行、
//! 每个 notebook 的结论、生命周期失败，以及详细模式下打印的
//! 逐单元行。

use colored::*;
use std::io::{self, Write};
use std::path::Path;

use crate::infra::t;

/// Starts the progress line for a notebook. The verdict (`OK`, `Failed`,
/// `Not found`) is appended to the same line by a later call.
///
/// 开始一个 notebook 的进度行。结论（`OK`、`Failed`、`Not found`）
/// 由后续调用追加到同一行。
pub fn print_running(name: &str) {
    print!("{}", t!("run.running", name = name.yellow()));
    io::stdout().flush().ok();
}

pub fn print_passed() {
    println!("{}", t!("run.ok").green());
}

pub fn print_failed() {
    println!("{}", t!("run.failed").red());
}

pub fn print_not_found() {
    println!("{}", t!("run.not_found").red());
}

/// The detail line following a failure verdict, e.g. the execution engine's
/// error chain.
/// 失败结论之后的细节行，例如执行引擎的错误链。
pub fn print_error_detail(error: &anyhow::Error) {
    println!("{:#}", error);
}

/// Reports a failing lifecycle notebook and the error that stopped it.
/// 报告失败的生命周期 notebook 及导致其停止的错误。
pub fn print_lifecycle_failure(path: &Path, error: &anyhow::Error) {
    println!("{}", t!("run.lifecycle_failed", name = path.display()).red());
    print_error_detail(error);
}

pub fn print_stream_mismatch(cell: usize, stream: &str) {
    println!("{}", t!("cell.mismatch", cell = cell, stream = stream).red());
}

pub fn print_stream_ok(cell: usize, stream: &str) {
    println!("{}", t!("cell.ok", cell = cell, stream = stream).green());
}

pub fn print_stream_skipped(cell: usize, stream: &str) {
    println!("{}", t!("cell.stream_skipped", cell = cell, stream = stream).dimmed());
}

pub fn print_cell_skipped(cell: usize, kind: &str) {
    println!("{}", t!("cell.skipped", cell = cell, kind = kind).dimmed());
}
