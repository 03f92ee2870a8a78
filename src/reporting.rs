//! # Reporting Module / 报告模块
//!
//! This module handles all console output of the runner: colored status
//! lines for each notebook and rendered unified diffs for mismatching
//! cell output, with internationalization support.
//!
//! 此模块处理运行器的所有控制台输出：每个 notebook 的彩色状态行，
//! 以及输出不匹配时渲染的统一差异，支持国际化。

pub mod console;
pub mod diff;

// Re-export common reporting functions
pub use diff::{print_diff, render_diff};
