//! # Diff Rendering Module / 差异渲染模块
//!
//! Renders the line-based unified diff between a cell's recorded output and
//! the output generated by the current run.
//!
//! 渲染单元记录输出与本次运行生成输出之间基于行的统一差异。

use colored::*;
use similar::TextDiff;

/// Context lines shown around each change, the conventional unified-diff
/// radius.
const CONTEXT_RADIUS: usize = 3;

/// Renders a unified diff between the two texts. Equal inputs render as an
/// empty string.
///
/// 渲染两段文本之间的统一差异。相等的输入渲染为空字符串。
pub fn render_diff(expected: &str, actual: &str) -> String {
    TextDiff::from_lines(expected, actual)
        .unified_diff()
        .context_radius(CONTEXT_RADIUS)
        .missing_newline_hint(false)
        .header("recorded", "current")
        .to_string()
}

/// Prints the diff as a colored block: removals red, additions green, hunk
/// headers cyan.
///
/// 以彩色块打印差异：删除为红色，新增为绿色，块头为青色。
pub fn print_diff(expected: &str, actual: &str) {
    for line in render_diff(expected, actual).lines() {
        if line.starts_with("---") || line.starts_with("+++") {
            println!("{}", line.bold());
        } else if line.starts_with("@@") {
            println!("{}", line.cyan());
        } else if line.starts_with('-') {
            println!("{}", line.red());
        } else if line.starts_with('+') {
            println!("{}", line.green());
        } else {
            println!("{}", line);
        }
    }
}
