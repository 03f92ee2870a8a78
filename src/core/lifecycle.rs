//! # Lifecycle Notebook Module / 生命周期 Notebook 模块
//!
//! Setup and teardown notebooks are auxiliary notebooks executed before and
//! after a target notebook. Two names are tried per stage: a directory-global
//! one and one scoped to the target's filename. Each code cell receives the
//! runner context as a `NBTEST` binding on its first line, so lifecycle code
//! knows which notebook it is preparing for.
//!
//! setup 和 teardown notebook 是在目标 notebook 之前和之后执行的辅助
//! notebook。每个阶段尝试两个名称：一个目录全局的，一个针对目标文件名的。
//! 每个代码单元的第一行都会收到作为 `NBTEST` 绑定的运行器上下文，
//! 这样生命周期代码就知道它在为哪个 notebook 做准备。

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::core::notebook::{MultilineText, Notebook};
use crate::core::runner::NotebookStatus;
use crate::infra::engine::{ExecutionEngine, workdir_for};
use crate::reporting::console;

/// Filename prefix shared by all lifecycle notebooks. Paths with this prefix
/// are never treated as test targets.
/// 所有生命周期 notebook 共享的文件名前缀。带有此前缀的路径
/// 永远不会被当作测试目标。
pub const LIFECYCLE_PREFIX: &str = "_nbtest";

/// Name of the variable bound at the top of every executed lifecycle code cell.
/// 绑定在每个被执行的生命周期代码单元顶部的变量名。
pub const CONTEXT_VARIABLE: &str = "NBTEST";

/// The context mapping injected into lifecycle notebooks, rendered as a
/// Python dict literal so the executing code can read it directly.
///
/// 注入生命周期 notebook 的上下文映射，渲染为 Python 字典字面量，
/// 以便执行中的代码可以直接读取它。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InjectContext {
    entries: BTreeMap<String, String>,
}

impl InjectContext {
    /// The context used for a target notebook: `{'notebook': <filename>}`.
    /// 用于目标 notebook 的上下文：`{'notebook': <filename>}`。
    pub fn for_notebook(name: &str) -> Self {
        let mut entries = BTreeMap::new();
        entries.insert("notebook".to_string(), name.to_string());
        Self { entries }
    }

    /// Renders the mapping as a Python dict literal, e.g.
    /// `{'notebook': 'success.ipynb'}`. Quotes and backslashes in values
    /// are escaped.
    ///
    /// 将映射渲染为 Python 字典字面量，例如
    /// `{'notebook': 'success.ipynb'}`。值中的引号和反斜杠会被转义。
    pub fn to_python_literal(&self) -> String {
        let entries = self
            .entries
            .iter()
            .map(|(key, value)| format!("'{}': '{}'", escape(key), escape(value)))
            .collect::<Vec<_>>()
            .join(", ");
        format!("{{{}}}", entries)
    }
}

fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

/// Prefixes every code cell's source with the context assignment, making
/// `NBTEST` an in-scope binding for the executing code.
///
/// 在每个代码单元的源代码前加上上下文赋值，
/// 使 `NBTEST` 成为执行代码中的一个可见绑定。
pub fn bind_context(notebook: &mut Notebook, context: &InjectContext) {
    let assignment = format!("{} = {}", CONTEXT_VARIABLE, context.to_python_literal());
    for cell in notebook.cells.iter_mut().filter(|cell| cell.is_code()) {
        let source = cell.source.to_text();
        cell.source = MultilineText::Single(format!("{}\n{}", assignment, source));
    }
}

/// The setup notebooks tried for a target, directory-global first.
/// 为目标尝试的 setup notebook，目录全局的优先。
pub fn setup_paths(dir: &Path, target_name: &str) -> [PathBuf; 2] {
    [
        dir.join(format!("{}.setup.ipynb", LIFECYCLE_PREFIX)),
        dir.join(format!("{}.setup.{}", LIFECYCLE_PREFIX, target_name)),
    ]
}

/// The teardown notebooks tried for a target. The target-specific one runs
/// first so teardown unwinds in the reverse nesting order of setup.
/// 为目标尝试的 teardown notebook。针对目标的先运行，
/// 这样 teardown 以 setup 的相反嵌套顺序展开。
pub fn teardown_paths(dir: &Path, target_name: &str) -> [PathBuf; 2] {
    [
        dir.join(format!("{}.teardown.{}", LIFECYCLE_PREFIX, target_name)),
        dir.join(format!("{}.teardown.ipynb", LIFECYCLE_PREFIX)),
    ]
}

/// Runs a batch of lifecycle notebooks in order. A missing file is silently
/// skipped; the first file that fails to parse or execute is reported and
/// aborts the remaining batch.
///
/// 按顺序运行一批生命周期 notebook。缺失的文件被静默跳过；
/// 第一个解析或执行失败的文件会被报告并中止批处理中的其余文件。
pub async fn run_notebooks<E: ExecutionEngine>(
    engine: &E,
    paths: &[PathBuf],
    context: &InjectContext,
) -> NotebookStatus {
    for path in paths {
        let mut notebook = match Notebook::read(path) {
            Ok(Some(notebook)) => notebook,
            Ok(None) => continue,
            Err(e) => {
                console::print_lifecycle_failure(path, &e);
                return NotebookStatus::Failed;
            }
        };
        bind_context(&mut notebook, context);
        if let Err(e) = engine.execute(&mut notebook, workdir_for(path)).await {
            console::print_lifecycle_failure(path, &e);
            return NotebookStatus::Failed;
        }
    }
    NotebookStatus::Passed
}
