//! # Notebook Test Runner Module / Notebook 测试运行器模块
//!
//! Orchestrates one notebook's full lifecycle as an ordered pipeline of
//! stages sharing a single status value: load config, run setup notebooks,
//! load the target, snapshot its recorded cells, execute, compare the
//! masked output of every code cell, and run teardown notebooks. The
//! status is fixed before teardown runs; a teardown failure is reported
//! but can no longer change it.
//!
//! 将一个 notebook 的完整生命周期编排为共享单一状态值的有序阶段
//! 管道：加载配置、运行 setup notebook、加载目标、对其记录的单元
//! 做快照、执行、比较每个代码单元经掩码处理的输出、运行 teardown
//! notebook。状态在 teardown 运行之前就已固定；teardown 的失败
//! 会被报告，但不能再改变它。

use std::path::{Path, PathBuf};

use crate::core::config::NbtestConfig;
use crate::core::lifecycle::{self, InjectContext, LIFECYCLE_PREFIX};
use crate::core::masking::MaskSet;
use crate::core::notebook::{Cell, Notebook};
use crate::infra::engine::{ExecutionEngine, workdir_for};
use crate::reporting::console;
use crate::reporting::diff;

/// The only stream names whose text is compared. Outputs on any other
/// stream name are skipped, never compared.
/// 只有这些流名称的文本会被比较。任何其他流名称上的输出
/// 都会被跳过，从不比较。
pub const COMPARED_STREAMS: [&str; 2] = ["stdout", "stderr"];

/// Placeholder name under which output records without a `name` are
/// collected. Not in the compared set, so such records are always skipped.
/// 收集没有 `name` 的输出记录所用的占位名称。
/// 不在比较集合中，因此此类记录总是被跳过。
const UNNAMED_STREAM: &str = "?";

/// The verdict for one notebook. The integer code feeds the summed batch
/// status.
/// 单个 notebook 的结论。整数代码用于累加批处理状态。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotebookStatus {
    Passed,
    Failed,
}

impl NotebookStatus {
    pub fn code(self) -> i32 {
        match self {
            NotebookStatus::Passed => 0,
            NotebookStatus::Failed => 1,
        }
    }

    pub fn is_failed(self) -> bool {
        self == NotebookStatus::Failed
    }
}

/// Runs one notebook and checks that its freshly generated output matches
/// the output recorded in the file.
///
/// 运行一个 notebook 并检查其新生成的输出与文件中记录的输出一致。
pub async fn run_one<E: ExecutionEngine>(
    engine: &E,
    path: &Path,
    verbose: bool,
) -> NotebookStatus {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let dir = workdir_for(path);

    console::print_running(&name);

    // Stage 1: per-directory mask config. A bad config fails the notebook
    // before any lifecycle code runs, so teardown is skipped.
    // 阶段 1：按目录的掩码配置。损坏的配置会在任何生命周期代码
    // 运行之前使该 notebook 失败，因此 teardown 被跳过。
    let masks = match NbtestConfig::load(dir).and_then(|config| config.compile_masks()) {
        Ok(masks) => masks,
        Err(e) => {
            console::print_failed();
            console::print_error_detail(&e);
            return NotebookStatus::Failed;
        }
    };

    // Stage 2: setup notebooks. A setup failure means the target is never
    // loaded or executed, and teardown is skipped as well.
    // 阶段 2：setup notebook。setup 失败意味着目标永远不会被加载
    // 或执行，teardown 也被跳过。
    let context = InjectContext::for_notebook(&name);
    let setup = lifecycle::setup_paths(dir, &name);
    if lifecycle::run_notebooks(engine, &setup, &context)
        .await
        .is_failed()
    {
        return NotebookStatus::Failed;
    }

    // Stage 3: load the target. A missing or unreadable target
    // short-circuits before execution, still without teardown.
    // 阶段 3：加载目标。目标缺失或不可读会在执行之前短路，
    // 同样不运行 teardown。
    let mut notebook = match Notebook::read(path) {
        Ok(Some(notebook)) => notebook,
        Ok(None) => {
            console::print_not_found();
            return NotebookStatus::Failed;
        }
        Err(e) => {
            console::print_failed();
            console::print_error_detail(&e);
            return NotebookStatus::Failed;
        }
    };

    // Stage 4: snapshot the recorded cells; execution mutates the working
    // document in place.
    // 阶段 4：对记录的单元做快照；执行会就地修改工作文档。
    let recorded_cells = notebook.cells.clone();

    // Stage 5: execute. An engine error or timeout fails the notebook and
    // skips comparison, but teardown still runs.
    // 阶段 5：执行。引擎错误或超时使 notebook 失败并跳过比较，
    // 但 teardown 仍会运行。
    let mut status = NotebookStatus::Passed;
    if let Err(e) = engine.execute(&mut notebook, dir).await {
        console::print_failed();
        console::print_error_detail(&e);
        status = NotebookStatus::Failed;
    }

    // Stage 6: compare recorded against generated output.
    // 阶段 6：比较记录的输出与生成的输出。
    if status == NotebookStatus::Passed {
        status = compare_cells(&recorded_cells, &notebook.cells, &masks, verbose);
        if status == NotebookStatus::Passed {
            console::print_passed();
        }
    }

    // Stage 7: teardown notebooks, target-specific first. The status is
    // already fixed; a teardown failure is reported inside the lifecycle
    // runner but cannot change the verdict.
    // 阶段 7：teardown notebook，针对目标的优先。状态已经固定；
    // teardown 失败会在生命周期运行器内部报告，但不能改变结论。
    let teardown = lifecycle::teardown_paths(dir, &name);
    let _ = lifecycle::run_notebooks(engine, &teardown, &context).await;

    status
}

/// Walks the recorded and executed cell sequences pairwise by position and
/// compares the masked text of every allow-listed output stream of every
/// code cell. Each mismatch prints a labeled diff; comparison continues
/// through the remaining cells and streams.
///
/// 按位置成对遍历记录的和已执行的单元序列，比较每个代码单元中
/// 每个允许列表内输出流经掩码处理的文本。每个不匹配都会打印带
/// 标签的差异；比较会继续处理剩余的单元和流。
pub fn compare_cells(
    recorded: &[Cell],
    current: &[Cell],
    masks: &MaskSet,
    verbose: bool,
) -> NotebookStatus {
    let mut status = NotebookStatus::Passed;
    for (index, (recorded_cell, current_cell)) in recorded.iter().zip(current.iter()).enumerate() {
        let cell_no = index + 1;
        if !recorded_cell.is_code() {
            if verbose {
                console::print_cell_skipped(cell_no, &recorded_cell.cell_type);
            }
            continue;
        }

        let recorded_streams = stream_texts(recorded_cell);
        let current_streams = stream_texts(current_cell);
        for (stream, recorded_text) in &recorded_streams {
            if !COMPARED_STREAMS.contains(&stream.as_str()) {
                if verbose {
                    console::print_stream_skipped(cell_no, stream);
                }
                continue;
            }
            let expected = masks.apply(recorded_text);
            let actual = masks.apply(stream_value(&current_streams, stream));
            if expected == actual {
                if verbose {
                    console::print_stream_ok(cell_no, stream);
                }
            } else {
                if status == NotebookStatus::Passed {
                    status = NotebookStatus::Failed;
                    console::print_failed();
                }
                console::print_stream_mismatch(cell_no, stream);
                diff::print_diff(&expected, &actual);
            }
        }
    }
    status
}

/// Runs a batch of notebooks sequentially and sums their status codes, so
/// the result reflects the count of failing notebooks. Paths whose filename
/// carries the lifecycle prefix are auxiliaries, not targets, and are
/// skipped.
///
/// 顺序运行一批 notebook 并累加它们的状态代码，
/// 因此结果反映失败 notebook 的数量。文件名带有生命周期前缀的
/// 路径是辅助文件而非目标，会被跳过。
pub async fn run_batch<E: ExecutionEngine>(
    engine: &E,
    notebooks: &[PathBuf],
    verbose: bool,
) -> i32 {
    let mut failures = 0;
    for path in notebooks {
        let is_auxiliary = path
            .file_name()
            .map(|name| name.to_string_lossy().starts_with(LIFECYCLE_PREFIX))
            .unwrap_or(false);
        if is_auxiliary {
            continue;
        }
        failures += run_one(engine, path, verbose).await.code();
    }
    failures
}

/// Collects a cell's output records as `(stream, text)` pairs with mapping
/// semantics: the first occurrence of a name fixes its position, the last
/// occurrence wins the value.
///
/// 将单元的输出记录收集为 `(stream, text)` 对，具有映射语义：
/// 名称的第一次出现固定其位置，最后一次出现决定其值。
fn stream_texts(cell: &Cell) -> Vec<(String, String)> {
    let mut streams: Vec<(String, String)> = Vec::new();
    for output in cell.outputs() {
        let name = output
            .name
            .clone()
            .unwrap_or_else(|| UNNAMED_STREAM.to_string());
        let text = output
            .text
            .as_ref()
            .map(|text| text.to_text())
            .unwrap_or_default();
        match streams.iter().position(|(existing, _)| *existing == name) {
            Some(i) => streams[i].1 = text,
            None => streams.push((name, text)),
        }
    }
    streams
}

/// The executed text for a stream, or empty when the current run produced
/// no output on it.
/// 某个流的执行文本，当本次运行没有在其上产生输出时为空。
fn stream_value<'a>(streams: &'a [(String, String)], name: &str) -> &'a str {
    streams
        .iter()
        .find(|(existing, _)| existing == name)
        .map(|(_, text)| text.as_str())
        .unwrap_or("")
}
