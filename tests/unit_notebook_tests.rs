//! # Notebook Model Unit Tests / Notebook 模型单元测试
//!
//! Unit tests for `core::notebook`: both nbformat text forms, the outputs
//! accessor, preservation of unknown fields across a read/write round trip,
//! and the missing-vs-broken distinction in `read`.
//!
//! `core::notebook` 的单元测试：两种 nbformat 文本形式、outputs
//! 访问器、读写往返中未知字段的保留，以及 `read` 中
//! “缺失”与“损坏”的区分。

mod common;

use common::{code_cell, markdown_cell, stream_output, write_notebook};
use nbtest_runner::core::notebook::{MultilineText, Notebook};
use serde_json::json;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_source_parses_from_single_string() {
    let cell: nbtest_runner::core::notebook::Cell =
        serde_json::from_value(code_cell("print('hi')\n", vec![])).unwrap();
    assert!(cell.is_code());
    assert_eq!(cell.source.to_text(), "print('hi')\n");
}

#[test]
fn test_source_parses_from_line_list() {
    let raw = json!({
        "cell_type": "code",
        "metadata": {},
        "source": ["a = 1\n", "print(a)\n"],
        "outputs": [],
    });
    let cell: nbtest_runner::core::notebook::Cell = serde_json::from_value(raw).unwrap();
    assert_eq!(cell.source.to_text(), "a = 1\nprint(a)\n");
}

#[test]
fn test_output_text_parses_from_line_list() {
    let raw = json!({
        "output_type": "stream",
        "name": "stdout",
        "text": ["line 1\n", "line 2\n"],
    });
    let output: nbtest_runner::core::notebook::OutputRecord =
        serde_json::from_value(raw).unwrap();
    assert_eq!(output.name.as_deref(), Some("stdout"));
    assert_eq!(output.text.unwrap().to_text(), "line 1\nline 2\n");
}

#[test]
fn test_non_stream_output_has_no_name() {
    let raw = json!({
        "output_type": "execute_result",
        "execution_count": 1,
        "data": {"text/plain": "42"},
        "metadata": {},
    });
    let output: nbtest_runner::core::notebook::OutputRecord =
        serde_json::from_value(raw).unwrap();
    assert!(output.name.is_none());
    assert!(output.text.is_none());
    assert_eq!(output.extra["output_type"], "execute_result");
}

#[test]
fn test_outputs_accessor_is_empty_for_markdown_cells() {
    let cell: nbtest_runner::core::notebook::Cell =
        serde_json::from_value(markdown_cell("# Title\n")).unwrap();
    assert!(!cell.is_code());
    assert!(cell.outputs().is_empty());
}

#[test]
fn test_round_trip_preserves_unknown_fields() {
    let dir = tempdir().unwrap();
    let path = write_notebook(
        dir.path(),
        "roundtrip.ipynb",
        vec![code_cell("x = 1\n", vec![stream_output("stdout", "1\n")])],
    );

    let notebook = Notebook::read(&path).unwrap().unwrap();
    let copy = dir.path().join("copy.ipynb");
    notebook.write(&copy).unwrap();

    let reread: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&copy).unwrap()).unwrap();
    assert_eq!(reread["nbformat"], 4);
    assert_eq!(reread["metadata"]["kernelspec"]["name"], "python3-test");
    assert_eq!(reread["cells"][0]["outputs"][0]["output_type"], "stream");
    // A markdown-free code cell keeps its outputs key even when empty.
    assert!(reread["cells"][0]["execution_count"].is_null());
}

#[test]
fn test_written_markdown_cells_gain_no_outputs_key() {
    let dir = tempdir().unwrap();
    let path = write_notebook(dir.path(), "md.ipynb", vec![markdown_cell("text\n")]);

    let notebook = Notebook::read(&path).unwrap().unwrap();
    let copy = dir.path().join("copy.ipynb");
    notebook.write(&copy).unwrap();

    let reread: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&copy).unwrap()).unwrap();
    assert!(reread["cells"][0].get("outputs").is_none());
}

#[test]
fn test_reading_a_missing_notebook_is_none() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("nope.ipynb");
    assert!(Notebook::read(&missing).unwrap().is_none());
}

#[test]
fn test_reading_invalid_json_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.ipynb");
    fs::write(&path, "not a notebook").unwrap();
    assert!(Notebook::read(&path).is_err());
}

#[test]
fn test_multiline_text_default_is_empty() {
    assert_eq!(MultilineText::default().to_text(), "");
}
