//! # Notebook Document Model / Notebook 文档模型
//!
//! This module models the nbformat v4 JSON document: an ordered sequence of
//! cells, where code cells carry source text and the output records produced
//! by execution. Only the fields the runner inspects are typed; everything
//! else is preserved verbatim so a document written back for the execution
//! engine stays valid.
//!
//! 此模块对 nbformat v4 JSON 文档建模：一个有序的单元序列，
//! 其中代码单元携带源代码文本和执行产生的输出记录。
//! 只有运行器检查的字段是类型化的；其余内容原样保留，
//! 以便写回给执行引擎的文档保持有效。

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

use crate::infra::t;

/// The cell type that carries executable source and output records.
/// 携带可执行源代码和输出记录的单元类型。
pub const CODE_CELL_TYPE: &str = "code";

/// nbformat stores text either as a single string or as a list of
/// newline-terminated line strings. Both forms are accepted and the
/// original form is kept for serialization.
///
/// nbformat 将文本存储为单个字符串或以换行结尾的行字符串列表。
/// 两种形式都被接受，并在序列化时保留原始形式。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MultilineText {
    Single(String),
    Lines(Vec<String>),
}

impl MultilineText {
    /// Returns the text as one string, joining the line form.
    /// 以单个字符串返回文本，行形式会被连接。
    pub fn to_text(&self) -> String {
        match self {
            MultilineText::Single(text) => text.clone(),
            MultilineText::Lines(lines) => lines.concat(),
        }
    }
}

impl Default for MultilineText {
    fn default() -> Self {
        MultilineText::Single(String::new())
    }
}

/// A single output record of a code cell. Stream outputs carry a `name`
/// (`stdout` or `stderr`) and `text`; other output types keep their payload
/// in `extra` and are never compared.
///
/// 代码单元的单条输出记录。流输出携带 `name`（`stdout` 或 `stderr`）
/// 和 `text`；其他输出类型将其负载保存在 `extra` 中且从不参与比较。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<MultilineText>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A notebook cell. `outputs` is only present for code cells; keeping it
/// optional means non-code cells never gain an `outputs` key on write.
///
/// 一个 notebook 单元。`outputs` 仅存在于代码单元中；
/// 将其保持为可选意味着非代码单元在写回时不会多出 `outputs` 键。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cell {
    pub cell_type: String,
    #[serde(default)]
    pub source: MultilineText,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outputs: Option<Vec<OutputRecord>>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Cell {
    pub fn is_code(&self) -> bool {
        self.cell_type == CODE_CELL_TYPE
    }

    /// The output records of this cell, empty for non-code cells.
    /// 此单元的输出记录，非代码单元为空。
    pub fn outputs(&self) -> &[OutputRecord] {
        self.outputs.as_deref().unwrap_or_default()
    }
}

/// A parsed notebook document. Top-level fields other than `cells`
/// (`nbformat`, `metadata`, ...) ride along in `extra`.
///
/// 解析后的 notebook 文档。除 `cells` 以外的顶层字段
/// （`nbformat`、`metadata` 等）保存在 `extra` 中。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notebook {
    #[serde(default)]
    pub cells: Vec<Cell>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Notebook {
    /// Reads a notebook from disk. A missing file is reported as `Ok(None)`
    /// since callers treat "not there" differently from "broken".
    ///
    /// 从磁盘读取 notebook。文件缺失报告为 `Ok(None)`，
    /// 因为调用方对“不存在”和“损坏”的处理不同。
    pub fn read(path: &Path) -> Result<Option<Notebook>> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e)
                    .with_context(|| t!("io.read_failed", path = path.display()).to_string());
            }
        };
        let notebook = serde_json::from_str(&raw)
            .with_context(|| t!("io.parse_failed", path = path.display()).to_string())?;
        Ok(Some(notebook))
    }

    /// Writes the document as nbformat JSON.
    /// 将文档写为 nbformat JSON。
    pub fn write(&self, path: &Path) -> Result<()> {
        let mut raw = serde_json::to_string_pretty(self)?;
        raw.push('\n');
        fs::write(path, raw)
            .with_context(|| format!("failed to write notebook to {}", path.display()))
    }
}
