// Shared test helpers for integration tests
#![allow(dead_code)]

use anyhow::Result;
use nbtest_runner::core::notebook::Notebook;
use nbtest_runner::infra::engine::ExecutionEngine;
use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub fn code_cell(source: &str, outputs: Vec<Value>) -> Value {
    json!({
        "cell_type": "code",
        "execution_count": null,
        "metadata": {},
        "source": source,
        "outputs": outputs,
    })
}

pub fn markdown_cell(source: &str) -> Value {
    json!({
        "cell_type": "markdown",
        "metadata": {},
        "source": source,
    })
}

pub fn stream_output(name: &str, text: &str) -> Value {
    json!({
        "output_type": "stream",
        "name": name,
        "text": text,
    })
}

pub fn notebook_json(cells: Vec<Value>) -> Value {
    json!({
        "cells": cells,
        "metadata": {
            "kernelspec": {
                "name": "python3-test",
                "display_name": "Python 3 (nbtest)",
                "language": "python",
            },
        },
        "nbformat": 4,
        "nbformat_minor": 5,
    })
}

pub fn write_notebook(dir: &Path, name: &str, cells: Vec<Value>) -> PathBuf {
    let path = dir.join(name);
    let raw = serde_json::to_string_pretty(&notebook_json(cells)).unwrap();
    fs::write(&path, raw).expect("Failed to write fixture notebook");
    path
}

type EngineAction = Box<dyn Fn(&mut Notebook) -> Result<()> + Send + Sync>;

/// A scripted stand-in for the jupyter engine. It records every document it
/// is handed (after context injection, before the action runs) and then
/// applies a fixed action to it, so tests can simulate output changes and
/// execution failures without a jupyter installation.
pub struct ScriptedEngine {
    action: EngineAction,
    pub executions: Mutex<Vec<Notebook>>,
}

impl ScriptedEngine {
    pub fn new(action: impl Fn(&mut Notebook) -> Result<()> + Send + Sync + 'static) -> Self {
        Self {
            action: Box::new(action),
            executions: Mutex::new(Vec::new()),
        }
    }

    /// An engine that leaves every document untouched, so freshly
    /// "generated" output equals whatever was recorded.
    pub fn unchanged() -> Self {
        Self::new(|_| Ok(()))
    }

    /// An engine that fails for any document containing `marker` in a code
    /// cell's source and leaves every other document untouched.
    pub fn failing_on(marker: &'static str) -> Self {
        Self::new(move |notebook| {
            let hit = notebook
                .cells
                .iter()
                .filter(|cell| cell.is_code())
                .any(|cell| cell.source.to_text().contains(marker));
            if hit {
                anyhow::bail!("scripted failure on '{}'", marker);
            }
            Ok(())
        })
    }

    pub fn executed_count(&self) -> usize {
        self.executions.lock().unwrap().len()
    }

    /// The source of every code cell across all executed documents, in
    /// execution order. Lifecycle tests assert on the injected first line.
    pub fn executed_sources(&self) -> Vec<String> {
        self.executions
            .lock()
            .unwrap()
            .iter()
            .flat_map(|notebook| {
                notebook
                    .cells
                    .iter()
                    .filter(|cell| cell.is_code())
                    .map(|cell| cell.source.to_text())
                    .collect::<Vec<_>>()
            })
            .collect()
    }
}

impl ExecutionEngine for ScriptedEngine {
    async fn execute(&self, notebook: &mut Notebook, _workdir: &Path) -> Result<()> {
        self.executions.lock().unwrap().push(notebook.clone());
        (self.action)(notebook)
    }
}
