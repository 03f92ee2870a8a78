//! # nbtest Runner Library / nbtest 运行器库
//!
//! This library provides the core functionality for the nbtest runner,
//! a regression test executor for Jupyter notebooks. Each notebook is
//! executed through an external engine and the freshly generated cell
//! outputs are diffed against the outputs recorded in the file.
//!
//! 此库为 nbtest 运行器提供核心功能，
//! 这是一个针对 Jupyter notebook 的回归测试执行器。每个 notebook
//! 通过外部引擎执行，新生成的单元输出会与文件中记录的输出进行比对。
//!
//! ## Modules / 模块
//!
//! - `core` - Notebook model, masking, comparison and test orchestration
//! - `infra` - Infrastructure services like process execution and kernel registration
//! - `reporting` - Console reporting and diff rendering
//! - `cli` - Command-line interface
//!
//! - `core` - notebook 模型、掩码、比较与测试编排
//! - `infra` - 基础设施服务，如进程执行和内核注册
//! - `reporting` - 控制台报告与差异渲染
//! - `cli` - 命令行接口

pub mod cli;
pub mod commands;
pub mod core;
pub mod infra;
pub mod reporting;

// Re-export commonly used items
pub use crate::core::config;
pub use crate::core::masking;
pub use crate::core::notebook;
pub use crate::core::runner;

// Bind the translation catalogs under locales/
rust_i18n::i18n!("locales", fallback = "en");
