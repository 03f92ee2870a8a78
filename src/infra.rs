//! # Infrastructure Module / 基础设施模块
//!
//! This module provides infrastructure services for the nbtest runner,
//! including subprocess execution, the notebook execution engine, kernel
//! registration and environment file loading.
//!
//! 此模块为 nbtest 运行器提供基础设施服务，
//! 包括子进程执行、notebook 执行引擎、内核注册和环境文件加载。

pub mod command;
pub mod engine;
pub mod env;
pub mod kernel;

// Re-export i18n functions for easier access
pub use rust_i18n::t;
