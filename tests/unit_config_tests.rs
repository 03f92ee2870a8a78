//! # Config Module Unit Tests / Config 模块单元测试
//!
//! Unit tests for `core::config`: loading the `.nbtest.yml` sidecar file,
//! defaulting when it is absent and failing when it is malformed.
//!
//! `core::config` 的单元测试：加载 `.nbtest.yml` 附属文件，
//! 缺失时使用默认值，损坏时失败。

use nbtest_runner::core::config::{CONFIG_FILE_NAME, NbtestConfig};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_missing_config_yields_defaults() {
    let dir = tempdir().unwrap();
    let config = NbtestConfig::load(dir.path()).unwrap();
    assert!(config.masks.is_empty());
}

#[test]
fn test_masks_are_loaded_in_configured_order() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join(CONFIG_FILE_NAME),
        "masks:\n  - '\\d+'\n  - 'at 0x[0-9a-f]+'\n",
    )
    .unwrap();

    let config = NbtestConfig::load(dir.path()).unwrap();
    assert_eq!(config.masks, vec![r"\d+", r"at 0x[0-9a-f]+"]);
}

#[test]
fn test_unknown_keys_are_ignored() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join(CONFIG_FILE_NAME),
        "masks: []\ntimeout: 30\n",
    )
    .unwrap();

    let config = NbtestConfig::load(dir.path()).unwrap();
    assert!(config.masks.is_empty());
}

#[test]
fn test_config_without_masks_key_defaults_to_empty() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join(CONFIG_FILE_NAME), "other: value\n").unwrap();

    let config = NbtestConfig::load(dir.path()).unwrap();
    assert!(config.masks.is_empty());
}

#[test]
fn test_malformed_yaml_is_an_error() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join(CONFIG_FILE_NAME), "masks: [unclosed\n").unwrap();

    assert!(NbtestConfig::load(dir.path()).is_err());
}

#[test]
fn test_compiling_configured_masks() {
    let config = NbtestConfig {
        masks: vec![r"\d+".to_string()],
    };
    let masks = config.compile_masks().unwrap();
    assert_eq!(masks.apply("n=5"), "n=<masked>");
}

#[test]
fn test_compiling_invalid_mask_is_an_error() {
    let config = NbtestConfig {
        masks: vec![r"(".to_string()],
    };
    assert!(config.compile_masks().is_err());
}
