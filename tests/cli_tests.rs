use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

/// Invoking the runner without any notebook path must fail during argument
/// parsing, before any environment or kernel work happens.
///
/// 不带任何 notebook 路径调用运行器必须在参数解析期间失败，
/// 早于任何环境或内核相关的工作。
#[test]
fn test_notebook_argument_is_required() {
    let mut cmd = Command::cargo_bin("nbtest-runner").unwrap();

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

/// The help output documents the notebook list and the env-file and
/// verbose options.
///
/// 帮助输出记录了 notebook 列表以及 env-file 和 verbose 选项。
#[test]
fn test_help_lists_the_cli_surface() {
    let mut cmd = Command::cargo_bin("nbtest-runner").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("NOTEBOOK"))
        .stdout(predicate::str::contains("--env-file"))
        .stdout(predicate::str::contains("--verbose"))
        .stdout(predicate::str::contains("--lang"));
}

/// Unknown flags are rejected by the parser.
///
/// 未知标志会被解析器拒绝。
#[test]
fn test_unknown_flags_are_rejected() {
    let mut cmd = Command::cargo_bin("nbtest-runner").unwrap();
    cmd.arg("--does-not-exist").arg("some.ipynb");

    cmd.assert().failure();
}

/// `--version` reports the crate version.
///
/// `--version` 报告 crate 版本。
#[test]
fn test_version_is_reported() {
    let mut cmd = Command::cargo_bin("nbtest-runner").unwrap();
    cmd.arg("--version");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}
