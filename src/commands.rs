/// The `run` command: execute a batch of notebooks and aggregate their statuses.
/// `run` 命令：执行一批 notebook 并汇总它们的状态。
pub mod run;
