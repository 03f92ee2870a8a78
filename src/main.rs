use nbtest_runner::cli;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match cli::run().await {
        // The batch status is the number of failing notebooks.
        // 批处理状态是失败的 notebook 数量。
        Ok(failures) => ExitCode::from(failures.clamp(0, u8::MAX as i32) as u8),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
