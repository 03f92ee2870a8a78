// src/cli.rs
use anyhow::Result;
use clap::{Arg, ArgAction, Command};
use std::{env, path::PathBuf};

use crate::commands;
use crate::infra::t;

/// Pre-parses the command line arguments to find the language setting.
/// This allows i18n to be initialized before the full CLI is built.
/// It looks for a `--lang <VALUE>` argument.
fn pre_parse_language() -> String {
    let args: Vec<String> = env::args().collect();
    if let Some(pos) = args.iter().position(|arg| arg == "--lang") {
        if let Some(lang) = args.get(pos + 1) {
            return lang.clone();
        }
    }
    // Fallback to system language detection
    sys_locale::get_locale().unwrap_or_else(|| "en".to_string())
}

fn build_cli(locale: &str) -> Command {
    Command::new("nbtest-runner")
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .about(t!("cli.about", locale = locale).to_string())
        .arg(
            Arg::new("lang")
                .long("lang")
                .help(t!("cli.lang", locale = locale).to_string())
                .value_name("LANGUAGE")
                .global(true)
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("notebook")
                .help(t!("cli.notebooks", locale = locale).to_string())
                .value_name("NOTEBOOK")
                .num_args(1..)
                .required(true)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("env-file")
                .short('e')
                .long("env-file")
                .help(t!("cli.env_file", locale = locale).to_string())
                .value_name("ENV_FILE")
                .default_value(".env")
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help(t!("cli.verbose", locale = locale).to_string())
                .action(ArgAction::SetTrue),
        )
}

/// Parses the command line and runs the notebook batch. Returns the summed
/// per-notebook status, which becomes the process exit code.
///
/// 解析命令行并运行 notebook 批处理。返回累加的每 notebook 状态，
/// 它将成为进程退出码。
pub async fn run() -> Result<i32> {
    // Pre-parse language and initialize i18n first.
    let language = pre_parse_language();
    rust_i18n::set_locale(&language);

    let matches = build_cli(&language).get_matches();

    let notebooks: Vec<PathBuf> = matches
        .get_many::<PathBuf>("notebook")
        .unwrap() // Required
        .cloned()
        .collect();
    let env_file = matches
        .get_one::<PathBuf>("env-file")
        .unwrap() // Has default
        .clone();
    let verbose = matches.get_flag("verbose");

    commands::run::execute(notebooks, env_file, verbose).await
}
