// パス: src/bin/intrinsify.rs
// 役割: Binary entrypoint that inspects the intrinsic registry and runtime names
// 意図: Offer a CLI to check which call shapes are intercepted and which runtime symbols they use
// 関連ファイル: src/translator.rs, src/namer.rs, src/intrinsics/registry.rs
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use intrinsify::{IntrinsicSession, RuntimeNames};

#[derive(Debug, Parser)]
#[command(name = "intrinsify", about = "intrinsic レジストリとランタイム名の確認")]
struct Cli {
    /// ランタイム名を上書きする JSON ファイル
    #[arg(long, value_name = "FILE")]
    names: Option<PathBuf>,
    /// ログレベル (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: log::LevelFilter,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// レジストリのエントリを登録順に表示する
    List,
    /// 有効なランタイム名を JSON で表示する
    Names,
}

fn init_logging(level: log::LevelFilter) -> Result<(), log::SetLoggerError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}: {}",
                record.level().to_string().to_lowercase(),
                message
            ))
        })
        .level(level)
        .chain(io::stderr())
        .apply()
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(err) = init_logging(cli.log_level) {
        eprintln!("ロガーの初期化に失敗しました: {err}");
    }

    let names = match &cli.names {
        Some(path) => match RuntimeNames::load(path) {
            Ok(names) => names,
            Err(err) => {
                log::error!("{}: {}", path.display(), err);
                return ExitCode::FAILURE;
            }
        },
        None => RuntimeNames::default(),
    };
    let session = IntrinsicSession::new(names);

    match cli.command {
        Command::List => {
            for (idx, line) in session.registry().describe().iter().enumerate() {
                println!("{idx:>3}  {line}");
            }
        }
        Command::Names => match serde_json::to_string_pretty(session.names()) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                log::error!("{err}");
                return ExitCode::FAILURE;
            }
        },
    }
    ExitCode::SUCCESS
}
