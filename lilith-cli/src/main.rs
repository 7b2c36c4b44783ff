//! Lilith CLI - the Lilith Lisp command line interface.
//! Lilith CLI - Lilith Lisp 的命令行界面。

mod commands;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use commands::Options;

/// Main CLI structure.
/// 主 CLI 结构体。
#[derive(Parser)]
#[command(name = "lilith")]
#[command(author, version, about = "Lilith - a small embeddable Lisp", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose output. / 启用详细输出。
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only print diagnostics and program output. / 仅输出诊断信息和程序输出。
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Add a directory to the load search path. / 添加加载搜索目录。
    #[arg(short = 'I', long = "include", value_name = "DIR", global = true)]
    include: Vec<PathBuf>,

    /// Do not evaluate the prelude. / 不执行 prelude。
    #[arg(long, global = true)]
    no_prelude: bool,
}

/// Available CLI commands.
/// 可用的 CLI 命令。
#[derive(Subcommand)]
enum Commands {
    /// Start an interactive REPL (the default). / 启动交互式 REPL（默认）。
    Repl,

    /// Load and run Lilith files. / 加载并运行 Lilith 文件。
    Run {
        /// Files to load, in order. / 按顺序加载的文件。
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Enter the REPL after loading. / 加载后进入 REPL。
        #[arg(short, long)]
        interactive: bool,
    },

    /// Evaluate an expression. / 求值表达式。
    Eval {
        /// The expression to evaluate. / 要求值的表达式。
        expr: String,
    },
}

/// Logs go to stderr; `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_level(true),
        )
        .with(filter)
        .init();
}

/// Main entry point.
/// 主入口点。
fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let options = Options {
        include: cli.include,
        no_prelude: cli.no_prelude,
        quiet: cli.quiet,
    };

    let result = match cli.command {
        None | Some(Commands::Repl) => commands::repl::run(&options),
        Some(Commands::Run { files, interactive }) => {
            commands::run::run(&files, interactive, &options)
        }
        Some(Commands::Eval { expr }) => commands::eval::run(&expr, &options),
    };

    if let Err(e) = result {
        if !cli.quiet {
            output::error(&e);
        }
        std::process::exit(1);
    }
}
