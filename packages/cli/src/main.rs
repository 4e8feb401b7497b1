mod commands;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{blocks, export, init, BlocksArgs, ExportArgs, InitArgs};

/// Pagecraft CLI - compile saved canvas layouts to static sites
#[derive(Parser, Debug)]
#[command(name = "pagecraft")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create an empty layout document
    Init(InitArgs),

    /// Export a layout document to markup/stylesheet/script artifacts
    Export(ExportArgs),

    /// List the available block types
    Blocks(BlocksArgs),
}

fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Init(args) => init(args),
        Command::Export(args) => export(args),
        Command::Blocks(args) => blocks(args),
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
