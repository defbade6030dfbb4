mod generate;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use env_logger::Env;

use generate::{GenerateArgs, handle_generate};

#[derive(Parser)]
#[command(name = "jambalaya")]
#[command(version = "0.1.0")]
#[command(
    about = "Generate assertion statements from JSON documents",
    long_about = r#"Reads a JSON document, such as a captured GraphQL response, and prints
assertThat(...) statements describing every value in it.

Commands:
  generate  Print assertions for a JSON document
"#
)]
#[command(subcommand_required = true, arg_required_else_help = true)]
struct Cli {
    /// Enable verbose logging
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print assertions for a JSON document
    Generate(GenerateArgs),
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    if cli.no_color {
        colored::control::set_override(false);
    }

    if let Err(err) = run(cli) {
        eprintln!("{} {err:#}", "error:".red().bold());
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Generate(args) => handle_generate(args),
    }
}
