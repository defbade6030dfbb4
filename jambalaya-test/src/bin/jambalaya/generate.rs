use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use jambalaya_test::{AssertGenerator, AssertGeneratorConfig};
use log::debug;

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// JSON file to read, or `-` for stdin
    pub input: PathBuf,

    /// Variable name used as the root of every assertion
    #[arg(short, long, default_value = "response")]
    pub name: String,

    /// TOML config file (indentation, global_ignored_methods, scan_all_prefixes)
    #[arg(short, long, env = "JAMBALAYA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Indent nested assertions by this many spaces
    #[arg(long, value_name = "SPACES")]
    pub indent: Option<usize>,

    /// Skip keys with this name (repeatable)
    #[arg(long = "ignore", value_name = "NAME")]
    pub ignore: Vec<String>,

    /// Surround the output with blank lines
    #[arg(long)]
    pub print_banner: bool,
}

pub fn handle_generate(args: GenerateArgs) -> Result<()> {
    let config = build_config(&args)?;
    let document = read_document(&args.input)?;
    let generator = AssertGenerator::new(config);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.print_banner {
        generator.print_to(&document, &args.name, &mut out)?;
    } else if let Some(text) = generator.generate_text(&document, &args.name)? {
        writeln!(out, "{text}")?;
    }
    Ok(())
}

fn build_config(args: &GenerateArgs) -> Result<AssertGeneratorConfig> {
    let mut config = match &args.config {
        Some(path) => AssertGeneratorConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => AssertGeneratorConfig::default(),
    };
    if let Some(width) = args.indent {
        config = config.with_indentation(" ".repeat(width));
    }
    for name in &args.ignore {
        config = config.ignore_method(name.clone());
    }
    debug!("using config {config:?}");
    Ok(config)
}

fn read_document(input: &Path) -> Result<serde_json::Value> {
    let source = if input == Path::new("-") {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read JSON from stdin")?;
        buffer
    } else {
        fs::read_to_string(input).with_context(|| format!("failed to read {}", input.display()))?
    };
    serde_json::from_str(&source).with_context(|| format!("{} is not valid JSON", input.display()))
}
