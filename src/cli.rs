//! Command-line interface for visionscan.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::{self, Config};
use crate::report;
use crate::runner::{collect_files, Runner};

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Extract package, class, interface, field and method declarations from
/// Vision source files.
#[derive(Parser)]
#[command(name = "visionscan")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Log progress to stderr (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract declarations from a file or directory
    #[command(visible_alias = "scan")]
    Extract(ExtractArgs),
    /// Write a default visionscan.yaml
    Init(InitArgs),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Pretty,
    Json,
    Trace,
}

impl Format {
    fn from_config(name: &str) -> Option<Self> {
        Self::from_str(name, true).ok()
    }
}

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Path to scan (file or directory)
    pub path: PathBuf,

    /// Path to config YAML file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format (default: from config, else text)
    #[arg(short, long, value_enum)]
    pub format: Option<Format>,

    /// Process files one at a time
    #[arg(long)]
    pub sequential: bool,
}

/// Arguments for the init command.
#[derive(Args)]
pub struct InitArgs {
    /// Output file path
    #[arg(short, long, default_value = "visionscan.yaml")]
    pub output: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

/// Run the extract command, writing the report to stdout.
pub fn run_extract(args: &ExtractArgs) -> anyhow::Result<i32> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_extract_to(args, Path::new("."), &mut out)
}

/// Run the extract command with config discovery in `cwd`, writing the
/// report to `out`. Diagnostics go to stderr.
pub fn run_extract_to<W: Write>(args: &ExtractArgs, cwd: &Path, out: &mut W) -> anyhow::Result<i32> {
    let (config, config_path) = match Config::load(args.config.as_deref(), cwd) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Run 'visionscan init' to create a config file");
            return Ok(EXIT_ERROR);
        }
    };

    if let Err(e) = config::validate(&config) {
        eprintln!("Error: invalid config: {}", e);
        return Ok(EXIT_ERROR);
    }
    if let Some(path) = &config_path {
        debug!(config = %path.display(), "loaded config");
    }

    let format = match args.format {
        Some(format) => format,
        // validate() has already checked the name
        None => Format::from_config(&config.format).unwrap_or(Format::Text),
    };

    if let Err(e) = std::fs::metadata(&args.path) {
        eprintln!("Error: cannot access path {:?}: {}", args.path, e);
        return Ok(EXIT_ERROR);
    }

    let files = collect_files(&args.path, &config)?;
    if files.is_empty() {
        warn!(path = %args.path.display(), "no files to scan");
    }

    let runner = Runner::new(&args.path).parallel(config.parallel && !args.sequential);
    let result = runner.run(&files);

    let path_str = args.path.to_string_lossy().to_string();
    let config_str = config_path.map(|p| p.to_string_lossy().to_string());

    match format {
        Format::Text => report::write_text(out, &result)?,
        Format::Pretty => report::write_pretty(out, &path_str, config_str.as_deref(), &result)?,
        Format::Json => report::write_json(out, &path_str, &result)?,
        Format::Trace => report::write_trace(out, &result)?,
    }

    // The pretty report already lists failures
    if format != Format::Pretty {
        for err in result.failures() {
            eprintln!("Error: {}", err);
        }
    }

    if result.is_success() {
        Ok(EXIT_SUCCESS)
    } else {
        Ok(EXIT_FAILED)
    }
}

/// Run the init command.
pub fn run_init(args: &InitArgs) -> anyhow::Result<i32> {
    if args.output.exists() && !args.force {
        eprintln!("Error: file already exists: {}", args.output.display());
        eprintln!("Use --force to overwrite it or --output to pick another path");
        return Ok(EXIT_ERROR);
    }

    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() && parent != Path::new(".") {
            if let Err(e) = std::fs::create_dir_all(parent) {
                eprintln!("Error: failed to create directory: {}", e);
                return Ok(EXIT_ERROR);
            }
        }
    }

    if let Err(e) = std::fs::write(&args.output, config::TEMPLATE) {
        eprintln!("Error: failed to write config: {}", e);
        return Ok(EXIT_ERROR);
    }

    println!("Created {}", args.output.display());
    println!();
    println!("Next steps:");
    println!("  1. Edit {} to customize for your project", args.output.display());
    println!(
        "  2. Run: visionscan extract . --config {}",
        args.output.display()
    );

    Ok(EXIT_SUCCESS)
}
