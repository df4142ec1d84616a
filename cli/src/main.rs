mod config;
mod test_runner;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use thiserror::Error;

use md2struct::{Compatibility, Conversion, Document, ParseError, Recovery};

use crate::config::{Config, ConfigError};

const SUBCOMMANDS: &[&str] = &["convert", "test", "help"];
const TOP_LEVEL_FLAGS: &[&str] = &["-h", "--help", "-V", "--version"];

#[derive(Parser)]
#[command(
    name = "md2struct",
    version,
    about = "Convert line-oriented markup into block/span JSON"
)]
struct Cli {
    /// Disable colored diagnostic output
    #[arg(long, global = true)]
    no_color: bool,

    /// Settings file (defaults to ./md2struct.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Raise log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert a markup file to JSON
    Convert(ConvertArgs),

    /// Run .test.md fixture files
    Test(TestArgs),
}

#[derive(clap::Args)]
struct ConvertArgs {
    /// Markup file to convert [default: input.md]
    input: Option<PathBuf>,

    /// Destination JSON file [default: output.json]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write indented JSON
    #[arg(long)]
    pretty: bool,

    /// Reproduce the historic output: line-global link targets, no markDefs
    /// on headings and list items
    #[arg(long)]
    legacy: bool,

    /// What to do with lines containing a malformed link
    #[arg(long, value_enum)]
    on_malformed: Option<RecoveryArg>,

    /// Fail without writing output if any line needed recovery
    #[arg(long)]
    strict: bool,

    /// Convert only, report diagnostics, write nothing
    #[arg(long)]
    check: bool,

    /// Write JSON to stdout instead of the output file
    #[arg(long, conflicts_with = "output")]
    stdout: bool,

    /// Print one line per block instead of JSON
    #[arg(long)]
    outline: bool,
}

impl ConvertArgs {
    /// Overlay command-line flags on the file settings.
    fn apply(&self, config: &mut Config) {
        if let Some(input) = &self.input {
            config.input = Some(input.clone());
        }
        if let Some(output) = &self.output {
            config.output = Some(output.clone());
        }
        if self.pretty {
            config.pretty = true;
        }
        if self.legacy {
            config.compatibility = Compatibility::Legacy;
        }
        if let Some(recovery) = self.on_malformed {
            config.on_malformed = recovery.into();
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum RecoveryArg {
    /// Leave the line out
    Skip,
    /// Keep the line, treating the `[` as text
    Literal,
}

impl From<RecoveryArg> for Recovery {
    fn from(arg: RecoveryArg) -> Self {
        match arg {
            RecoveryArg::Skip => Recovery::Skip,
            RecoveryArg::Literal => Recovery::Literal,
        }
    }
}

#[derive(clap::Args)]
struct TestArgs {
    /// Path to a .test.md file or directory containing them
    path: String,

    /// Run only tests in these categories (subfolder names). Repeatable.
    #[arg(short, long)]
    category: Vec<String>,

    /// List available categories and exit
    #[arg(long)]
    list_categories: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("cannot read '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot write '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot serialize document: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("{count} line(s) needed recovery, refusing to write output (--strict)")]
    Strict { count: usize },
}

fn main() {
    let args = with_default_subcommand(std::env::args().collect());
    let cli = Cli::parse_from(&args);
    init_logging(cli.verbose);

    let color_choice = if cli.no_color {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    };

    match cli.command {
        Command::Convert(convert_args) => {
            if let Err(err) = do_convert(convert_args, cli.config.as_deref(), color_choice) {
                eprintln!("error: {}", err);
                process::exit(1);
            }
        }
        Command::Test(test_args) => {
            let path = Path::new(&test_args.path);
            if test_args.list_categories {
                test_runner::list_categories(path);
                return;
            }
            let exit_code = test_runner::run_tests(path, cli.no_color, &test_args.category);
            process::exit(exit_code);
        }
    }
}

/// `md2struct file.md` and a bare `md2struct` both mean `md2struct convert ...`.
fn with_default_subcommand(mut args: Vec<String>) -> Vec<String> {
    let rest = args.get(1..).unwrap_or_default();
    let has_subcommand = rest.iter().any(|a| SUBCOMMANDS.contains(&a.as_str()));
    let top_level_only = rest.iter().any(|a| TOP_LEVEL_FLAGS.contains(&a.as_str()))
        && !rest.iter().any(|a| !a.starts_with('-'));
    if !has_subcommand && !top_level_only {
        args.insert(1.min(args.len()), "convert".to_string());
    }
    args
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn do_convert(
    args: ConvertArgs,
    config_path: Option<&Path>,
    color_choice: ColorChoice,
) -> Result<(), CliError> {
    let mut config = Config::load(config_path)?;
    args.apply(&mut config);

    let input = config.input();
    log::info!("== md2struct ==");
    log::info!("parsing file {}", input.display());

    let source = std::fs::read_to_string(&input).map_err(|source| CliError::Read {
        path: input.clone(),
        source,
    })?;

    let mut files = SimpleFiles::new();
    let file_id = files.add(input.display().to_string(), source.clone());

    let conversion = md2struct::Parser::new(source, file_id)
        .with_options(config.parse_options())
        .parse();

    emit_diagnostics(&conversion.diagnostics, &files, color_choice);

    if args.strict && !conversion.is_clean() {
        return Err(CliError::Strict {
            count: conversion.diagnostics.len(),
        });
    }

    if args.check {
        eprintln!(
            "ok: {} converted to {} block(s), {} warning(s)",
            input.display(),
            conversion.document.len(),
            conversion.diagnostics.len()
        );
        return Ok(());
    }

    if args.outline {
        print_outline(&conversion);
        return Ok(());
    }

    if args.stdout {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        write_document(&mut out, &conversion.document, config.pretty)?;
        writeln!(out).map_err(|source| CliError::Write {
            path: PathBuf::from("<stdout>"),
            source,
        })?;
        return Ok(());
    }

    let output = config.output();
    let file = File::create(&output).map_err(|source| CliError::Write {
        path: output.clone(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    write_document(&mut writer, &conversion.document, config.pretty)?;
    writer.flush().map_err(|source| CliError::Write {
        path: output.clone(),
        source,
    })?;

    log::info!(
        "wrote {} block(s) to {}",
        conversion.document.len(),
        output.display()
    );
    Ok(())
}

fn write_document<W: Write>(writer: W, document: &Document, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(writer, document)?;
    } else {
        serde_json::to_writer(writer, document)?;
    }
    Ok(())
}

fn emit_diagnostics(
    diagnostics: &[ParseError],
    files: &SimpleFiles<String, String>,
    color_choice: ColorChoice,
) {
    if diagnostics.is_empty() {
        return;
    }
    let writer = StandardStream::stderr(color_choice);
    let config = term::Config::default();
    for error in diagnostics {
        let diagnostic = error.to_diagnostic();
        let _ = term::emit_to_write_style(&mut writer.lock(), &config, files, &diagnostic);
    }
}

fn print_outline(conversion: &Conversion) {
    for block in &conversion.document {
        let marker = if block.is_list_item() { "- " } else { "" };
        let links = block.mark_defs().len();
        if links > 0 {
            println!(
                "{:<14} {}{} ({} link(s))",
                block.style,
                marker,
                block.plain_text(),
                links
            );
        } else {
            println!("{:<14} {}{}", block.style, marker, block.plain_text());
        }
    }
}
