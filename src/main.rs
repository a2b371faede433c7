use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;
use std::fs;
use std::io::{IsTerminal, Read, Write};
use std::path::{Path, PathBuf};

use xlsx_response::XlsxResponse;
use xlsx_response::document::DocumentSpec;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON document description, `-` for stdin
    #[arg(required = true)]
    input: PathBuf,

    /// Output file or directory (the file name then comes from the metadata). Defaults to stdout
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// Write an HTTP response: headers, a blank line, then the document
    #[arg(long)]
    http: bool,

    /// Log progress to stderr
    #[arg(long, short = 'v')]
    verbose: bool,
}

struct StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn init_logging(verbose: bool) {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(if verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        });
    }
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut json = String::new();
        std::io::stdin()
            .read_to_string(&mut json)
            .context("Failed to read document from stdin")?;
        return Ok(json);
    }

    fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.output.is_none() && std::io::stdout().is_terminal() {
        eprintln!("xlsx-response error: Refusing to write a binary document to a terminal. Use -o or a pipe.");
        std::process::exit(1);
    }

    let json = read_input(&cli.input)?;
    let document = DocumentSpec::from_json(&json)
        .with_context(|| format!("Invalid document description: {}", cli.input.display()))?;
    let spreadsheet = document
        .build()
        .context("Failed to build spreadsheet")?;
    let response = XlsxResponse::new(&spreadsheet).context("Failed to serialize spreadsheet")?;

    let mut bytes = Vec::with_capacity(response.body().len() + 256);
    if cli.http {
        response.emit(&mut bytes)?;
    } else {
        bytes.extend_from_slice(response.body());
    }

    match cli.output {
        Some(output) => {
            let path = if output.is_dir() {
                output.join(response.filename())
            } else {
                output
            };

            fs::write(&path, &bytes)
                .with_context(|| format!("Failed to write to file: {}", path.display()))?;
            log::info!("Wrote {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(&bytes)
                .and_then(|()| stdout.flush())
                .context("Failed to write to stdout")?;
        }
    }

    Ok(())
}
