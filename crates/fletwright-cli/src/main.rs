//! fletwright CLI.
//!
//! Reads a layout saved by the designer and prints the equivalent Flet
//! program.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::Value;

use fletwright_codegen::{FletGenerator, GeneratorOptions, Generated};
use fletwright_core::Degradation;

mod config;

use config::{FletwrightConfig, OutputConfig};

#[derive(Parser, Debug)]
#[command(name = "fletwright")]
#[command(about = "Generate a Flet (Python) program from a fletwright layout")]
#[command(version)]
struct Cli {
    /// Layout JSON: an element array or a saved designer state. `-` or
    /// nothing reads stdin
    input: Option<PathBuf>,

    /// Write the program to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Config file (defaults to ./fletwright.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Page title
    #[arg(long)]
    title: Option<String>,

    /// Stem for button handler names
    #[arg(long)]
    handler_prefix: Option<String>,

    /// Print every substituted field value to stderr
    #[arg(long)]
    report: bool,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,

    /// Increase logging (-v warnings, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    /// Config file options with command-line flags on top.
    fn options(&self, mut options: GeneratorOptions) -> GeneratorOptions {
        if let Some(title) = &self.title {
            options.title = Some(title.clone());
        }
        if let Some(prefix) = &self.handler_prefix {
            options.handler_prefix = prefix.clone();
        }
        options
    }

    /// The loaded config with every command-line override applied.
    fn effective_config(&self, config: FletwrightConfig) -> FletwrightConfig {
        FletwrightConfig {
            generator: self.options(config.generator),
            output: OutputConfig {
                path: self.output.clone().or(config.output.path),
                report: self.report || config.output.report,
            },
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    run(&cli)
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::ERROR,
        1 => tracing::Level::WARN,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let loaded = match &cli.config {
        Some(path) => FletwrightConfig::load(path)?,
        None => FletwrightConfig::discover(Path::new("."))?.unwrap_or_default(),
    };
    let config = cli.effective_config(loaded);

    if cli.print_config {
        io::stdout()
            .lock()
            .write_all(config.to_toml()?.as_bytes())
            .context("Failed to write to stdout")?;
        return Ok(());
    }

    let input = read_input(cli.input.as_deref())?;
    let generator = FletGenerator::new(config.generator);
    let generated = generate(&generator, &input);

    if config.output.report {
        let mut stderr = io::stderr().lock();
        for degradation in &generated.degradations {
            writeln!(stderr, "warning: {}", degradation)?;
        }
    }

    match &config.output.path {
        Some(path) => fs::write(path, &generated.source)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => io::stdout()
            .lock()
            .write_all(generated.source.as_bytes())
            .context("Failed to write to stdout")?,
    }

    Ok(())
}

/// Generate from raw input text. Text that is not JSON is treated like any
/// other non-list input.
fn generate(generator: &FletGenerator, input: &str) -> Generated {
    match serde_json::from_str::<Value>(input) {
        Ok(value) => generator.generate_json_with_report(&value),
        Err(err) => {
            tracing::warn!(%err, "input is not valid JSON, emitting minimal document");
            let mut generated = generator.generate_with_report(&[]);
            generated
                .degradations
                .push(Degradation::InvalidDocument(format!("invalid JSON: {}", err)));
            generated
        }
    }
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::parse_from(["fletwright", "layout.json", "--title", "Flag", "--handler-prefix", "onTap"]);
        let options = cli.options(GeneratorOptions::default().with_title("Config"));
        assert_eq!(options.title.as_deref(), Some("Flag"));
        assert_eq!(options.handler_prefix, "onTap");
    }

    #[test]
    fn test_effective_config_applies_flags() {
        let cli = Cli::parse_from(["fletwright", "--print-config", "--title", "Flag", "--report", "-o", "app.py"]);
        let mut loaded = FletwrightConfig::default();
        loaded.generator.handler_prefix = "on_tap".to_string();
        let config = cli.effective_config(loaded);

        assert!(cli.print_config);
        assert_eq!(config.generator.title.as_deref(), Some("Flag"));
        assert_eq!(config.generator.handler_prefix, "on_tap");
        assert_eq!(config.output.path, Some(PathBuf::from("app.py")));
        assert!(config.output.report);

        let text = config.to_toml().unwrap();
        assert!(text.contains("title = \"Flag\""));
        assert!(text.contains("handler_prefix = \"on_tap\""));
        assert!(text.contains("report = true"));
    }

    #[test]
    fn test_verbosity_counts() {
        let cli = Cli::parse_from(["fletwright", "-vv"]);
        assert_eq!(cli.verbose, 2);
        assert!(cli.input.is_none());
    }

    #[test]
    fn test_invalid_json_yields_minimal_document() {
        let generated = generate(&FletGenerator::default(), "{not json");
        assert_eq!(generated.source, fletwright_codegen::MINIMAL_DOCUMENT);
        assert!(matches!(
            &generated.degradations[..],
            [Degradation::InvalidDocument(_)]
        ));
    }

    #[test]
    fn test_run_writes_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("layout.json");
        let output = dir.path().join("app.py");
        let config = dir.path().join("fletwright.toml");
        fs::write(&input, r#"[{"id": "b1", "type": "button", "content": "Go", "x": 5, "y": 6}]"#).unwrap();
        fs::write(&config, "[generator]\ntitle = \"From config\"\n").unwrap();

        let cli = Cli::parse_from([
            "fletwright",
            input.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
            "-c",
            config.to_str().unwrap(),
        ]);
        run(&cli).unwrap();

        let source = fs::read_to_string(&output).unwrap();
        assert!(source.contains("page.title = \"From config\""));
        assert!(source.contains("text=\"Go\""));
        assert!(source.contains("def handle_click_0():"));
    }

    #[test]
    fn test_missing_input_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        let err = read_input(Some(&missing)).unwrap_err();
        assert!(err.to_string().contains("nope.json"));
    }
}
