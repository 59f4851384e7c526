//! deadroute CLI - finds backend routes that no template, script, or
//! redirect ever calls.
//!
//! Scans three roots under a project directory:
//! - backend controllers (`src/main/kotlin`)
//! - HTML templates (`src/main/resources/templates`)
//! - browser scripts (`src/main/resources/static/js`)

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};

use deadroute_core::{
    init_structured_logging, load_config, print_json, print_plain, AnalysisResult, Deadroute,
    DeadrouteConfig, OutputFormat,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Unused backend route detector")]
pub struct Cli {
    /// Project base directory
    #[arg(default_value = ".")]
    path: String,

    /// Backend source root, relative to the base directory
    #[arg(long, value_name = "DIR")]
    backend_dir: Option<PathBuf>,

    /// Template root, relative to the base directory
    #[arg(long, value_name = "DIR")]
    templates_dir: Option<PathBuf>,

    /// Script root, relative to the base directory
    #[arg(long, value_name = "DIR")]
    scripts_dir: Option<PathBuf>,

    /// Route patterns to leave out of the report (`/prefix*`, `*suffix`, substring)
    #[arg(long, num_args = 1..)]
    ignore: Vec<String>,

    /// Output results in JSON format
    #[arg(long)]
    json: bool,

    /// Read and parse files in parallel
    #[arg(long)]
    parallel: bool,

    /// Exit with status 1 when unused routes are found
    #[arg(long)]
    fail_on_unused: bool,
}

/// Combine defaults, `deadroute.toml`, and command-line overrides.
fn build_analyzer(cli: &Cli, base: &Path, cfg: &DeadrouteConfig) -> Deadroute {
    let mut analyzer = Deadroute::new(base)
        .with_file_config(cfg)
        .ignore_patterns(cli.ignore.iter().cloned())
        .parallel(cli.parallel);

    if let Some(dir) = &cli.backend_dir {
        analyzer = analyzer.backend_dir(dir);
    }
    if let Some(dir) = &cli.templates_dir {
        analyzer = analyzer.templates_dir(dir);
    }
    if let Some(dir) = &cli.scripts_dir {
        analyzer = analyzer.scripts_dir(dir);
    }
    analyzer
}

fn output_format(cli: &Cli, cfg: &DeadrouteConfig) -> OutputFormat {
    if cli.json {
        OutputFormat::Json
    } else {
        cfg.output_format()
    }
}

fn print_result(result: &AnalysisResult, format: OutputFormat) {
    match format {
        OutputFormat::Plain => print_plain(&result.report()),
        OutputFormat::Json => print_json(&result.report()),
    }
}

fn main() -> Result<()> {
    std::panic::set_hook(Box::new(|info| {
        eprintln!("[PANIC] deadroute internal error: {}", info);
        eprintln!("[PANIC] The process will exit with code 2.");
        std::process::exit(2);
    }));

    // JSON logs to stderr, respects RUST_LOG
    init_structured_logging();

    let cli = Cli::parse();
    let base = Path::new(&cli.path);

    let cfg = load_config(base)
        .with_context(|| format!("Failed to load config from: {}", cli.path))?
        .unwrap_or_default();

    let result = build_analyzer(&cli, base, &cfg)
        .analyze()
        .with_context(|| format!("Failed to analyze: {}", cli.path))?;

    print_result(&result, output_format(&cli, &cfg));

    if cli.fail_on_unused && result.has_unused() {
        std::process::exit(1);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use deadroute_core::{OutputConfig, PathsConfig};

    #[test]
    fn test_defaults_without_flags() {
        let cli = Cli::try_parse_from(["deadroute"]).unwrap();
        assert_eq!(cli.path, ".");
        assert!(!cli.json);
        assert!(!cli.fail_on_unused);

        let cfg = DeadrouteConfig::default();
        let analyzer = build_analyzer(&cli, Path::new("."), &cfg);
        assert_eq!(
            analyzer.config().backend_root(),
            Path::new(".").join("src/main/kotlin")
        );
        assert_eq!(output_format(&cli, &cfg), OutputFormat::Plain);
    }

    #[test]
    fn test_cli_overrides_config_file() {
        let cli = Cli::try_parse_from([
            "deadroute",
            "/proj",
            "--backend-dir",
            "app/controllers",
            "--json",
        ])
        .unwrap();
        let cfg = DeadrouteConfig {
            paths: Some(PathsConfig {
                backend: Some("server".into()),
                templates: Some("web".into()),
                scripts: None,
            }),
            output: Some(OutputConfig {
                format: Some("plain".into()),
            }),
            ..Default::default()
        };

        let analyzer = build_analyzer(&cli, Path::new(&cli.path), &cfg);
        assert_eq!(
            analyzer.config().backend_root(),
            PathBuf::from("/proj/app/controllers")
        );
        assert_eq!(analyzer.config().templates_root(), PathBuf::from("/proj/web"));
        assert_eq!(output_format(&cli, &cfg), OutputFormat::Json);
    }

    #[test]
    fn test_ignore_accepts_multiple_values() {
        let cli =
            Cli::try_parse_from(["deadroute", "--ignore", "/actuator*", "*/health"]).unwrap();
        assert_eq!(cli.ignore, vec!["/actuator*", "*/health"]);
    }
}
