//! Command-line argument handling.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};

use mosaic_types::item::Viewport;

pub const USAGE: &str = "\
Usage: mosaic-app <library.json|library.toml> [options]

Options:
  --viewport WxH     Target viewport in pixels (default 1200x800)
  --config FILE      Layout config TOML (default: $MOSAIC_CONFIG, then built-in)
  --min-hours H      Drop games played less than H hours (default 0.1)
  --format FORMAT    text, json or css (default text)
  -h, --help         Show this help";

/// Environment variable naming a default config file.
pub const CONFIG_ENV: &str = "MOSAIC_CONFIG";

const DEFAULT_MIN_HOURS: f64 = 0.1;

/// How the finished plan is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Css,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "txt" => Some(Self::Text),
            "json" => Some(Self::Json),
            "css" => Some(Self::Css),
            _ => None,
        }
    }
}

/// Options for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct CliArgs {
    pub library: PathBuf,
    pub viewport: Viewport,
    pub config: Option<PathBuf>,
    pub min_hours: f64,
    pub format: OutputFormat,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Run(CliArgs),
    Help,
}

/// Parse arguments (without the program name).
pub fn parse_args<I>(args: I) -> Result<Command>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let mut library = None;
    let mut viewport = Viewport::default();
    let mut config = None;
    let mut min_hours = DEFAULT_MIN_HOURS;
    let mut format = OutputFormat::Text;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "--viewport" => {
                let v = args.next().context("--viewport needs a value")?;
                viewport = Viewport::parse(&v)
                    .with_context(|| format!("bad viewport '{v}', expected WIDTHxHEIGHT"))?;
            },
            "--config" => {
                config = Some(PathBuf::from(args.next().context("--config needs a value")?));
            },
            "--min-hours" => {
                let v = args.next().context("--min-hours needs a value")?;
                min_hours = v
                    .parse()
                    .with_context(|| format!("bad --min-hours '{v}'"))?;
                if !(min_hours >= 0.0) {
                    bail!("--min-hours must be non-negative, got {min_hours}");
                }
            },
            "--format" => {
                let v = args.next().context("--format needs a value")?;
                format = OutputFormat::parse(&v)
                    .with_context(|| format!("unknown format '{v}' (text, json, css)"))?;
            },
            flag if flag.starts_with("--") => bail!("unknown option '{flag}'\n\n{USAGE}"),
            path => {
                if library.is_some() {
                    bail!("unexpected extra argument '{path}'");
                }
                library = Some(PathBuf::from(path));
            },
        }
    }

    let Some(library) = library else {
        bail!("missing library file\n\n{USAGE}");
    };

    Ok(Command::Run(CliArgs {
        library,
        viewport,
        config,
        min_hours,
        format,
    }))
}

/// Config file to load: the explicit flag wins over the environment.
pub fn config_path(explicit: Option<PathBuf>, env_value: Option<String>) -> Option<PathBuf> {
    explicit.or_else(|| env_value.filter(|v| !v.is_empty()).map(PathBuf::from))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Command> {
        parse_args(args.iter().map(|s| s.to_string()))
    }

    fn run(args: &[&str]) -> CliArgs {
        match parse(args).unwrap() {
            Command::Run(cli) => cli,
            Command::Help => panic!("unexpected help"),
        }
    }

    #[test]
    fn library_only_uses_defaults() {
        let cli = run(&["games.json"]);
        assert_eq!(cli.library, PathBuf::from("games.json"));
        assert_eq!(cli.viewport, Viewport::new(1200.0, 800.0));
        assert_eq!(cli.config, None);
        assert_eq!(cli.min_hours, 0.1);
        assert_eq!(cli.format, OutputFormat::Text);
    }

    #[test]
    fn all_options() {
        let cli = run(&[
            "--viewport",
            "1920x1080",
            "lib.toml",
            "--config",
            "mosaic.toml",
            "--min-hours",
            "2",
            "--format",
            "CSS",
        ]);
        assert_eq!(cli.library, PathBuf::from("lib.toml"));
        assert_eq!(cli.viewport, Viewport::new(1920.0, 1080.0));
        assert_eq!(cli.config, Some(PathBuf::from("mosaic.toml")));
        assert_eq!(cli.min_hours, 2.0);
        assert_eq!(cli.format, OutputFormat::Css);
    }

    #[test]
    fn help_flag() {
        assert_eq!(parse(&["-h"]).unwrap(), Command::Help);
        assert_eq!(parse(&["games.json", "--help"]).unwrap(), Command::Help);
    }

    #[test]
    fn errors() {
        assert!(parse(&[]).is_err());
        assert!(parse(&["a.json", "b.json"]).is_err());
        assert!(parse(&["a.json", "--viewport"]).is_err());
        assert!(parse(&["a.json", "--viewport", "wide"]).is_err());
        assert!(parse(&["a.json", "--min-hours", "-1"]).is_err());
        assert!(parse(&["a.json", "--format", "svg"]).is_err());
        assert!(parse(&["a.json", "--frobnicate"]).is_err());
    }

    #[test]
    fn format_aliases() {
        assert_eq!(OutputFormat::parse("txt"), Some(OutputFormat::Text));
        assert_eq!(OutputFormat::parse("JSON"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::parse("html"), None);
    }

    #[test]
    fn config_path_precedence() {
        assert_eq!(
            config_path(Some("a.toml".into()), Some("b.toml".into())),
            Some(PathBuf::from("a.toml"))
        );
        assert_eq!(
            config_path(None, Some("b.toml".into())),
            Some(PathBuf::from("b.toml"))
        );
        assert_eq!(config_path(None, Some(String::new())), None);
        assert_eq!(config_path(None, None), None);
    }
}
