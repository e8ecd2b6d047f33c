#![forbid(unsafe_code)]

//! Command-line argument parsing for the demo host.
//!
//! Parses args by hand. Environment variables with the `FOLIO_DEMO_*`
//! prefix provide defaults that explicit flags override.

use std::env;
use std::path::PathBuf;
use std::process;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
folio-demo: terminal host for the folio command palette

USAGE:
    folio-demo [OPTIONS]

OPTIONS:
    --viewport-width=N   Pretend the viewport is N logical pixels wide
    --cell-width=N       Pixels per terminal column when measuring (default: 8)
    --no-mouse           Disable mouse event capture
    --log-file=PATH      Where logs are written (default: folio-demo.log)
    --log-json           Write logs as JSON lines (level info unless FOLIO_LOG is set)
    --help, -h           Show this help message
    --version, -V        Show version

KEYBINDINGS:
    Ctrl+K          Toggle the command palette
    Up / Down       Move the highlight (wide viewports only)
    Enter           Open the highlighted page (wide viewports only)
    Esc             Close the palette (wide viewports only)
    q / Ctrl+C      Quit (palette closed)

ENVIRONMENT VARIABLES:
    FOLIO_DEMO_VIEWPORT_WIDTH   Override --viewport-width
    FOLIO_DEMO_CELL_WIDTH       Override --cell-width
    FOLIO_DEMO_LOG_FILE         Override --log-file
    FOLIO_DEMO_LOG_JSON         Set to 1 for --log-json
    FOLIO_PALETTE_BREAKPOINT    Narrow/wide threshold in pixels (default: 768)
    FOLIO_PALETTE_MAX_VISIBLE   Result rows shown at once (default: 8)
    FOLIO_LOG                   Log filter, e.g. folio_palette=debug (logs go to --log-file)";

const ENV_VIEWPORT_WIDTH: &str = "FOLIO_DEMO_VIEWPORT_WIDTH";
const ENV_CELL_WIDTH: &str = "FOLIO_DEMO_CELL_WIDTH";
const ENV_LOG_FILE: &str = "FOLIO_DEMO_LOG_FILE";
const ENV_LOG_JSON: &str = "FOLIO_DEMO_LOG_JSON";

/// Default log destination, relative to the working directory.
pub const DEFAULT_LOG_FILE: &str = "folio-demo.log";

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opts {
    /// Fixed viewport width; `None` measures the terminal.
    pub viewport_width: Option<u32>,
    /// Pixels per column when measuring the terminal.
    pub cell_width: u16,
    /// Whether mouse events are enabled.
    pub mouse: bool,
    /// Log destination; the terminal is never written to.
    pub log_file: PathBuf,
    /// JSON log lines instead of plain text.
    pub log_json: bool,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            viewport_width: None,
            cell_width: 8,
            mouse: true,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            log_json: false,
        }
    }
}

/// What the command line asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the demo.
    Run(Opts),
    /// Print help and exit.
    Help,
    /// Print the version and exit.
    Version,
}

impl Opts {
    /// Parse the process arguments and environment.
    ///
    /// Prints help or version and exits when asked; prints the error and
    /// exits with status 1 on bad input.
    pub fn parse() -> Self {
        match parse_from(env::args().skip(1), |var| env::var(var).ok()) {
            Ok(Command::Run(opts)) => opts,
            Ok(Command::Help) => {
                println!("{HELP_TEXT}");
                process::exit(0);
            }
            Ok(Command::Version) => {
                println!("folio-demo {VERSION}");
                process::exit(0);
            }
            Err(message) => {
                eprintln!("{message}");
                eprintln!("Run with --help for usage information.");
                process::exit(1);
            }
        }
    }
}

/// Parse `args` with `lookup` supplying environment defaults.
pub fn parse_from(
    args: impl IntoIterator<Item = String>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<Command, String> {
    let mut opts = Opts::default();

    // Environment first; flags below override.
    if let Some(val) = lookup(ENV_VIEWPORT_WIDTH)
        && let Ok(n) = val.trim().parse()
    {
        opts.viewport_width = Some(n);
    }
    if let Some(val) = lookup(ENV_CELL_WIDTH)
        && let Ok(n) = val.trim().parse::<u16>()
        && n > 0
    {
        opts.cell_width = n;
    }
    if let Some(val) = lookup(ENV_LOG_FILE)
        && !val.trim().is_empty()
    {
        opts.log_file = PathBuf::from(val.trim());
    }
    if let Some(val) = lookup(ENV_LOG_JSON) {
        opts.log_json = matches!(val.trim(), "1" | "true" | "yes");
    }

    for arg in args {
        match arg.as_str() {
            "--help" | "-h" => return Ok(Command::Help),
            "--version" | "-V" => return Ok(Command::Version),
            "--no-mouse" => opts.mouse = false,
            "--log-json" => opts.log_json = true,
            other => {
                if let Some(val) = other.strip_prefix("--viewport-width=") {
                    let n = val
                        .parse()
                        .map_err(|_| format!("Invalid --viewport-width value: {val}"))?;
                    opts.viewport_width = Some(n);
                } else if let Some(val) = other.strip_prefix("--log-file=") {
                    if val.is_empty() {
                        return Err("Empty --log-file value".to_owned());
                    }
                    opts.log_file = PathBuf::from(val);
                } else if let Some(val) = other.strip_prefix("--cell-width=") {
                    match val.parse::<u16>() {
                        Ok(n) if n > 0 => opts.cell_width = n,
                        _ => return Err(format!("Invalid --cell-width value: {val}")),
                    }
                } else {
                    return Err(format!("Unknown argument: {other}"));
                }
            }
        }
    }

    Ok(Command::Run(opts))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str], env: &[(&str, &str)]) -> Result<Command, String> {
        let env: Vec<(String, String)> = env
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        parse_from(args.iter().map(|a| (*a).to_owned()), move |var| {
            env.iter().find(|(k, _)| k == var).map(|(_, v)| v.clone())
        })
    }

    #[test]
    fn default_opts() {
        assert_eq!(parse(&[], &[]), Ok(Command::Run(Opts::default())));
        let opts = Opts::default();
        assert_eq!(opts.viewport_width, None);
        assert_eq!(opts.cell_width, 8);
        assert!(opts.mouse);
    }

    #[test]
    fn flags_parse() {
        let cmd = parse(&["--viewport-width=600", "--cell-width=10", "--no-mouse"], &[]);
        assert_eq!(
            cmd,
            Ok(Command::Run(Opts {
                viewport_width: Some(600),
                cell_width: 10,
                mouse: false,
                ..Opts::default()
            }))
        );
    }

    #[test]
    fn flags_override_env() {
        let cmd = parse(
            &["--viewport-width=1024"],
            &[(ENV_VIEWPORT_WIDTH, "500"), (ENV_CELL_WIDTH, "9")],
        );
        let Ok(Command::Run(opts)) = cmd else {
            panic!("expected run, got {cmd:?}");
        };
        assert_eq!(opts.viewport_width, Some(1024));
        assert_eq!(opts.cell_width, 9);
    }

    #[test]
    fn log_destination_and_format() {
        let Ok(Command::Run(opts)) = parse(&[], &[]) else {
            panic!("expected run");
        };
        assert_eq!(opts.log_file, PathBuf::from(DEFAULT_LOG_FILE));
        assert!(!opts.log_json);

        let cmd = parse(
            &["--log-file=/tmp/palette.log"],
            &[(ENV_LOG_FILE, "env.log"), (ENV_LOG_JSON, "1")],
        );
        let Ok(Command::Run(opts)) = cmd else {
            panic!("expected run, got {cmd:?}");
        };
        assert_eq!(opts.log_file, PathBuf::from("/tmp/palette.log"));
        assert!(opts.log_json);

        let Ok(Command::Run(opts)) = parse(&["--log-json"], &[(ENV_LOG_FILE, "env.log")]) else {
            panic!("expected run");
        };
        assert_eq!(opts.log_file, PathBuf::from("env.log"));
        assert!(opts.log_json);

        assert!(parse(&["--log-file="], &[]).is_err());
    }

    #[test]
    fn bad_env_values_are_ignored() {
        let cmd = parse(&[], &[(ENV_VIEWPORT_WIDTH, "wide"), (ENV_CELL_WIDTH, "0")]);
        assert_eq!(cmd, Ok(Command::Run(Opts::default())));
    }

    #[test]
    fn bad_flags_are_errors() {
        assert!(parse(&["--cell-width=0"], &[]).is_err());
        assert!(parse(&["--viewport-width=-1"], &[]).is_err());
        assert_eq!(
            parse(&["--bogus"], &[]),
            Err("Unknown argument: --bogus".to_owned())
        );
    }

    #[test]
    fn help_and_version_short_circuit() {
        assert_eq!(parse(&["--no-mouse", "-h", "--bogus"], &[]), Ok(Command::Help));
        assert_eq!(parse(&["-V"], &[]), Ok(Command::Version));
    }

    #[test]
    fn version_string_nonempty() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn help_text_contains_env_vars() {
        assert!(HELP_TEXT.contains(ENV_VIEWPORT_WIDTH));
        assert!(HELP_TEXT.contains(ENV_CELL_WIDTH));
        assert!(HELP_TEXT.contains(ENV_LOG_FILE));
        assert!(HELP_TEXT.contains(ENV_LOG_JSON));
        assert!(HELP_TEXT.contains("FOLIO_LOG"));
        assert!(!HELP_TEXT.contains("stderr"));
    }
}
