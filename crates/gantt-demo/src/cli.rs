#![forbid(unsafe_code)]

//! Command-line argument parsing for the demo.
//!
//! Parses args manually (no external dependencies) to keep the binary
//! lean. Supports environment variable overrides via `GANTT_DEMO_*`.

use std::env;
use std::process;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
gantt-demo — an interactive Gantt timeline in your terminal

USAGE:
    gantt-demo [OPTIONS]

OPTIONS:
    --tasks=N        Synthesize N tasks instead of the builtin three
    --width=COLS     Render width in columns (default: terminal width)
    --ascii          ASCII-only glyphs, for terminals without Unicode
    --help, -h       Show this help message
    --version, -V    Show version

KEYBINDINGS:
    Left / Right    Pan one day
    Up / Down       Pan one week
    + / -           Zoom in / out
    Tab             Select the next task
    h / l           Move the selected task one day
    H / L           Shrink / extend the selected task one day
    q / Ctrl+C      Quit

ENVIRONMENT VARIABLES:
    GANTT_DEMO_WIDTH    Override --width";

/// Parsed command-line options.
#[derive(Debug, Default)]
pub struct Opts {
    /// Number of synthesized tasks; `None` keeps the builtin demo.
    pub tasks: Option<usize>,
    /// Fixed render width; `None` follows the terminal.
    pub width: Option<u16>,
    /// ASCII-only output.
    pub ascii: bool,
}

impl Opts {
    /// Parse command-line arguments and environment variables.
    ///
    /// Environment variables take precedence over defaults but are
    /// overridden by explicit command-line flags.
    pub fn parse() -> Self {
        let mut opts = Self::default();

        if let Ok(val) = env::var("GANTT_DEMO_WIDTH")
            && let Ok(n) = val.parse()
        {
            opts.width = Some(n);
        }

        let args: Vec<String> = env::args().skip(1).collect();
        for arg in &args {
            match arg.as_str() {
                "--help" | "-h" => {
                    println!("{HELP_TEXT}");
                    process::exit(0);
                }
                "--version" | "-V" => {
                    println!("gantt-demo {VERSION}");
                    process::exit(0);
                }
                "--ascii" => {
                    opts.ascii = true;
                }
                other => {
                    if let Some(val) = other.strip_prefix("--tasks=") {
                        match val.parse() {
                            Ok(n) => opts.tasks = Some(n),
                            Err(_) => {
                                eprintln!("Invalid --tasks value: {val}");
                                process::exit(1);
                            }
                        }
                    } else if let Some(val) = other.strip_prefix("--width=") {
                        match val.parse() {
                            Ok(n) => opts.width = Some(n),
                            Err(_) => {
                                eprintln!("Invalid --width value: {val}");
                                process::exit(1);
                            }
                        }
                    } else {
                        eprintln!("Unknown argument: {other}");
                        eprintln!("Run with --help for usage information.");
                        process::exit(1);
                    }
                }
            }
        }

        opts
    }
}
