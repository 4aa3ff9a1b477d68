//! Guesscase CLI - guesses the capitalization of music titles, one per line.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use guesscase::config::Config;
use guesscase::{Mode, Options, Warning, normalize_title_with_warnings};
use rayon::prelude::*;
use similar::TextDiff;

/// Guesses the canonical capitalization of music release and track titles.
///
/// Every non-blank input line is one title.
#[derive(Parser, Debug)]
#[command(name = "guesscase")]
#[command(version, about, long_about = None)]
struct Args {
    /// Input file(s) with one title per line. Use - for stdin.
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Write normalized titles back to the input file(s).
    #[arg(short, long)]
    write: bool,

    /// Check if titles are already normalized (exit 1 if not).
    #[arg(short, long)]
    check: bool,

    /// Show a diff of the changes instead of the titles.
    #[arg(short, long)]
    diff: bool,

    /// Read input from stdin.
    #[arg(long)]
    stdin: bool,

    /// Capitalization mode: english, french, or sentence.
    #[arg(short, long)]
    mode: Option<String>,

    /// Leave roman numerals alone.
    #[arg(long)]
    no_roman_numerals: bool,

    /// Keep words typed in all capitals.
    #[arg(long)]
    keep_uppercase: bool,

    /// List the available modes and exit.
    #[arg(long)]
    list_modes: bool,

    /// Path to a configuration file (default: discover .guesscase.toml).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Error)
        .parse_default_env()
        .format_timestamp(None)
        .init();

    let args = Args::parse();

    if args.list_modes {
        for mode in Mode::ALL {
            println!("{:<10} {}", mode.id(), mode.description_text());
        }
        return ExitCode::SUCCESS;
    }

    let options = match load_options(&args) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let read_stdin = args.stdin
        || args.files.is_empty()
        || args.files.iter().all(|f| f.as_os_str() == "-");
    if read_stdin {
        let mut input = String::new();
        if let Err(e) = io::stdin().read_to_string(&mut input) {
            eprintln!("Error reading stdin: {}", e);
            return ExitCode::FAILURE;
        }

        let output = normalize_lines(&input, &options, "<stdin>");
        if args.check {
            if input != output {
                eprintln!("<stdin>: not normalized");
                return ExitCode::FAILURE;
            }
        } else if args.diff {
            print_diff(&input, &output, "<stdin>");
        } else {
            print!("{}", output);
        }
        return ExitCode::SUCCESS;
    }

    let mut all_normalized = true;
    for file in &args.files {
        let input = match fs::read_to_string(file) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Error reading {}: {}", file.display(), e);
                return ExitCode::FAILURE;
            }
        };

        let name = file.display().to_string();
        let output = normalize_lines(&input, &options, &name);
        if args.check {
            if input != output {
                eprintln!("{}: not normalized", name);
                all_normalized = false;
            }
        } else if args.write {
            if input != output {
                if let Err(e) = fs::write(file, &output) {
                    eprintln!("Error writing {}: {}", file.display(), e);
                    return ExitCode::FAILURE;
                }
            }
        } else if args.diff {
            print_diff(&input, &output, &name);
        } else {
            print!("{}", output);
        }
    }

    if args.check && !all_normalized {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Builds options from the configuration file, then applies flags.
fn load_options(args: &Args) -> Result<Options, Box<dyn std::error::Error>> {
    let config = match &args.config {
        Some(path) => Some(Config::from_file(path)?),
        None => {
            let cwd = std::env::current_dir()?;
            Config::discover(&cwd)?.map(|(_, config)| config)
        }
    };
    let mut options = match config {
        Some(config) => config.to_options()?,
        None => Options::default(),
    };

    if let Some(mode) = &args.mode {
        options.mode = mode.parse()?;
    }
    if args.no_roman_numerals {
        options.roman_numerals_uppercase = false;
    }
    if args.keep_uppercase {
        options.keep_uppercase = true;
    }
    Ok(options)
}

/// Normalizes each non-blank line, in parallel, reporting warnings to stderr.
fn normalize_lines(input: &str, options: &Options, source: &str) -> String {
    let lines: Vec<&str> = input.lines().collect();
    let results: Vec<(String, Vec<Warning>)> = lines
        .par_iter()
        .map(|line| {
            if line.trim().is_empty() {
                return (line.to_string(), Vec::new());
            }
            match normalize_title_with_warnings(line, options) {
                Ok(result) => (result.output, result.warnings),
                Err(e) => {
                    log::error!("{}", e);
                    (line.to_string(), Vec::new())
                }
            }
        })
        .collect();

    let mut output = String::with_capacity(input.len());
    for (i, (line, warnings)) in results.into_iter().enumerate() {
        report_warnings(source, i + 1, &warnings);
        if i > 0 {
            output.push('\n');
        }
        output.push_str(&line);
    }
    if input.ends_with('\n') {
        output.push('\n');
    }
    output
}

fn report_warnings(source: &str, line: usize, warnings: &[Warning]) {
    for warning in warnings {
        eprintln!("{}:{}: warning: {}", source, line, warning);
    }
}

fn print_diff(input: &str, output: &str, name: &str) {
    if input == output {
        return;
    }
    let diff = TextDiff::from_lines(input, output);
    print!(
        "{}",
        diff.unified_diff()
            .context_radius(1)
            .header(name, &format!("{} (normalized)", name))
    );
}
