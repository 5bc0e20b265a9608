mod count;
mod error;
mod input;
mod report;
mod substring_types;
mod suffix_automaton;

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;
use clap::Parser;

use count::Algorithm;
use error::Result;
use report::OutputFormat;

const DEFAULT_TOP: usize = 10; // entries printed after the total
const DEFAULT_MIN_LENGTH: usize = 4; // shortest substring that is counted

/// Counts all substrings of at least four characters in every word of a file
/// and prints the most frequent ones with their share of the total.
#[derive(Parser, Debug)]
#[command(name = "substring-counter", version)]
struct Args {
    /// Text file to read
    file: Option<PathBuf>,

    /// Extra positional arguments are accepted and ignored
    #[arg(hide = true)]
    _ignored: Vec<String>,

    /// Number of most frequent substrings to print
    #[arg(long, default_value_t = DEFAULT_TOP)]
    top: usize,

    /// Shortest substring length that is counted
    #[arg(long, default_value_t = DEFAULT_MIN_LENGTH as u64, value_parser = clap::value_parser!(u64).range(1..))]
    min_length: u64,

    #[arg(long, value_enum, default_value_t = OutputFormat::Plain)]
    format: OutputFormat,

    /// Encoding label used to decode the file (utf-8, latin1, shift_jis, ...)
    #[arg(long, default_value = "utf-8")]
    encoding: String,

    #[arg(long, value_enum, default_value_t = Algorithm::Enumerate)]
    algorithm: Algorithm,

    /// Spread counting over all cores
    #[arg(long, conflicts_with = "algorithm")]
    parallel: bool,
}

/// Settings of one counting run
#[derive(Debug, Clone)]
struct Config {
    file: PathBuf,
    top: usize,
    min_length: usize,
    format: OutputFormat,
    encoding: String,
    algorithm: Algorithm,
    parallel: bool,
}

impl Args {
    /// `None` when the input file was not given.
    fn into_config(self) -> Option<Config> {
        Some(Config {
            file: self.file?,
            top: self.top,
            min_length: self.min_length as usize,
            format: self.format,
            encoding: self.encoding,
            algorithm: self.algorithm,
            parallel: self.parallel,
        })
    }
}

fn print_usage<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "Usage:")?;
    writeln!(out, "substring-counter <file>")?;
    writeln!(out, "Counts number of all substrings longer than 3 in that file.")?;
    writeln!(out, "Prints percentage of substring occurrence frequencies.")
}

fn missing_argument<W: Write>(out: &mut W) -> ExitCode {
    let _ = writeln!(out, "Error! Need at least one argument.");
    let _ = print_usage(out);
    let _ = out.flush();
    ExitCode::from(1)
}

fn run<W: Write>(config: &Config, out: &mut W) -> Result<()> {
    let encoding = input::resolve_encoding(&config.encoding)?;
    let text = input::read_text(&config.file, encoding)?;

    let start = Instant::now();
    let table = match (config.algorithm, config.parallel) {
        (Algorithm::SuffixAutomaton, _) => suffix_automaton::count(&text, config.min_length),
        (Algorithm::Enumerate, true) => count::count_parallel(&text, config.min_length),
        (Algorithm::Enumerate, false) => count::count(&text, config.min_length),
    };
    log::info!(
        "Counted {} substrings ({} distinct) in {:.2?}",
        table.total(),
        table.len(),
        start.elapsed()
    );
    if table.is_empty() {
        log::warn!("No word in '{}' has {} or more characters", config.file.display(), config.min_length);
    }

    let report = report::rank(&table, config.top);
    report::render(out, &report, config.format, config.min_length)?;
    out.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let Some(config) = Args::parse().into_config() else {
        return missing_argument(&mut io::stdout().lock());
    };
    log::debug!("{:?}", config);

    let mut stdout = BufWriter::new(io::stdout().lock());
    match run(&config, &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}
