mod report;

use clap::Parser;
use log::{debug, warn};
use multihasher::{
    reader::buffering::Buffering, session::DEFAULT_THREADS, Algorithm, BatchResult, Options,
    Session, E,
};
use report::{Layout, Report};
use std::{path::PathBuf, process::ExitCode};

const EXIT_SUCCESS: u8 = 0;
const EXIT_FAILED_FILES: u8 = 1;
const EXIT_BAD_CONFIGURATION: u8 = 2;

/// Efficient hashing of multiple files.
///
/// Each file is read one block at a time and only once, while MD5, SHA1, SHA256, SHA512 and the
/// Shannon entropy of the content are calculated. Several files are hashed at the same time.
#[derive(Parser, Debug)]
#[command(name = "hasher", version)]
struct Cli {
    /// maximum number of threads
    #[arg(short, long, value_name = "N", default_value_t = DEFAULT_THREADS, value_parser = positive_int)]
    threads: usize,

    /// tab separated
    #[arg(long)]
    tab: bool,

    /// one or more files to hash
    #[arg(value_name = "FILENAME", required = true, num_args = 1..)]
    filenames: Vec<PathBuf>,
}

fn positive_int(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(format!("{value:?} is not a positive integer")),
    }
}

fn session(cli: &Cli) -> Result<Session, E> {
    let mut filenames: Vec<PathBuf> = Vec::with_capacity(cli.filenames.len());
    for filename in cli.filenames.iter() {
        if filenames.contains(filename) {
            warn!("{} is listed more than once; hashed one time", filename.display());
        } else {
            filenames.push(filename.clone());
        }
    }
    let mut opt = Options::new();
    opt.paths(filenames)?.threads(cli.threads)?;
    for algorithm in Algorithm::DEFAULTS.iter().chain([Algorithm::Entropy].iter()) {
        opt.algorithm(*algorithm)?;
    }
    Ok(opt.session()?)
}

/// Exit status of the run: `0` if each file is hashed, `1` if some file failed or hashing broke
/// down, `2` if nothing was hashed because of invalid arguments.
fn status(results: &Result<BatchResult, E>) -> u8 {
    match results {
        Ok(results) if results.failed() > 0 => EXIT_FAILED_FILES,
        Ok(_) => EXIT_SUCCESS,
        Err(err) if err.is_config() => EXIT_BAD_CONFIGURATION,
        Err(_) => EXIT_FAILED_FILES,
    }
}

fn run(cli: &Cli) -> Result<BatchResult, E> {
    let session = session(cli)?;
    debug!("Using {} threads", cli.threads.min(session.count()));
    let results = session.hash::<Buffering>()?;
    let mut report = Report::new(&session.algorithms());
    for (path, outcome) in results.iter() {
        report.push(path, outcome);
    }
    println!(
        "{}",
        report.render(if cli.tab { Layout::Tab } else { Layout::Aligned })
    );
    Ok(results)
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    let results = run(&cli);
    if let Err(err) = &results {
        eprintln!("hasher: {err}");
    }
    ExitCode::from(status(&results))
}
