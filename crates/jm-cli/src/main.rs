mod input;

use std::{
    io::{self, Write},
    path::PathBuf,
    process::ExitCode,
    time::{Duration, Instant},
};

use clap::Parser;
use dotenvy::dotenv;
use jm_core::{
    MatchResult, MatchingConfig, MatchingEngine,
    logging::{init_tracing_subscriber, install_tracing_panic_hook},
};
use tracing::{error, info};

use input::{CliError, load_candidate, load_education_levels, load_jobs, load_synonyms};

#[derive(Debug, Parser)]
#[command(
    name = "jm-rank",
    about = "Rank job postings against a candidate profile"
)]
struct Cli {
    /// Candidate profile JSON (skills, experience, education, location)
    #[arg(long, env = "JM_CANDIDATE")]
    candidate: PathBuf,

    /// JSON array of job postings
    #[arg(long, env = "JM_JOBS")]
    jobs: PathBuf,

    /// Replacement synonym table: [{"canonical": .., "spellings": [..]}]
    #[arg(long, env = "JM_SYNONYMS")]
    synonyms: Option<PathBuf>,

    /// Replacement education level table: [["keyword", level], ..]
    #[arg(long, env = "JM_EDUCATION_LEVELS")]
    education_levels: Option<PathBuf>,

    /// Only print the best N matches
    #[arg(long)]
    top: Option<usize>,

    /// Stop scoring after this many milliseconds and print what is ready
    #[arg(long, env = "JM_DEADLINE_MS")]
    deadline_ms: Option<u64>,

    #[arg(long)]
    pretty: bool,
}

fn main() -> ExitCode {
    dotenv().ok();
    init_tracing_subscriber("jm-rank");
    install_tracing_panic_hook("jm-rank");

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "ranking failed");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let engine = MatchingEngine::new(
        MatchingConfig::from_env(),
        load_synonyms(cli.synonyms.as_deref())?,
        load_education_levels(cli.education_levels.as_deref())?,
    )?;

    let candidate = load_candidate(&cli.candidate)?;
    let jobs = load_jobs(&cli.jobs)?;
    info!(jobs = jobs.len(), "loaded job pool");

    let mut results = match cli.deadline_ms {
        Some(ms) => {
            let deadline = Instant::now() + Duration::from_millis(ms);
            engine.rank_json_until(&candidate, &jobs, deadline)
        }
        None => engine.rank_json(&candidate, &jobs),
    };

    if let Some(top) = cli.top {
        results.truncate(top);
    }

    write_results(&results, cli.pretty)
}

fn write_results(results: &[MatchResult], pretty: bool) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let written = if pretty {
        serde_json::to_writer_pretty(&mut out, results)
    } else {
        serde_json::to_writer(&mut out, results)
    };
    written.map_err(CliError::Output)?;
    let _ = writeln!(out);
    Ok(())
}
