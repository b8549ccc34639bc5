use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use thiserror::Error;

use pollscore::config::{Config, ConfigError};
use pollscore::ledger::{
    AllocationLedger, Competition, CompetitionSummary, JudgeContext, LedgerError, MyPolls,
    ParticipantId,
};
use pollscore::ranker::{Leaderboard, LeaderboardRow};
use pollscore::subscriber::{self, LoggingError};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error reading '{0}': {1}")]
    Io(String, std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Logging(#[from] LoggingError),
}

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// JSON in the backend's wire shape.
    Json,
}

#[derive(Parser)]
#[command(name = "pollscore")]
#[command(about = "Distribute a poll's point budget and rank competition results")]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, global = true, env = "POLLSCORE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a judge's allocation and print the submission payload
    Allocate {
        /// Competition document (JSON, as returned by the competition endpoint)
        competition: PathBuf,

        /// Identifier of the judging user, excluded from self-scoring
        #[arg(long)]
        judge: Option<u64>,

        /// Points for a participant, as ID=POINTS (repeatable)
        #[arg(long = "score", value_parser = parse_assignment)]
        scores: Vec<(u64, String)>,

        /// Feedback for a participant, as ID=TEXT (repeatable)
        #[arg(long = "feedback", value_parser = parse_assignment)]
        feedback: Vec<(u64, String)>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Rank a results document into a leaderboard
    Leaderboard {
        /// Results document (JSON array of score records)
        scores: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Show which competitions still need the judge's poll
    Polls {
        /// Poll overview document (JSON with `voted` and `not_voted` lists)
        polls: PathBuf,

        /// Report the status of a single competition
        #[arg(long)]
        competition: Option<u64>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

fn main() -> Result<(), AppError> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    subscriber::init(&config.logging)?;

    match cli.command {
        Commands::Allocate {
            competition,
            judge,
            scores,
            feedback,
            format,
        } => allocate(&config, &competition, judge, &scores, &feedback, format),
        Commands::Leaderboard { scores, format } => leaderboard(&config, &scores, format),
        Commands::Polls {
            polls,
            competition,
            format,
        } => my_polls(&polls, competition, format),
    }
}

fn allocate(
    config: &Config,
    path: &Path,
    judge: Option<u64>,
    scores: &[(u64, String)],
    feedback: &[(u64, String)],
    format: OutputFormat,
) -> Result<(), AppError> {
    let competition = Competition::from_json(&read_file(path)?)?;
    let context = judge.map(JudgeContext::new).unwrap_or_default();

    let mut ledger = AllocationLedger::initialize(
        &competition.participants,
        context.excluded(&config.ledger),
        competition.budget(config.ledger.default_budget),
    )?;
    for (id, raw) in scores {
        ledger.set_score_input(ParticipantId(*id), raw)?;
    }
    for (id, text) in feedback {
        ledger.set_feedback(ParticipantId(*id), text.as_str())?;
    }

    if let OutputFormat::Text = format {
        print_allocation(&competition, &ledger);
    }

    let submission = ledger.to_submission()?;
    match format {
        OutputFormat::Text => println!("Submission ready ({} points)", submission.total()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&submission)?),
    }
    Ok(())
}

fn leaderboard(config: &Config, path: &Path, format: OutputFormat) -> Result<(), AppError> {
    let board = Leaderboard::from_json(&read_file(path)?, config.ranking.clone());

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&board.report())?),
        OutputFormat::Text => {
            if board.is_empty() {
                println!("No results yet");
                return Ok(());
            }
            print_header(board.column_count());
            for row in board.rows() {
                print_row(&row);
            }
        }
    }
    Ok(())
}

fn my_polls(path: &Path, competition: Option<u64>, format: OutputFormat) -> Result<(), AppError> {
    let polls: MyPolls = serde_json::from_str(&read_file(path)?)?;

    if let Some(id) = competition {
        let status = polls.status(id);
        match format {
            OutputFormat::Text => println!("{status}"),
            OutputFormat::Json => println!(
                "{}",
                serde_json::json!({ "competition": id, "status": status, "needs_poll": status.needs_poll() })
            ),
        }
        return Ok(());
    }

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&polls)?),
        OutputFormat::Text => {
            print_summaries("To vote", &polls.not_voted);
            print_summaries("Voted", &polls.voted);
        }
    }
    Ok(())
}

fn print_summaries(heading: &str, competitions: &[CompetitionSummary]) {
    println!("{heading}:");
    if competitions.is_empty() {
        println!("  (none)");
    }
    for competition in competitions {
        println!("  {:<6} {}", competition.id, competition.title);
    }
}

fn read_file(path: &Path) -> Result<String, AppError> {
    std::fs::read_to_string(path).map_err(|e| AppError::Io(path.display().to_string(), e))
}

fn parse_assignment(s: &str) -> Result<(u64, String), String> {
    let (id, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected ID=VALUE, got '{s}'"))?;
    let id = id
        .trim()
        .parse::<u64>()
        .map_err(|e| format!("invalid participant id '{id}': {e}"))?;
    Ok((id, value.to_string()))
}

fn print_allocation(competition: &Competition, ledger: &AllocationLedger) {
    if !competition.title.is_empty() {
        println!("{}", competition.title);
    }
    for participant in &competition.participants {
        let Some(entry) = ledger.entry(participant.key()) else {
            continue;
        };
        println!("  {:<20} {:>6}", participant.username, entry.score);
    }
    println!("Remaining points: {}", ledger.remaining_points());
}

fn print_header(columns: usize) {
    let mut line = format!("{:<4} {:<20}", "#", "Participant");
    for column in 1..=columns {
        line.push_str(&format!(" {:>12}", format!("S{column}")));
    }
    line.push_str(&format!(" {:>8}", "Total"));
    println!("{line}");
}

fn print_row(row: &LeaderboardRow) {
    let name = if row.podium.is_podium() {
        format!("{} ({})", row.username, row.podium.badge())
    } else {
        row.username.clone()
    };

    let mut line = format!("{:<4} {:<20}", row.position, name);
    for cell in &row.cells {
        let text = match cell.score {
            Some(score) => {
                let best = if cell.best { "*" } else { "" };
                format!("{}{best}({})", format_score(score), cell.tier)
            }
            None => "-".to_string(),
        };
        line.push_str(&format!(" {:>12}", text));
    }
    line.push_str(&format!(" {:>8}", format_score(row.total_score)));
    println!("{line}");

    for feedback in &row.feedback {
        println!("       - {feedback}");
    }
}

fn format_score(score: f64) -> String {
    if score.fract() == 0.0 && score.abs() < 1e15 {
        format!("{score:.0}")
    } else {
        format!("{score}")
    }
}
