use std::fmt;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use services::{
    AnswerOutcome, CertificateRenderer, CertificateView, Clock, NavOutcome, ResetOutcome,
    TextCertificate, TrainingConfig, TrainingSession,
};
use storage::{AttemptRecord, CsvAttemptLog, DurationSecs};
use training_core::catalog::{self, Scenario};
use training_core::model::Page;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    UnknownScenario(String),
    UnreadableScenario { path: String, reason: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::UnknownScenario(slug) => {
                write!(f, "unknown scenario: {slug} (built-in: factoring-law, data-protection)")
            }
            ArgsError::UnreadableScenario { path, reason } => {
                write!(f, "could not load scenario file {path}: {reason}")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct Args {
    log_path: PathBuf,
    domain: String,
    scenario: Scenario,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--log <path>] [--scenario <slug>]");
    eprintln!("                      [--scenario-file <path>] [--domain <suffix>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --log training_log.csv");
    eprintln!("  --scenario factoring-law   (or: data-protection)");
    eprintln!("  --domain @myfiducia.com");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  TRAINING_LOG, TRAINING_SCENARIO, TRAINING_DOMAIN");
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut log_path = std::env::var("TRAINING_LOG")
            .map_or_else(|_| PathBuf::from("training_log.csv"), PathBuf::from);
        let mut domain =
            std::env::var("TRAINING_DOMAIN").unwrap_or_else(|_| "@myfiducia.com".to_owned());
        let mut slug =
            std::env::var("TRAINING_SCENARIO").unwrap_or_else(|_| "factoring-law".to_owned());
        let mut scenario_file: Option<String> = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--log" => log_path = PathBuf::from(require_value(args, "--log")?),
                "--domain" => domain = require_value(args, "--domain")?,
                "--scenario" => slug = require_value(args, "--scenario")?,
                "--scenario-file" => scenario_file = Some(require_value(args, "--scenario-file")?),
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        let scenario = match scenario_file {
            Some(path) => {
                let raw = fs::read_to_string(&path).map_err(|e| ArgsError::UnreadableScenario {
                    path: path.clone(),
                    reason: e.to_string(),
                })?;
                Scenario::from_json(&raw).map_err(|e| ArgsError::UnreadableScenario {
                    path,
                    reason: e.to_string(),
                })?
            }
            None => catalog::by_slug(&slug).ok_or(ArgsError::UnknownScenario(slug))?,
        };

        Ok(Self {
            log_path,
            domain,
            scenario,
        })
    }
}

fn prompt(line: &str) -> io::Result<String> {
    print!("{line}");
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;
    Ok(input.trim().to_owned())
}

fn render_progress(session: &TrainingSession) {
    let progress = session.progress();
    println!(
        "\n[{}] progress {}/{} | score {}",
        session.scenario().title(),
        progress.answered,
        progress.total,
        progress.score
    );
}

fn render_intake(session: &mut TrainingSession) -> io::Result<bool> {
    println!("\nWelcome to the {}.", session.scenario().title());
    println!("Answer every question; incorrect answers score 0 and cannot be retried.");
    println!("Reach 80% to earn your certificate.\n");

    loop {
        let name = prompt("Full name (q to quit): ")?;
        if name == "q" {
            return Ok(true);
        }
        let email = prompt("Official email: ")?;
        match session.begin(&name, &email) {
            Ok(()) => return Ok(false),
            Err(err) => println!("{err}"),
        }
    }
}

fn render_question(session: &mut TrainingSession, number: usize) -> io::Result<bool> {
    let question = session
        .current_question()
        .expect("cursor is on a question page");
    println!("\nQuestion {number}: {}", question.prompt());
    for (i, choice) in question.choices().iter().enumerate() {
        println!("  {}. {choice}", i + 1);
    }
    let choice_count = question.choices().len();
    if session.state().is_completed(question.id()) {
        println!("(already completed)");
    }

    let input = prompt("Answer number, or n/p/r/q: ")?;
    match input.as_str() {
        "q" => return Ok(true),
        "n" => match session.go_next() {
            NavOutcome::Moved(_) => {}
            NavOutcome::Blocked { message } => println!("{message}"),
        },
        "p" => {
            if let NavOutcome::Blocked { message } = session.go_previous() {
                println!("{message}");
            }
        }
        "r" => run_reset(session)?,
        other => match other.parse::<usize>() {
            Ok(n) if n >= 1 && n <= choice_count => match session.submit_answer(n - 1) {
                AnswerOutcome::Graded { message, points_awarded, .. } => {
                    println!("{message} (+{points_awarded} points)");
                }
                AnswerOutcome::AlreadyAnswered => {
                    println!("This question is already completed.");
                }
                AnswerOutcome::NotAQuestion => {}
            },
            _ => println!("Please enter a choice number."),
        },
    }
    Ok(false)
}

fn run_reset(session: &mut TrainingSession) -> io::Result<()> {
    if session.reset(false) != ResetOutcome::ConfirmationRequired {
        return Ok(());
    }
    let answer = prompt("Are you sure? All progress will be lost. (yes/no): ")?;
    match session.reset(answer == "yes") {
        ResetOutcome::ResetDone => println!("Simulator reset."),
        _ => println!("Reset cancelled."),
    }
    Ok(())
}

fn render_certificate(session: &mut TrainingSession) -> io::Result<bool> {
    match session.view_certificate() {
        CertificateView::Incomplete { completed, total } => {
            println!("\nYou have completed {completed} / {total} questions.");
            println!("Please complete all questions to unlock your certificate.");
        }
        CertificateView::Passed { certificate } => {
            let bytes = TextCertificate
                .render(&certificate)
                .unwrap_or_else(|_| Vec::new());
            println!("\n{}", String::from_utf8_lossy(&bytes));
            println!("Congratulations! Enter d to save the certificate to certificate.txt.");
        }
        CertificateView::Failed { score, threshold } => {
            println!("\nCourse completed, but your score of {score} is below the");
            println!("passing threshold ({threshold:.0} points).");
            println!("Reset (r) and try again to demonstrate your mastery of the material.");
        }
    }

    let input = prompt("d/save, n/leaderboard, p/back, r/reset, q/quit: ")?;
    match input.as_str() {
        "q" => return Ok(true),
        "d" => {
            let bytes = TextCertificate.render(&session.certificate_data());
            match bytes.and_then(|b| fs::write("certificate.txt", b).map_err(Into::into)) {
                Ok(()) => println!("Saved to certificate.txt."),
                Err(err) => println!("Could not save the certificate: {err}"),
            }
        }
        "n" => {
            session.go_next();
        }
        "p" => {
            session.go_previous();
        }
        "r" => run_reset(session)?,
        _ => {}
    }
    Ok(false)
}

fn format_duration(duration: DurationSecs) -> String {
    match duration.known() {
        Some(seconds) => {
            let minutes = (seconds / 60.0) as u64;
            let rest = (seconds % 60.0) as u64;
            format!("{minutes}m {rest}s")
        }
        None => "N/A".to_owned(),
    }
}

fn render_leaderboard(session: &mut TrainingSession) -> io::Result<bool> {
    println!("\n=== Hall of Fame ===");
    let board = session.leaderboard();
    if board.is_empty() {
        println!("No records found yet. Be the first!");
    } else {
        for (rank, record) in board.iter().enumerate() {
            let AttemptRecord { name, email, score, duration, .. } = record;
            println!(
                "{:>3}. {name} <{email}> - {score} points in {}",
                rank + 1,
                format_duration(*duration)
            );
        }
    }

    let input = prompt("p/back, r/reset, q/quit: ")?;
    match input.as_str() {
        "q" => return Ok(true),
        "p" => {
            session.go_previous();
        }
        "r" => run_reset(session)?,
        _ => {}
    }
    Ok(false)
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let args = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let log = Arc::new(CsvAttemptLog::open(args.log_path));
    log::info!("training log at {}", log.path().display());
    let mut session = TrainingSession::new(
        args.scenario,
        TrainingConfig::new(args.domain),
        Clock::default_clock(),
        log,
    );

    loop {
        render_progress(&session);
        let done = match session.cursor() {
            Page::Intake => render_intake(&mut session)?,
            Page::Question(number) => render_question(&mut session, number)?,
            Page::Certificate => render_certificate(&mut session)?,
            Page::Leaderboard => render_leaderboard(&mut session)?,
        };
        if done {
            return Ok(());
        }
    }
}

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
