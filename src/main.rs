use clap::Parser;

use termexam::cli::Cli;
use termexam::model::ModeName;
use termexam::session::{Session, SessionMode, DEFAULT_EXAM_SECS, DEFAULT_REVEAL_SECS};
use termexam::{parser, report, tui};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let cli = Cli::parse();

    let bank_path = std::path::Path::new(&cli.bank);
    let bank_hash = report::compute_file_hash(bank_path)?;

    let content = std::fs::read_to_string(bank_path)
        .map_err(|e| format!("Cannot read bank file: {}", e))?;

    let bank_filename = bank_path
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();

    let bank = parser::parse_bank(&content, &bank_filename, &bank_hash)
        .map_err(|e| e.to_string())?;

    if cli.check {
        report::print_bank_summary(&bank);
        return Ok(());
    }

    // CLI flags override the bank's frontmatter; drill is the fallback.
    let mode_name = cli
        .mode
        .map(ModeName::from)
        .or(bank.frontmatter.mode)
        .unwrap_or(ModeName::Drill);

    let mode = match mode_name {
        ModeName::Drill => SessionMode::RevealDrill {
            advance_window_secs: cli
                .reveal_seconds
                .or(bank.frontmatter.reveal_seconds)
                .unwrap_or(DEFAULT_REVEAL_SECS),
        },
        ModeName::Exam => SessionMode::TimedExam {
            total_secs: cli
                .duration_minutes
                .or(bank.frontmatter.duration_minutes)
                .map(|m| m * 60)
                .unwrap_or(DEFAULT_EXAM_SECS),
        },
    };

    let (session, timer_rx) = Session::start(bank, mode);

    let session = tui::run_tui(session, timer_rx)?;

    if let Some(ref export_path) = cli.export {
        match session.result() {
            Ok(result) => {
                report::export_result(&session, &result, export_path)?;
                eprintln!("Result exported to {}", export_path);
            }
            Err(_) => {
                eprintln!("Session was not finished; nothing exported.");
            }
        }
    }

    Ok(())
}
