use clap::Parser;

use crate::model::ModeName;

#[derive(Parser, Debug)]
#[command(name = "termexam", version, about = "Terminal-based timed assessment runner")]
pub struct Cli {
    /// Path to the question bank file
    pub bank: String,

    /// Session mode, overriding the bank's default
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Exam clock in minutes [default: 30]
    #[arg(long, value_name = "minutes")]
    pub duration_minutes: Option<i64>,

    /// Auto-advance window in seconds after a reveal [default: 30]
    #[arg(long, value_name = "seconds")]
    pub reveal_seconds: Option<i64>,

    /// Validate and summarize the bank without starting a session
    #[arg(long)]
    pub check: bool,

    /// Write the finished session's result to this YAML file
    #[arg(long, value_name = "path")]
    pub export: Option<String>,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
pub enum ModeArg {
    Drill,
    Exam,
}

impl From<ModeArg> for ModeName {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Drill => ModeName::Drill,
            ModeArg::Exam => ModeName::Exam,
        }
    }
}
