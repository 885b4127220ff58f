use clap::{Parser, Subcommand};

/// Diagnostic CLI for the recur recurrence-rule evaluator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Compute the next due date for a rule
    Next(NextCommand),
    /// Validate a rule and print its canonical form
    Check(CheckCommand),
    /// Print the upcoming occurrences of a rule
    Preview(PreviewCommand),
}

#[derive(Parser, Debug, Clone)]
pub struct NextCommand {
    /// The task's last scheduled date (YYYYMMDD)
    #[clap(short, long)]
    pub date: String,
    /// The repeat rule (e.g. "d 7", "w 1,5", "m -1")
    #[clap(short, long)]
    pub repeat: String,
    /// Evaluate against this date instead of today (YYYYMMDD)
    #[clap(short, long)]
    pub now: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct CheckCommand {
    /// The repeat rule to validate
    pub repeat: String,
}

#[derive(Parser, Debug, Clone)]
pub struct PreviewCommand {
    /// The task's last scheduled date (YYYYMMDD)
    #[clap(short, long)]
    pub date: String,
    /// The repeat rule (e.g. "d 7", "w 1,5", "m -1")
    #[clap(short, long)]
    pub repeat: String,
    /// How many occurrences to print
    #[clap(short, long, default_value_t = 5)]
    pub count: u32,
}
