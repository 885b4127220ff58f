use clap::Parser;
use owo_colors::{OwoColorize, Style};
use recur_core::error::CoreError;

mod cli;
mod commands;

fn main() {
    let cli = cli::Cli::parse();

    let result = match cli.command {
        cli::Commands::Next(command) => commands::next::next_command(command),
        cli::Commands::Check(command) => commands::check::check_command(command),
        cli::Commands::Preview(command) => commands::preview::preview_command(command),
    };

    if let Err(e) = result {
        handle_error(e);
        std::process::exit(1);
    }
}

fn handle_error(err: anyhow::Error) {
    let error_style = Style::new().red().bold();

    if let Some(core_error) = err.downcast_ref::<CoreError>() {
        match core_error {
            CoreError::Parse(parse_error) => {
                eprintln!("{} {}", "Error:".style(error_style), parse_error);
            }
            CoreError::Eval(eval_error) => {
                // The evaluator only fails on its defensive iteration bound;
                // reaching it from CLI input means an internal fault.
                eprintln!(
                    "{} internal: {}",
                    "Error:".style(error_style),
                    eval_error.to_string().yellow()
                );
            }
        }
    } else {
        eprintln!("{} {}", "Error:".style(error_style), err);
    }
}
