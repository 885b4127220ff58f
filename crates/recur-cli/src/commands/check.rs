use anyhow::Result;
use recur_core::{CoreError, Rule};

use crate::cli::CheckCommand;

pub fn check_command(command: CheckCommand) -> Result<()> {
    let rule = command.repeat.parse::<Rule>().map_err(CoreError::from)?;
    println!("{}", rule);
    Ok(())
}
