use anyhow::Result;
use chrono::Local;
use recur_core::{next_date, parse_wire_date, CoreError};

use crate::cli::NextCommand;

pub fn next_command(command: NextCommand) -> Result<()> {
    let now = match &command.now {
        Some(raw) => parse_wire_date(raw).map_err(CoreError::from)?,
        None => Local::now().date_naive(),
    };
    let next = next_date(now, &command.date, &command.repeat)?;
    println!("{}", next);
    Ok(())
}
