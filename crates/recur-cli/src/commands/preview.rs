use anyhow::Result;
use recur_core::{format_wire_date, next_occurrence, parse_wire_date, CoreError, Rule};

use crate::cli::PreviewCommand;

/// Prints the next `count` occurrences by feeding each computed date back in
/// as the new last-scheduled date, the same chaining the "mark done"
/// workflow performs one completion at a time.
pub fn preview_command(command: PreviewCommand) -> Result<()> {
    let rule = command.repeat.parse::<Rule>().map_err(CoreError::from)?;
    let mut last = parse_wire_date(&command.date).map_err(CoreError::from)?;

    for _ in 0..command.count {
        let next = next_occurrence(last, last, &rule).map_err(CoreError::from)?;
        println!("{}", format_wire_date(next));
        last = next;
    }
    Ok(())
}
