//! Settings commands.

use smd_core::{ScrollingDirection, EXTENDED_MAX_STORED_MESSAGES};

use crate::cli::ConfigCommand;
use crate::context::AppContext;
use crate::output::{self, info, success, warning, OutputFormat};

/// Runs a settings command.
pub fn run_config(cmd: ConfigCommand, ctx: &AppContext, format: OutputFormat) -> crate::CliResult<()> {
    match cmd {
        ConfigCommand::Show => show_settings(ctx, format),
        ConfigCommand::SetMax { max } => set_max(ctx, max),
        ConfigCommand::Scrolling { direction } => set_scrolling(ctx, direction.into()),
        ConfigCommand::Path => {
            println!("{}", ctx.settings.path().display());
            Ok(())
        }
    }
}

fn show_settings(ctx: &AppContext, format: OutputFormat) -> crate::CliResult<()> {
    let settings = ctx.settings.load()?;

    if format == OutputFormat::Table {
        info(&format!("Settings file: {}", ctx.settings.path().display()));
        println!();
    }
    output::output_single(&settings, format)
}

fn set_max(ctx: &AppContext, max: usize) -> crate::CliResult<()> {
    if max == 0 {
        return Err(crate::CliError::InvalidArgument(
            "maximum number of stored messages must be at least 1".to_string(),
        ));
    }

    ctx.settings.update(|s| s.max_number_of_stored_messages = max)?;

    if max > EXTENDED_MAX_STORED_MESSAGES {
        warning(&format!(
            "Keeping more than {EXTENDED_MAX_STORED_MESSAGES} messages may slow down the viewer"
        ));
    }
    if ctx.store.len() > max {
        info("Older messages are removed with the next captured message.");
    }
    success(&format!("Maximum number of stored messages set to {max}"));
    Ok(())
}

fn set_scrolling(ctx: &AppContext, direction: ScrollingDirection) -> crate::CliResult<()> {
    ctx.settings.update(|s| s.scrolling_direction = direction)?;
    success(&format!("Scrolling direction set to {direction}"));
    Ok(())
}
