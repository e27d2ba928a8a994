//! Commands over the stored message history.

use std::path::Path;

use colored::Colorize;
use serde::Serialize;
use smd_core::message::http_date;
use smd_core::DecodedMessage;
use tabled::Tabled;

use crate::context::AppContext;
use crate::output::{self, info, success, OutputFormat};

const PREVIEW_LEN: usize = 60;

/// A stored message as listed by `list`.
#[derive(Debug, Serialize, Tabled)]
pub struct MessageRow {
    /// Position in the history, 1 = oldest.
    #[tabled(rename = "#")]
    pub number: usize,
    /// Capture time.
    #[tabled(rename = "Time")]
    pub time: String,
    /// Parameter that carried the message.
    #[tabled(rename = "Parameter")]
    pub parameter: String,
    /// Binding.
    #[tabled(rename = "Binding")]
    pub binding: String,
    /// Start of the decoded content.
    #[tabled(rename = "Content")]
    pub preview: String,
}

impl MessageRow {
    fn new(number: usize, message: &DecodedMessage) -> Self {
        Self {
            number,
            time: http_date::format(&message.time),
            parameter: message.parameter.to_string(),
            binding: message.binding.to_string(),
            preview: preview(&message.content),
        }
    }
}

/// Lists stored messages, oldest first.
pub fn run_list(ctx: &AppContext, format: OutputFormat) -> crate::CliResult<()> {
    let messages = ctx.store.list();

    match format {
        // Same document `export` writes.
        OutputFormat::Json => println!("{}", ctx.store.export_json()?),
        _ => {
            let rows: Vec<MessageRow> = messages
                .iter()
                .enumerate()
                .map(|(i, m)| MessageRow::new(i + 1, m))
                .collect();
            output::output(&rows, format)?;
        }
    }

    Ok(())
}

/// Shows one stored message by its 1-based number.
pub fn run_show(index: usize, ctx: &AppContext, format: OutputFormat) -> crate::CliResult<()> {
    let message = index
        .checked_sub(1)
        .and_then(|i| ctx.store.get(i))
        .ok_or(crate::CliError::NotFound(index))?;

    print_message(&message, format)
}

/// Removes every stored message.
pub fn run_clear(ctx: &AppContext) -> crate::CliResult<()> {
    let count = ctx.store.len();
    ctx.store.clear()?;
    success(&format!("Cleared {count} stored message(s)"));
    Ok(())
}

/// Writes the history as a JSON array.
pub fn run_export(output_file: &Path, ctx: &AppContext) -> crate::CliResult<()> {
    let json = ctx.store.export_json()?;
    std::fs::write(output_file, json)?;

    if ctx.store.is_empty() {
        info("History is empty; wrote an empty array.");
    }
    success(&format!(
        "Exported {} message(s) to {}",
        ctx.store.len(),
        output_file.display()
    ));
    Ok(())
}

/// Prints a decoded message with its metadata.
pub(crate) fn print_message(message: &DecodedMessage, format: OutputFormat) -> crate::CliResult<()> {
    match format {
        OutputFormat::Table => {
            println!("{} {}", "Time:".bold(), http_date::format(&message.time));
            println!("{} {}", "Parameter:".bold(), message.parameter);
            println!("{} {}", "Binding:".bold(), message.binding);
            if !message.parameters.is_empty() {
                println!("{}", "Parameters:".bold());
                for p in &message.parameters {
                    println!("  {} = {}", p.name, p.value);
                }
            }
            println!();
            println!("{}", message.content);
            Ok(())
        }
        other => output::output_single(message, other),
    }
}

/// First line of the content, cut to the preview length.
fn preview(content: &str) -> String {
    let line = content.lines().next().unwrap_or_default().trim();
    if line.chars().count() > PREVIEW_LEN {
        let cut: String = line.chars().take(PREVIEW_LEN).collect();
        format!("{cut}…")
    } else {
        line.to_string()
    }
}
