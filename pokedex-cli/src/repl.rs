//! Read/evaluate/print loop.

use std::io::Write;

use colored::*;
use rand::Rng;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, warn};

use pokedex_core::error::Result;

use crate::commands::{CommandTable, Flow, Session};

const PROMPT: &str = "Pokedex > ";

/// Splits user input into lowercase words, dropping surrounding whitespace.
pub fn clean_input(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}

/// Runs the loop until `exit` or end of input.
///
/// Command errors are printed and the loop carries on; only failures to
/// read input or write output end it early.
pub async fn run<R, I>(
    table: &CommandTable,
    session: &mut Session<'_, R>,
    input: I,
    out: &mut dyn Write,
) -> Result<()>
where
    R: Rng,
    I: AsyncBufRead + Unpin,
{
    if let Some(help) = table.get("help") {
        session.run(table, help, &[], out).await?;
    }

    let mut lines = input.lines();
    loop {
        write!(out, "\n{}", PROMPT)?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            debug!("End of input");
            writeln!(out)?;
            if let Some(exit) = table.get("exit") {
                session.run(table, exit, &[], out).await?;
            }
            return Ok(());
        };

        let words = clean_input(&line);
        let Some((name, args)) = words.split_first() else {
            continue;
        };

        let Some(command) = table.get(name) else {
            writeln!(out, "Unknown command")?;
            continue;
        };

        match session.run(table, command, args, out).await {
            Ok(Flow::Continue) => {}
            Ok(Flow::Exit) => return Ok(()),
            Err(e) => {
                if !e.is_user_error() {
                    warn!(command = command.name, error = %e, "Command failed");
                }
                writeln!(out, "{} {}", "error:".red().bold(), e)?;
                if e.is_recoverable() {
                    writeln!(out, "{}", "The request may succeed if you try again.".yellow())?;
                }
            }
        }
    }
}
