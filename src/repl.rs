//! The interactive read-eval-print loop
//!
//! Reads lines from any async buffered reader, dispatches them to the `App`
//! and keeps going after failed commands. The loop ends on `exit` or at end
//! of input.

use rand::Rng;
use std::io::{self, Write};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::warn;

use crate::app::{App, Flow};
use crate::commands::{clean_input, Command};

/// Prompt printed before every line of input
pub const PROMPT: &str = "Pokedex > ";

/// Runs the REPL until `exit` or end of input
///
/// # Arguments
/// * `app` - The application context commands run against
/// * `input` - Source of command lines (stdin in the binary)
/// * `out` - Destination for prompts and command output
///
/// # Returns
/// * `Ok(())` when the loop ends normally
/// * `Err` if reading input or writing a prompt fails
pub async fn run<R, I, W>(app: &mut App<R>, input: I, out: &mut W) -> io::Result<()>
where
    R: Rng,
    I: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();

    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            writeln!(out)?;
            break;
        };

        let words = clean_input(&line);
        let Some((name, args)) = words.split_first() else {
            writeln!(out, "Empty command, Please enter a command")?;
            continue;
        };

        let Some(command) = Command::parse(name, args) else {
            writeln!(out, "Unknown command: {}", name)?;
            continue;
        };

        match app.execute(command, out).await {
            Ok(Flow::Exit) => break,
            Ok(Flow::Continue) => {}
            Err(e) => {
                warn!(command = %name, error = %e, "Command failed");
                writeln!(out, "Error executing command {}: {}", name, e)?;
            }
        }
    }

    Ok(())
}
