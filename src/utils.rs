//! Token output helpers.

use anyhow::Context as _;
use colored::{ColoredString, Colorize};
use std::io::Write;
use std::io::{self, ErrorKind};

use crate::tokenizer::{Kind, Token};

/// How [`write_token`] renders a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// `Token(<kind>, '<content>', <line>:<column>[, cause='<error>'])`,
    /// colorized when colors are enabled
    #[default]
    Debug,
    /// One JSON object per line
    Json,
}

/// Write a single token followed by a newline to `writer`.
/// Silently returns `Ok(())` on broken pipe so that piping to tools like
/// `less` or `head` exits cleanly.
///
/// # Errors
///
/// Returns an error if writing to `writer` fails.
pub fn write_token<W: Write>(
    writer: &mut W,
    token: &Token<'_>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let result = (|| -> io::Result<()> {
        match format {
            OutputFormat::Debug => write_colored_token(writer, token)?,
            OutputFormat::Json => serde_json::to_writer(&mut *writer, token)?,
        }
        writeln!(writer)?;
        Ok(())
    })();

    match result {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == ErrorKind::BrokenPipe => Ok(()),
        Err(err) => Err(err).context("write token to stdout"),
    }
}

/// Same layout as the [`Token`] `Display` impl, with syntax highlighting.
fn write_colored_token<W: Write>(
    writer: &mut W,
    token: &Token<'_>,
) -> io::Result<()> {
    write!(
        writer,
        "Token({}, '{}', {}",
        paint_kind(token.kind),
        paint_content(token),
        token.location.to_string().dimmed()
    )?;
    if let Some(error) = token.error {
        write!(writer, ", cause='{}'", error.message().red().bold())?;
    }
    write!(writer, ")")
}

fn paint_kind(kind: Kind) -> ColoredString {
    let name = kind.name();
    match kind {
        Kind::Error => name.red().bold(),
        Kind::EndOfText => name.dimmed(),
        Kind::String => name.green(),
        Kind::Number | Kind::True | Kind::False => name.yellow(),
        Kind::Null => name.red().dimmed(),
        _ => name.cyan(),
    }
}

fn paint_content(token: &Token<'_>) -> ColoredString {
    match token.kind {
        Kind::Error => token.content.red().underline(),
        Kind::String => token.content.green(),
        Kind::Number | Kind::True | Kind::False => token.content.yellow(),
        _ => token.content.normal(),
    }
}
