//! Terminal detection utilities.
//!
//! TTY, width and colour detection shared by every `fm` report. Piped
//! output is plain text.

use std::env;

/// Returns `true` if stdout is connected to a terminal (TTY).
pub fn is_tty() -> bool {
    crossterm::tty::IsTty::is_tty(&std::io::stdout())
}

/// Returns the terminal width in columns, defaulting to 80 if detection fails.
pub fn terminal_width() -> usize {
    crossterm::terminal::size()
        .map(|(cols, _rows)| cols as usize)
        .unwrap_or(80)
}

/// Determines if ANSI color codes should be used.
///
/// Respects standard conventions, in this order:
/// - `NO_COLOR` (any value): disables color (<https://no-color.org/>)
/// - `CLICOLOR=0`: disables color
/// - `TERM=dumb`: disables color
/// - `CLICOLOR_FORCE` (any value): forces color even in non-TTY
/// - Falls back to TTY detection
pub fn supports_color() -> bool {
    color_enabled(
        env::var_os("NO_COLOR").is_some(),
        env::var("CLICOLOR").ok().as_deref(),
        env::var("TERM").ok().as_deref(),
        env::var_os("CLICOLOR_FORCE").is_some(),
        is_tty(),
    )
}

/// The precedence rules behind [`supports_color`], free of process state.
fn color_enabled(
    no_color: bool,
    clicolor: Option<&str>,
    term: Option<&str>,
    clicolor_force: bool,
    tty: bool,
) -> bool {
    // NO_COLOR beats everything, including CLICOLOR_FORCE.
    if no_color {
        return false;
    }

    // CLICOLOR=0 disables colour, even when forced.
    if clicolor == Some("0") {
        return false;
    }

    // TERM=dumb disables colour, even when forced.
    if term == Some("dumb") {
        return false;
    }

    // CLICOLOR_FORCE forces colour in non-TTY output (e.g. `fm show | less -R`).
    if clicolor_force {
        return true;
    }

    // Default: colour only on a TTY.
    tty
}
