//! Terminal output with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.
//! Outlines and data go to stdout, diagnostics to stderr.

use std::fmt::Display;

use colored::Colorize;

pub fn error(msg: &(impl Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

pub fn warning(msg: &(impl Display + ?Sized)) {
    eprintln!("{}: {}", "Warning".yellow(), msg);
}

/// A script line that left the outline as it was.
pub fn no_effect(line: usize, command: &impl Display, reason: &impl Display) {
    warning(&format!(
        "line {}: `{}` had no effect: {}",
        line.to_string().bold(),
        command,
        reason
    ));
}

/// Summary line after a successful run (green checkmark)
pub fn success(msg: &(impl Display + ?Sized)) {
    println!("{} {}", "✓".green(), msg);
}

/// Failed check (red X, indented)
pub fn failure(msg: &(impl Display + ?Sized)) {
    println!("  {} {}", "✗".red(), msg);
}

/// Plain output, no color
pub fn info(msg: &(impl Display + ?Sized)) {
    println!("{}", msg);
}
