use std::io::Write;

use termcolor::{ColorChoice, StandardStream, WriteColor};

pub use termcolor::Color;
pub use termcolor::ColorSpec;

use crate::error::FatalError;

/// Whether to color logged output
fn colorize_stderr() -> ColorChoice {
    if concolor_control::get(concolor_control::Stream::Stderr).color() {
        ColorChoice::Always
    } else {
        ColorChoice::Never
    }
}

/// Print a message with a colored title in the style of Cargo shell messages.
pub fn print(
    status: &str,
    message: impl std::fmt::Display,
    color: Color,
    justified: bool,
) -> Result<(), FatalError> {
    let color_choice = colorize_stderr();
    let mut output = StandardStream::stderr(color_choice);

    output.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
    if justified {
        write!(output, "{status:>12}")?;
    } else {
        write!(output, "{}", status)?;
        output.set_color(ColorSpec::new().set_bold(true))?;
        write!(output, ":")?;
    }
    output.reset()?;

    writeln!(output, " {message}")?;

    Ok(())
}

/// Print a styled action message.
pub fn status(action: &str, message: impl std::fmt::Display) -> Result<(), FatalError> {
    print(action, message, Color::Green, true)
}

/// Print a styled error message.
pub fn error(message: impl std::fmt::Display) -> Result<(), FatalError> {
    print("error", message, Color::Red, false)
}

/// Print a styled warning message.
pub fn warn(message: impl std::fmt::Display) -> Result<(), FatalError> {
    print("warning", message, Color::Yellow, false)
}

/// Print a styled note message.
pub fn note(message: impl std::fmt::Display) -> Result<(), FatalError> {
    print("note", message, Color::Cyan, false)
}
