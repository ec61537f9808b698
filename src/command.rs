//! The menu command parser.
use crate::errors;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Option `1`.
    AddRow,
    /// Option `2`.
    ShowRows,
    /// Option `0`.
    Exit,
}

pub const MENU: &str = "\nMenu:\n1. Add row\n2. Show rows\n0. Exit\n";

/// Parse a menu option.
pub fn parse(s: &str) -> Result<Command, errors::Error> {
    match s.trim().parse::<i64>() {
        Ok(1) => Ok(Command::AddRow),
        Ok(2) => Ok(Command::ShowRows),
        Ok(0) => Ok(Command::Exit),
        _ => Err(errors::Error::InvalidOption(format!(
            "'{}' is not a menu option",
            s.trim()
        ))),
    }
}
