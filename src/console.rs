//! Console input and styled output.
use crate::errors;
use crossterm::{
    queue,
    style::{self, Color},
};
use std::io::{self, BufRead, Write};

/// Line-oriented console over any input and output pair.
pub struct Console<R: BufRead, W: Write> {
    input: R,
    output: W,
}

impl Console<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Console::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Console { input, output }
    }

    #[cfg(test)]
    pub fn output(&self) -> &W {
        &self.output
    }

    /// Prints a bold prompt and reads one trimmed line.
    ///
    /// Returns `None` at end of input.
    pub fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        queue!(
            self.output,
            style::SetAttribute(style::Attribute::Bold),
            style::Print(label),
            style::SetAttribute(style::Attribute::Reset)
        )?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Like `prompt`, but end of input is an error.
    pub fn require(&mut self, label: &str) -> Result<String, errors::Error> {
        self.prompt(label)?
            .ok_or_else(|| errors::Error::Input("Input closed".into()))
    }

    pub fn echo(&mut self, s: String) {
        let _ = queue!(self.output, style::Print(s));
        let _ = self.output.flush();
    }

    pub fn error(&mut self, s: String) {
        let _ = queue!(
            self.output,
            style::SetForegroundColor(Color::Red),
            style::Print(s),
            style::ResetColor
        );
        let _ = self.output.flush();
    }

    pub fn echo_lines(&mut self, s: String) {
        for l in s.lines() {
            let _ = queue!(self.output, style::Print(format!("{}\n", l)));
        }
        let _ = self.output.flush();
    }
}

pub fn build_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let mut result = String::new();

    // Determine the width of each column by finding the longest string in each
    let mut column_widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, col) in row.iter().enumerate() {
            column_widths[i] = column_widths[i].max(col.len());
        }
    }

    let border = |result: &mut String| {
        result.push('+');
        for width in &column_widths {
            result.push_str(&"-".repeat(*width));
            result.push('+');
        }
        result.push('\n');
    };

    border(&mut result);

    if !headers.is_empty() {
        result.push('|');
        for (i, header) in headers.iter().enumerate() {
            result.push_str(&format!("{:<width$}|", header, width = column_widths[i]));
        }
        result.push('\n');
        border(&mut result);
    }

    for row in rows {
        result.push('|');
        for (i, col) in row.iter().enumerate() {
            result.push_str(&format!("{:<width$}|", col, width = column_widths[i]));
        }
        result.push('\n');
    }

    border(&mut result);
    result
}

#[macro_export]
macro_rules! echo {
    ($console:expr, $($arg:tt)*) => {
        $console.echo(format!($($arg)*))
    };
}

#[macro_export]
macro_rules! error {
    ($console:expr, $($arg:tt)*) => {
        $console.error(format!($($arg)*))
    };
}

#[macro_export]
macro_rules! echo_lines {
    ($console:expr, $($arg:tt)*) => {
        $console.echo_lines(format!($($arg)*))
    };
}
