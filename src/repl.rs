//! The menu loop.
use crate::command::{self, Command};
use crate::console::{build_table, Console};
use crate::session::Session;
use crate::{echo, echo_lines, error, errors};
use std::io::{BufRead, Write};
use tracing::{info, warn};

const OPTION_PROMPT: &str = "Select an option: ";

/// Show the schema, then loop over the menu until `0` or end of input.
pub fn start<R: BufRead, W: Write>(
    session: &mut Session,
    console: &mut Console<R, W>,
) -> Result<(), errors::Error> {
    info!(session_id = %session.id, "Starting menu loop");
    show_schema(session, console);

    loop {
        echo!(console, "{}", command::MENU);
        let line = match console.prompt(OPTION_PROMPT)? {
            Some(line) => line,
            None => {
                echo!(console, "\n");
                break;
            }
        };

        match command::parse(&line) {
            Ok(Command::Exit) => break,
            Ok(c) => execute(session, console, c),
            Err(e) => error!(console, "{}\n", e),
        }
    }

    session.close();
    Ok(())
}

/// Execute one menu command. Failures are reported on the console.
pub fn execute<R: BufRead, W: Write>(
    session: &Session,
    console: &mut Console<R, W>,
    c: Command,
) {
    match c {
        Command::AddRow => add_row(session, console),
        Command::ShowRows => show_rows(session, console),
        Command::Exit => {}
    }
}

pub fn show_schema<R: BufRead, W: Write>(session: &Session, console: &mut Console<R, W>) {
    let (headers, rows) = session.schema.describe();
    echo!(console, "Table structure:\n");
    echo_lines!(console, "{}", build_table(&headers, &rows));
}

fn add_row<R: BufRead, W: Write>(session: &Session, console: &mut Console<R, W>) {
    let result = session.table.insert_row(&session.schema, |column| {
        console.require(&format!(
            "Enter the value for '{}' ({}): ",
            column.name, column.type_
        ))
    });

    match result {
        Ok(_) => echo!(
            console,
            "Row added to '{}'.\n",
            session.table.path.display()
        ),
        Err(e) => {
            warn!(category = e.category(), "Failed to add row. {}", e);
            error!(console, "{}\n", e);
        }
    }
}

fn show_rows<R: BufRead, W: Write>(session: &Session, console: &mut Console<R, W>) {
    let rows = match session.table.select_rows(&session.schema) {
        Ok(rows) => rows,
        Err(e) => {
            warn!(category = e.category(), "Failed to read rows. {}", e);
            error!(
                console,
                "Could not read '{}'. {}\n",
                session.table.path.display(),
                e
            );
            return;
        }
    };

    if rows.is_empty() {
        echo!(console, "No rows stored.\n");
        return;
    }
    for row in &rows {
        echo!(console, "{}\n", row);
    }
}
