mod command;
mod console;
mod errors;
mod repl;
mod schema;
mod session;
mod storage;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(
    name = "taxables",
    version = VERSION,
    about = "Append rows to a CSV table described by a CREATE TABLE file."
)]
struct Cli {
    /// Table definition file.
    #[arg(long, env = "TAXABLES_SCHEMA", default_value = "struct_table.txt")]
    schema: PathBuf,

    /// CSV data file.
    #[arg(long, env = "TAXABLES_DATA", default_value = "taxables.csv")]
    data: PathBuf,

    /// Execute a single menu option and exit.
    #[arg(short, long)]
    command: Option<String>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut console = console::Console::stdio();

    let mut session = match session::Session::open(&cli.schema, &cli.data) {
        Ok(s) => s,
        Err(e) => {
            error!(console, "{}\n", e);
            return ExitCode::FAILURE;
        }
    };

    if let Some(option) = cli.command {
        let result = command::parse(&option);
        return match result {
            Ok(c) => {
                repl::execute(&session, &mut console, c);
                session.close();
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!(console, "{}\n", e);
                ExitCode::FAILURE
            }
        };
    }

    match repl::start(&mut session, &mut console) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!(console, "Error: {}\n", e);
            ExitCode::FAILURE
        }
    }
}
