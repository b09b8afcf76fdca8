//! Interactive shell for the kinbook address book.
//!
//! # Responsibility
//! - Resolve configuration (database path, log directory) from argv and env.
//! - Run the prompt loop and persist the book on exit.
//!
//! # Invariants
//! - Stdout carries only prompt and command output; diagnostics go to the
//!   log file or stderr.
//! - The book is saved before the process exits normally, including on EOF.

mod commands;

use commands::{dispatch, parse_line, Flow};
use kinbook_core::db::open_db;
use kinbook_core::{
    core_version, default_log_level, init_logging, BookRepository, BookService,
    SqliteBookRepository,
};
use log::{error, info};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

const DEFAULT_DB_FILE: &str = "kinbook.sqlite3";
const DB_PATH_ENV: &str = "KINBOOK_DB";
const LOG_DIR_ENV: &str = "KINBOOK_LOG_DIR";
const DEFAULT_LOG_DIR: &str = "logs";

fn main() -> ExitCode {
    init_cli_logging();

    let db_path = resolve_db_path();
    let conn = match open_db(&db_path) {
        Ok(conn) => conn,
        Err(err) => {
            error!("event=cli_start module=cli status=error error={err}");
            eprintln!(
                "Failed to open address book at {}: {err}",
                db_path.display()
            );
            return ExitCode::FAILURE;
        }
    };

    let mut service = match BookService::load(SqliteBookRepository::new(&conn)) {
        Ok(service) => service,
        Err(err) => {
            error!("event=cli_start module=cli status=error error={err}");
            eprintln!("Failed to load address book: {err}");
            return ExitCode::FAILURE;
        }
    };

    info!(
        "event=cli_start module=cli status=ok version={} db_path={}",
        core_version(),
        db_path.display()
    );

    let code = run_loop(&mut service);
    info!("event=cli_stop module=cli status=ok");
    code
}

/// Runs the prompt loop until `exit`/`close` or EOF.
fn run_loop<R: BookRepository>(service: &mut BookService<R>) -> ExitCode {
    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut line = String::new();

    loop {
        print!("Enter a command: ");
        if std::io::stdout().flush().is_err() {
            return ExitCode::FAILURE;
        }

        line.clear();
        match input.read_line(&mut line) {
            Ok(0) => {
                // EOF behaves like `exit`, so a piped session still saves.
                println!();
                println!("Good bye!");
                persist_on_exit(service);
                return ExitCode::SUCCESS;
            }
            Ok(_) => {}
            Err(err) => {
                error!("event=cli_read module=cli status=error error={err}");
                eprintln!("Failed to read input: {err}");
                return ExitCode::FAILURE;
            }
        }

        let Some(parsed) = parse_line(&line) else {
            continue;
        };
        let today = chrono::Local::now().date_naive();
        let (message, flow) = dispatch(&parsed, service, today);
        println!("{message}");
        if flow == Flow::Exit {
            persist_on_exit(service);
            return ExitCode::SUCCESS;
        }
    }
}

fn persist_on_exit<R: BookRepository>(service: &BookService<R>) {
    if let Err(err) = service.persist() {
        error!("event=book_persist module=cli status=error error={err}");
        eprintln!("Warning: could not save the address book: {err}");
    }
}

/// Database path: first CLI argument, then `KINBOOK_DB`, then
/// `kinbook.sqlite3` in the working directory.
fn resolve_db_path() -> PathBuf {
    if let Some(arg) = std::env::args().nth(1) {
        return PathBuf::from(arg);
    }
    if let Ok(path) = std::env::var(DB_PATH_ENV) {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }
    PathBuf::from(DEFAULT_DB_FILE)
}

/// Starts file logging; a failure degrades to a stderr note rather than
/// aborting the shell.
fn init_cli_logging() {
    let log_dir = match std::env::var(LOG_DIR_ENV) {
        Ok(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
        _ => PathBuf::from(DEFAULT_LOG_DIR),
    };
    let log_dir = if log_dir.is_absolute() {
        log_dir
    } else {
        match std::env::current_dir() {
            Ok(cwd) => cwd.join(log_dir),
            Err(_) => log_dir,
        }
    };

    let Some(dir_str) = log_dir.to_str() else {
        eprintln!("Warning: log directory path is not valid UTF-8; logging disabled.");
        return;
    };
    if let Err(err) = init_logging(default_log_level(), dir_str) {
        eprintln!("Warning: logging disabled: {err}");
    }
}
