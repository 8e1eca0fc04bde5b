use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use clap::Subcommand;
use env_logger::Builder;
use log::{debug, info};

use fwjs_interpreter as fwjs;

use fwjs::ast_printer::AstPrinter;
use fwjs::error::FwjsError;
use fwjs::expr::Expr;
use fwjs::interpreter::Interpreter;
use fwjs::parser::parse_source;
use fwjs::scanner::Scanner;

/// Exit status for lexical and syntax errors.
const EXIT_STATIC: u8 = 65;

/// Exit status for runtime errors.
const EXIT_RUNTIME: u8 = 70;

#[derive(ClapParser, Debug)]
#[command(version, about = "Featherweight JavaScript interpreter", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    commands: Commands,

    /// Enable logging to fwjs.log
    #[arg(long, global = true)]
    log: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Tokenizes input from a file, printing each token
    Tokenize {
        filename: Option<PathBuf>,

        /// Print one JSON object per token
        #[arg(long)]
        json: bool,
    },

    /// Parses input from a file and prints its AST
    Parse { filename: Option<PathBuf> },

    /// Runs input from a file and prints the program's final value
    Evaluate { filename: Option<PathBuf> },

    /// Runs input from a file as an FWJS program
    Run { filename: Option<PathBuf> },
}

/// Reads a source file into a `String`.
fn read_file(filename: PathBuf) -> Result<String> {
    info!("Reading file: {:?}", filename);
    let file = File::open(&filename).context(format!("Failed to open file {:?}", filename))?;
    let mut reader = BufReader::new(file);
    let mut buf = Vec::new();

    let bytes = reader
        .read_to_end(&mut buf)
        .context(format!("Failed to read file {:?}", filename))?;

    info!("Read {} bytes from {:?}", bytes, filename);

    let source = String::from_utf8(buf)
        .map_err(FwjsError::from)
        .context(format!("File {:?} is not valid UTF-8", filename))?;

    Ok(source)
}

fn init_logger() -> Result<()> {
    let log_file = File::create("fwjs.log").context("Failed to create fwjs.log")?;

    // `[module:line] - message`, without the crate prefix.
    Builder::new()
        .format(|buf, record| {
            let full = record.module_path().unwrap_or("<unnamed>");
            let module = full.strip_prefix("fwjs_interpreter::").unwrap_or(full);
            writeln!(
                buf,
                "[{}:{}] - {}",
                module,
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .filter(None, log::LevelFilter::Debug)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized, writing to fwjs.log");
    Ok(())
}

/// Parses a file, reporting syntax errors on stderr.
fn parse_file(filename: PathBuf) -> Result<std::result::Result<Expr, ExitCode>> {
    let source = read_file(filename)?;
    debug!("Provided input:\n {}", source);

    match parse_source(&source) {
        Ok(program) => {
            info!("Program parsed successfully");
            Ok(Ok(program))
        }

        Err(e) => {
            debug!("Parse debug: {}", e);
            eprintln!("{}", e);
            Ok(Err(ExitCode::from(EXIT_STATIC)))
        }
    }
}

/// Runs a parsed program, reporting runtime errors on stderr.
fn execute(program: &Expr) -> std::result::Result<fwjs::Value, ExitCode> {
    let mut interpreter = Interpreter::new();

    match interpreter.interpret(program) {
        Ok(value) => {
            info!("Program executed successfully");
            Ok(value)
        }

        Err(e) => {
            debug!("Runtime debug: {}", e);
            eprintln!("{}", e);
            Err(ExitCode::from(EXIT_RUNTIME))
        }
    }
}

fn no_input(command: &str) -> ExitCode {
    info!("No filepath provided for {}", command);
    println!("No input filepath was provided. Exiting...");
    ExitCode::SUCCESS
}

fn main() -> Result<ExitCode> {
    let args: Cli = Cli::parse();

    // Logging only goes anywhere when --log is given.
    if args.log {
        init_logger()?;
    } else {
        Builder::new().filter_level(log::LevelFilter::Off).init();
    }

    info!("CLI arguments: {:?}", args);

    let code = match args.commands {
        Commands::Tokenize { filename, json } => {
            let Some(filename) = filename else {
                return Ok(no_input("Tokenize"));
            };

            info!("Running Tokenize subcommand");
            let source = read_file(filename)?;
            let mut tokenized = true;

            for token in Scanner::new(&source) {
                match token {
                    Ok(token) if json => {
                        println!("{}", serde_json::to_string(&token)?);
                    }

                    Ok(token) => {
                        println!("{}", token);
                    }

                    Err(e) => {
                        tokenized = false;
                        debug!("Tokenization debug: {}", e);
                        eprintln!("{}", e);
                    }
                }
            }

            if tokenized {
                info!("Tokenization completed successfully");
                ExitCode::SUCCESS
            } else {
                debug!("Tokenization failed, exiting with code {}", EXIT_STATIC);
                ExitCode::from(EXIT_STATIC)
            }
        }

        Commands::Parse { filename } => {
            let Some(filename) = filename else {
                return Ok(no_input("Parse"));
            };

            info!("Running Parse subcommand");
            match parse_file(filename)? {
                Ok(program) => {
                    let ast_str = AstPrinter::print(&program);
                    debug!("AST: {}", ast_str);
                    println!("{}", ast_str);
                    ExitCode::SUCCESS
                }

                Err(code) => code,
            }
        }

        Commands::Evaluate { filename } => {
            let Some(filename) = filename else {
                return Ok(no_input("Evaluate"));
            };

            info!("Running Evaluate subcommand");
            match parse_file(filename)?.and_then(|program| execute(&program)) {
                Ok(value) => {
                    debug!("Evaluated to: {}", value);
                    println!("{}", value);
                    ExitCode::SUCCESS
                }

                Err(code) => code,
            }
        }

        Commands::Run { filename } => {
            let Some(filename) = filename else {
                return Ok(no_input("Run"));
            };

            info!("Running Run subcommand");
            match parse_file(filename)?.and_then(|program| execute(&program)) {
                Ok(_) => ExitCode::SUCCESS,
                Err(code) => code,
            }
        }
    };

    Ok(code)
}
