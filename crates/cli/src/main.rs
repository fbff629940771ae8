#![forbid(unsafe_code)]
#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro
)]

use clap::{CommandFactory, Parser, Subcommand};

mod commands;
mod logging;

#[derive(Parser, Debug)]
#[command(
    name = "swagen",
    version,
    about = "Generate TypeScript declarations from a Swagger document"
)]
struct Cli {
    /// Log at debug level, overriding SWAGEN_LOG
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate operations, types, enums and the gateway spec view
    Generate(commands::generate::GenerateArgs),
    /// Resolve a single schema to a type expression
    Resolve(commands::resolve::ResolveArgs),
}

fn run_cli<I, T>(args: I) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => {
            logging::init_tracing(cli.verbose);
            match cli.command {
                Some(Commands::Generate(args)) => commands::generate::run(args),
                Some(Commands::Resolve(args)) => commands::resolve::run(args),
                None => {
                    let mut cmd = Cli::command();
                    let _ = cmd.print_help();
                    println!();
                    0
                }
            }
        }
        Err(e) => {
            let code = e.exit_code();
            let _ = e.print();
            code
        }
    }
}

fn main() {
    std::process::exit(run_cli(std::env::args_os()));
}
