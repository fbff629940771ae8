pub mod common;
pub mod generate;
pub mod resolve;

use swagen_core::GenerateError;

/// Run a command body, printing its error and mapping the outcome to an exit code.
pub fn run_command<F>(f: F) -> i32
where
    F: FnOnce() -> Result<(), GenerateError>,
{
    match f() {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("{err}");
            1
        }
    }
}
