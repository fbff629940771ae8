use clap::Args;
use std::path::PathBuf;
use swagen_core::{ApiDocument, ClientOptions, GenerateError, Generator};
use tracing::{debug, info};

use super::common::{IndentArg, LanguageArg};
use super::run_command;

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Swagger document, JSON or YAML
    #[arg(long, value_name = "FILE")]
    pub spec: PathBuf,
    /// Directory the files are written to
    #[arg(long = "out-dir", value_name = "DIR")]
    pub out_dir: Option<PathBuf>,
    /// Options file (defaults to ./swagen.toml when present)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
    #[arg(long, value_enum)]
    pub language: Option<LanguageArg>,
    #[arg(long, value_enum)]
    pub indent: Option<IndentArg>,
    /// Terminate statements with `;`
    #[arg(long)]
    pub semicolon: bool,
    /// Host written to the gateway spec view
    #[arg(long)]
    pub host: Option<String>,
    /// Request timeout in milliseconds
    #[arg(long)]
    pub timeout: Option<u64>,
}

impl GenerateArgs {
    /// Layer command line flags over file options.
    fn apply(&self, options: &mut ClientOptions) {
        if let Some(out_dir) = &self.out_dir {
            options.out_dir.clone_from(out_dir);
        }
        if let Some(language) = self.language {
            options.language = language.into();
        }
        if let Some(indent) = self.indent {
            options.indent = indent.into();
        }
        if self.semicolon {
            options.semicolon = true;
        }
        if let Some(host) = &self.host {
            options.host = Some(host.clone());
        }
        if let Some(timeout) = self.timeout {
            options.timeout = Some(timeout);
        }
    }

    fn options(&self) -> Result<ClientOptions, GenerateError> {
        let cwd = std::env::current_dir()?;
        let mut options = ClientOptions::discover(self.config.as_deref(), &cwd)?;
        self.apply(&mut options);
        Ok(options)
    }
}

pub fn run(args: GenerateArgs) -> i32 {
    run_command(|| {
        let options = args.options()?;
        debug!(?options, "Resolved options.");

        let document = ApiDocument::from_path(&args.spec)?;
        let out_dir = options.out_dir.clone();
        let written = Generator::new(options).generate_to_disk(&document)?;

        info!(files = written.len(), out_dir = %out_dir.display(), "Generation complete.");
        for path in written {
            println!("{}", path.display());
        }
        Ok(())
    })
}
