use anyhow::Result;
use clap::Parser;

mod app;
mod build;
mod clean;
mod cli;
mod config;
mod error;
mod exec;
mod logger;
mod object;
mod order;
mod scan;
mod tasks;
mod util;

fn main() -> Result<()> {
    let cli = match crate::cli::Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Usage errors exit 1 like an unknown command; --version exits 0.
            let code = i32::from(e.use_stderr());
            let _ = e.print();
            std::process::exit(code);
        }
    };
    crate::logger::init(cli.verbose)?;
    crate::app::run(cli)
}
