use crate::build::FailurePolicy;
use crate::clean::CleanOutcome;
use crate::cli::{Action, Cli, USAGE};
use crate::config::BuildConfig;
use anyhow::{Context, Result};

pub fn run(cli: Cli) -> Result<()> {
    let Some(word) = cli.command.as_deref() else {
        println!("{USAGE}");
        std::process::exit(1);
    };
    let Some(action) = Action::parse(word) else {
        println!("Unknown command: {word}");
        println!("{USAGE}");
        std::process::exit(1);
    };

    if action == Action::Help {
        println!("{USAGE}");
        return Ok(());
    }

    let cwd = std::env::current_dir().context("Reading current directory")?;
    let config = BuildConfig::load(cli.config.as_deref(), cli.root.as_deref(), &cwd)?;
    log::debug!("configuration: {config:?}");

    let policy = if cli.keep_going {
        FailurePolicy::KeepGoing
    } else {
        FailurePolicy::Abort
    };

    match action {
        Action::All => crate::build::build_all(&config, policy),
        Action::Iso => crate::tasks::script::create_iso(&config),
        Action::Run => crate::tasks::script::run_os(&config),
        Action::Clean => {
            let outcome = crate::clean::clean(&config.output_dir, &config.target)?;
            if let CleanOutcome::Cleaned { removed } = outcome {
                log::info!("removed {removed} build artifact(s)");
            }
            Ok(())
        }
        Action::Doctor => crate::tasks::tooling::doctor::run(&config, &cwd),
        Action::Env => crate::tasks::tooling::env::run(&config),
        Action::Help => Ok(()),
    }
}
