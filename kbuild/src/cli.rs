use clap::Parser;
use std::path::PathBuf;

pub const USAGE: &str = "Usage: kbuild [OPTIONS] [all|iso|run|clean|doctor|env|help]

Commands:
  all     Assemble, compile and link the kernel image
  iso     Run the ISO creation script
  run     Run the emulator launch script
  clean   Remove build artifacts and the kernel image
  doctor  Check that the toolchain and build inputs are in place
  env     Print the PATH export used for toolchain invocations
  help    Print this message

Options:
  --config <PATH>  JSON file overriding the default build configuration
  --root <DIR>     Directory scanned for .asm and .c sources
  --keep-going     Run every build step even after a failure
  -v, --verbose    Increase diagnostic output (repeatable)
  -V, --version    Print version";

#[derive(Parser)]
#[command(name = "kbuild")]
#[command(about = "Build orchestrator for the freestanding kernel image")]
#[command(version, disable_help_flag = true, disable_help_subcommand = true)]
pub struct Cli {
    /// Action to perform. Kept as a raw string so the help aliases
    /// (`-help`, `--h`, ...) reach the action table instead of clap.
    #[arg(allow_hyphen_values = true, value_name = "COMMAND")]
    pub command: Option<String>,

    /// JSON file overriding the default build configuration.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory scanned for sources (overrides `source_root`).
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Keep running build steps after a tool fails; report all failures at the end.
    #[arg(long)]
    pub keep_going: bool,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    All,
    Iso,
    Run,
    Clean,
    Help,
    Doctor,
    Env,
}

impl Action {
    /// Maps a command word to an action. Returns `None` for anything unknown.
    pub fn parse(word: &str) -> Option<Self> {
        match word {
            "all" => Some(Self::All),
            "iso" => Some(Self::Iso),
            "run" => Some(Self::Run),
            "clean" => Some(Self::Clean),
            "doctor" => Some(Self::Doctor),
            "env" => Some(Self::Env),
            "help" | "-help" | "--help" | "h" | "-h" | "--h" => Some(Self::Help),
            _ => None,
        }
    }
}
