mod cmd;
mod output;
mod root;

use clap::{Args, Parser, Subcommand};
use cmd::{config::ConfigSubcommand, shortcuts::ShortcutsSubcommand};
use std::path::PathBuf;

const AFTER_HELP: &str = "\
MODES:
    work, personal, sleep, presentation, gaming, driving, fitness, mindfulness,
    reading, writing, research, creative, social, family, friends

EXAMPLES:
    focusctl work on
    focusctl presentation off
    focusctl sleep toggle
    focusctl                    # List all modes
    focusctl shortcuts install  # Install Shortcuts actions";

#[derive(Parser)]
#[command(
    name = "focusctl",
    about = "Focus mode controller: toggle focus modes and export them as Shortcuts actions",
    override_usage = "focusctl [OPTIONS] [<MODE> <on|off|toggle> | COMMAND]",
    after_help = AFTER_HELP,
    version,
    propagate_version = true
)]
struct Cli {
    #[command(flatten)]
    globals: GlobalArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args, Clone)]
pub(crate) struct GlobalArgs {
    /// State directory (default: ~/.focusctl)
    #[arg(long, global = true, env = "FOCUSCTL_ROOT")]
    pub root: Option<PathBuf>,

    /// Shortcuts install directory (default: ~/Library/Shortcuts)
    #[arg(long, global = true, env = "FOCUSCTL_SHORTCUTS_DIR")]
    pub shortcuts_dir: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    pub json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List every focus mode and whether it is on (default)
    List,

    /// Show the global focus state and stored activations
    Status,

    /// Manage Shortcuts app actions
    Shortcuts {
        #[command(subcommand)]
        subcommand: Option<ShortcutsSubcommand>,
    },

    /// Inspect or create the config file
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },

    /// Show version information
    Version,

    /// Turn a focus mode on, off, or toggle it: `focusctl <mode> <on|off|toggle>`
    #[command(external_subcommand)]
    Mode(Vec<String>),
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = run(cli.command, &cli.globals);

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn run(command: Option<Commands>, globals: &GlobalArgs) -> anyhow::Result<()> {
    let root = || root::resolve_root(globals.root.as_deref());
    let shortcuts_dir = globals.shortcuts_dir.as_deref();
    let json = globals.json;
    match command {
        None | Some(Commands::List) => cmd::list::run(&root()?, json),
        Some(Commands::Status) => cmd::status::run(&root()?, json),
        Some(Commands::Shortcuts { subcommand }) => {
            cmd::shortcuts::run(&root()?, shortcuts_dir, subcommand, json)
        }
        Some(Commands::Config { subcommand }) => {
            cmd::config::run(&root()?, shortcuts_dir, subcommand, json)
        }
        Some(Commands::Version) => {
            println!("FocusCTL version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        // Resolves its own root so flags after the mode name apply
        Some(Commands::Mode(args)) => cmd::mode::run(&args, globals),
    }
}
