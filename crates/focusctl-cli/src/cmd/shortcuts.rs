use crate::output::print_json;
use anyhow::Context;
use clap::Subcommand;
use focusctl_core::config::Config;
use focusctl_core::install::Installer;
use focusctl_core::shortcut::ShortcutAction;
use focusctl_core::FocusMode;
use std::path::Path;

const USAGE: &str = "usage: focusctl shortcuts [install|uninstall|list|show <mode>]";

// ---------------------------------------------------------------------------
// Subcommand types
// ---------------------------------------------------------------------------

#[derive(Subcommand)]
pub enum ShortcutsSubcommand {
    /// Install one toggle action per focus mode
    Install,

    /// Remove every installed FocusCTL action
    Uninstall,

    /// List installed FocusCTL actions
    List,

    /// Print the action document for one mode without installing it
    Show {
        /// Focus mode name (e.g. work)
        mode: String,
    },
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub fn run(
    root: &Path,
    shortcuts_dir: Option<&Path>,
    subcmd: Option<ShortcutsSubcommand>,
    json: bool,
) -> anyhow::Result<()> {
    let Some(subcmd) = subcmd else {
        anyhow::bail!("missing shortcuts command\n{USAGE}");
    };

    let config = Config::load(root).context("failed to load config")?;
    let open_installer = || -> anyhow::Result<Installer> {
        let dir = config
            .shortcuts_dir(shortcuts_dir)
            .context("cannot locate the Shortcuts directory")?;
        Ok(Installer::open(dir, config.ssh.clone()))
    };

    match subcmd {
        ShortcutsSubcommand::Install => install(&open_installer()?, json),
        ShortcutsSubcommand::Uninstall => uninstall(&open_installer()?, json),
        ShortcutsSubcommand::List => list(&open_installer()?, json),
        ShortcutsSubcommand::Show { mode } => show(&config, &mode),
    }
}

// ---------------------------------------------------------------------------
// install
// ---------------------------------------------------------------------------

fn install(installer: &Installer, json: bool) -> anyhow::Result<()> {
    let summary = installer.install_all();

    if json {
        print_json(&summary)?;
    } else {
        println!(
            "Installing FocusCTL Shortcuts actions into {}",
            installer.dir().display()
        );
        for f in &summary.failures {
            eprintln!("✗ {}: {}", f.name, f.error);
        }
        println!(
            "Installation complete: {}/{} actions installed",
            summary.installed, summary.attempted
        );
        if summary.installed > 0 {
            println!();
            println!("Open the Shortcuts app and look for the 'Toggle … Focus' actions.");
        }
    }

    if !summary.failures.is_empty() {
        anyhow::bail!(
            "{} of {} actions failed to install",
            summary.failures.len(),
            summary.attempted
        );
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// uninstall
// ---------------------------------------------------------------------------

fn uninstall(installer: &Installer, json: bool) -> anyhow::Result<()> {
    let removed = installer
        .uninstall_all()
        .context("failed to uninstall FocusCTL actions")?;

    if json {
        print_json(&serde_json::json!({ "removed": removed }))?;
    } else {
        for name in &removed {
            println!("✓ Removed: {name}");
        }
        println!("All FocusCTL actions uninstalled");
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// list
// ---------------------------------------------------------------------------

fn list(installer: &Installer, json: bool) -> anyhow::Result<()> {
    let names = installer
        .list()
        .context("failed to list FocusCTL actions")?;

    if json {
        return print_json(&names);
    }
    if names.is_empty() {
        println!("No FocusCTL actions installed");
        println!("Run 'focusctl shortcuts install' to install actions");
    } else {
        for name in &names {
            println!("• {name}");
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// show
// ---------------------------------------------------------------------------

fn show(config: &Config, mode: &str) -> anyhow::Result<()> {
    let mode: FocusMode = mode.parse()?;
    let data = ShortcutAction::for_mode(mode).serialize(&config.ssh)?;
    print!("{}", String::from_utf8_lossy(&data));
    Ok(())
}
