use crate::output::print_json;
use anyhow::Context;
use clap::Subcommand;
use focusctl_core::config::Config;
use focusctl_core::paths;
use std::path::{Path, PathBuf};

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Show the effective configuration
    Show,

    /// Write a default config file if none exists
    Init,

    /// Update config values, creating the file if needed
    Set {
        /// Install directory for exported actions
        #[arg(long, value_name = "PATH")]
        install_dir: Option<PathBuf>,
        /// SSH host baked into exported actions
        #[arg(long)]
        ssh_host: Option<String>,
        /// SSH port baked into exported actions
        #[arg(long)]
        ssh_port: Option<u16>,
        /// SSH user baked into exported actions
        #[arg(long)]
        ssh_user: Option<String>,
    },
}

pub fn run(
    root: &Path,
    shortcuts_dir: Option<&Path>,
    subcmd: ConfigSubcommand,
    json: bool,
) -> anyhow::Result<()> {
    match subcmd {
        ConfigSubcommand::Show => show(root, shortcuts_dir, json),
        ConfigSubcommand::Init => init(root),
        ConfigSubcommand::Set {
            install_dir,
            ssh_host,
            ssh_port,
            ssh_user,
        } => set(root, install_dir, ssh_host, ssh_port, ssh_user, json),
    }
}

fn show(root: &Path, shortcuts_dir: Option<&Path>, json: bool) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load config")?;
    let dir = config
        .shortcuts_dir(shortcuts_dir)
        .context("cannot locate the Shortcuts directory")?;

    if json {
        return print_json(&serde_json::json!({
            "root": root,
            "store": paths::store_path(root),
            "shortcuts_dir": dir,
            "ssh": {
                "host": config.ssh.host,
                "port": config.ssh.port,
                "user": config.ssh.resolved_user(),
            },
        }));
    }

    println!("root:          {}", root.display());
    println!("store:         {}", paths::store_path(root).display());
    println!("shortcuts_dir: {}", dir.display());
    println!(
        "ssh:           {}@{}:{}",
        config.ssh.resolved_user(),
        config.ssh.host,
        config.ssh.port
    );
    Ok(())
}

fn init(root: &Path) -> anyhow::Result<()> {
    let path = paths::config_path(root);
    if Config::init(root).context("failed to write config")? {
        println!("Wrote {}", path.display());
    } else {
        println!("Config already exists at {}", path.display());
    }
    Ok(())
}

fn set(
    root: &Path,
    install_dir: Option<PathBuf>,
    ssh_host: Option<String>,
    ssh_port: Option<u16>,
    ssh_user: Option<String>,
    json: bool,
) -> anyhow::Result<()> {
    if install_dir.is_none() && ssh_host.is_none() && ssh_port.is_none() && ssh_user.is_none() {
        anyhow::bail!("nothing to set; pass --install-dir, --ssh-host, --ssh-port or --ssh-user");
    }

    let mut config = Config::load(root).context("failed to load config")?;
    if install_dir.is_some() {
        config.shortcuts_dir = install_dir;
    }
    if let Some(host) = ssh_host {
        config.ssh.host = host;
    }
    if let Some(port) = ssh_port {
        config.ssh.port = port;
    }
    if ssh_user.is_some() {
        config.ssh.user = ssh_user;
    }
    config.save(root).context("failed to save config")?;

    if json {
        return print_json(&config);
    }
    println!("Updated {}", paths::config_path(root).display());
    Ok(())
}
