use crate::output::print_json;
use crate::GlobalArgs;
use anyhow::Context;
use clap::Parser;
use focusctl_core::{FocusMode, ModeAction};
use std::path::PathBuf;

fn usage(mode: &str) -> String {
    format!("usage: focusctl {mode} [on|off|toggle]")
}

/// Everything after the mode name. Global flags given after the mode reach
/// us unparsed, so they are accepted here as well.
#[derive(Parser)]
#[command(no_binary_name = true, disable_help_flag = true, disable_version_flag = true)]
struct ModeArgs {
    action: Option<String>,

    #[arg(long)]
    root: Option<PathBuf>,

    #[arg(long)]
    shortcuts_dir: Option<PathBuf>,

    #[arg(long, short = 'j')]
    json: bool,
}

impl ModeArgs {
    /// Flags given after the mode win over those given before it.
    fn overlay(&self, globals: &GlobalArgs) -> GlobalArgs {
        GlobalArgs {
            root: self.root.clone().or_else(|| globals.root.clone()),
            shortcuts_dir: self
                .shortcuts_dir
                .clone()
                .or_else(|| globals.shortcuts_dir.clone()),
            json: self.json || globals.json,
        }
    }
}

/// `focusctl <mode> <action>`. `args[0]` is the mode name as typed.
pub fn run(args: &[String], globals: &GlobalArgs) -> anyhow::Result<()> {
    let Some((name, rest)) = args.split_first() else {
        anyhow::bail!("missing focus mode");
    };

    let mode = name
        .parse::<FocusMode>()
        .map_err(|e| anyhow::anyhow!("{e}\nRun 'focusctl --help' for available commands."))?;

    let parsed = ModeArgs::try_parse_from(rest).map_err(|e| {
        let rendered = e.render().to_string();
        let first = rendered.lines().next().unwrap_or_default();
        anyhow::anyhow!(
            "{}\n{}",
            first.trim_start_matches("error: "),
            usage(mode.as_str())
        )
    })?;
    let Some(action) = parsed.action.as_deref() else {
        anyhow::bail!("missing action for {mode} mode\n{}", usage(mode.as_str()));
    };
    let action = action
        .parse::<ModeAction>()
        .map_err(|e| anyhow::anyhow!("{e}\n{}", usage(mode.as_str())))?;

    let globals = parsed.overlay(globals);
    let root = crate::root::resolve_root(globals.root.as_deref())?;
    let engine = super::open_engine(&root)?;
    let enabled = match action {
        ModeAction::On => {
            engine.set_mode(mode, true)?;
            true
        }
        ModeAction::Off => {
            engine.set_mode(mode, false)?;
            false
        }
        ModeAction::Toggle => engine
            .toggle(mode)
            .with_context(|| format!("failed to toggle {} focus mode", mode.display_name()))?,
    };

    if globals.json {
        print_json(&serde_json::json!({
            "mode": mode,
            "name": mode.display_name(),
            "enabled": enabled,
        }))?;
    } else {
        let status = if enabled { "enabled" } else { "disabled" };
        println!("{} focus mode {status}", mode.display_name());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> ModeArgs {
        ModeArgs::try_parse_from(args).unwrap()
    }

    #[test]
    fn trailing_global_flags_are_accepted() {
        let parsed = parse(&["on", "--json", "--root=/tmp/state"]);
        assert_eq!(parsed.action.as_deref(), Some("on"));
        assert!(parsed.json);
        assert_eq!(parsed.root, Some(PathBuf::from("/tmp/state")));

        let parsed = parse(&["-j", "toggle", "--shortcuts-dir", "/tmp/sc"]);
        assert_eq!(parsed.action.as_deref(), Some("toggle"));
        assert!(parsed.json);
        assert_eq!(parsed.shortcuts_dir, Some(PathBuf::from("/tmp/sc")));
    }

    #[test]
    fn trailing_flags_override_leading_ones() {
        let leading = GlobalArgs {
            root: Some(PathBuf::from("/a")),
            shortcuts_dir: Some(PathBuf::from("/sc")),
            json: false,
        };
        let merged = parse(&["off", "--root", "/b"]).overlay(&leading);
        assert_eq!(merged.root, Some(PathBuf::from("/b")));
        assert_eq!(merged.shortcuts_dir, Some(PathBuf::from("/sc")));
        assert!(!merged.json);

        let merged = parse(&["off"]).overlay(&GlobalArgs {
            json: true,
            ..leading
        });
        assert_eq!(merged.root, Some(PathBuf::from("/a")));
        assert!(merged.json);
    }

    #[test]
    fn extra_positional_is_rejected() {
        assert!(ModeArgs::try_parse_from(["on", "now"]).is_err());
    }
}
