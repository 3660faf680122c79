use crate::output::{on_off, print_json};
use anyhow::Context;
use std::path::Path;

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let engine = super::open_engine(root)?;
    let global = engine
        .global_state()
        .context("failed to read global focus state")?;
    let activations = engine
        .activations()
        .context("failed to read focus mode activations")?;

    if json {
        let activations: Vec<_> = activations
            .iter()
            .map(|(mode, a)| {
                serde_json::json!({
                    "mode": mode,
                    "enabled": a.enabled,
                    "activated_at": a.activated_at,
                })
            })
            .collect();
        return print_json(&serde_json::json!({
            "focus_enabled": global.focus_enabled,
            "active_mode": global.active_mode(),
            "activations": activations,
        }));
    }

    print!("Focus: {}", on_off(global.focus_enabled));
    match global.active_mode() {
        Some(mode) => println!(" (active: {})", mode.display_name()),
        None => println!(),
    }

    if activations.is_empty() {
        println!("No focus modes enabled.");
        return Ok(());
    }
    println!("Enabled modes:");
    for (mode, a) in &activations {
        match a.activated_at {
            Some(ts) => println!(
                "  {:<14} since {}",
                mode.display_name(),
                ts.format("%Y-%m-%d %H:%M:%S UTC")
            ),
            None => println!("  {}", mode.display_name()),
        }
    }
    Ok(())
}
