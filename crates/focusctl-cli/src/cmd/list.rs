use crate::output::{on_off, print_json, print_table};
use std::path::Path;

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let engine = super::open_engine(root)?;
    let modes = engine.list_all();

    if json {
        return print_json(&modes);
    }

    let rows: Vec<Vec<String>> = modes
        .iter()
        .map(|s| {
            vec![
                s.mode.to_string(),
                s.name.clone(),
                on_off(s.enabled).to_string(),
            ]
        })
        .collect();
    print_table(&["MODE", "NAME", "STATUS"], &rows);
    println!();
    println!("Usage: focusctl <mode> [on|off|toggle]");
    println!("Example: focusctl work on");
    Ok(())
}
