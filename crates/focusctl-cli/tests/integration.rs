#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn focusctl(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("focusctl").unwrap();
    cmd.current_dir(dir.path())
        .env("FOCUSCTL_ROOT", dir.path().join("state"))
        .env("FOCUSCTL_SHORTCUTS_DIR", dir.path().join("Shortcuts"))
        .env("USER", "tester")
        .env_remove("RUST_LOG");
    cmd
}

fn list_json(dir: &TempDir) -> Vec<serde_json::Value> {
    let out = focusctl(dir)
        .args(["list", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    serde_json::from_slice(&out).unwrap()
}

fn enabled(dir: &TempDir, mode: &str) -> bool {
    list_json(dir)
        .iter()
        .find(|m| m["mode"] == mode)
        .map(|m| m["enabled"] == true)
        .unwrap()
}

// ---------------------------------------------------------------------------
// listing
// ---------------------------------------------------------------------------

#[test]
fn no_args_lists_every_mode_off() {
    let dir = TempDir::new().unwrap();
    focusctl(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Work"))
        .stdout(predicate::str::contains("Friends"))
        .stdout(predicate::str::contains("ON").not());
}

#[test]
fn list_json_is_in_catalog_order() {
    let dir = TempDir::new().unwrap();
    let modes: Vec<String> = list_json(&dir)
        .iter()
        .map(|m| m["mode"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(modes.len(), 15);
    assert_eq!(modes[0], "work");
    assert_eq!(modes[1], "personal");
    assert_eq!(modes[14], "friends");
}

// ---------------------------------------------------------------------------
// focusctl <mode> <action>
// ---------------------------------------------------------------------------

#[test]
fn on_then_off_persists_across_runs() {
    let dir = TempDir::new().unwrap();
    focusctl(&dir)
        .args(["work", "on"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Work focus mode enabled"));
    assert!(enabled(&dir, "work"));

    focusctl(&dir)
        .args(["work", "off"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Work focus mode disabled"));
    assert!(!enabled(&dir, "work"));
}

#[test]
fn toggle_twice_round_trips() {
    let dir = TempDir::new().unwrap();
    focusctl(&dir)
        .args(["sleep", "toggle"])
        .assert()
        .success()
        .stdout(predicate::str::contains("enabled"));
    focusctl(&dir)
        .args(["sleep", "toggle"])
        .assert()
        .success()
        .stdout(predicate::str::contains("disabled"));
    assert!(!enabled(&dir, "sleep"));
}

#[test]
fn work_then_personal_keeps_both_on() {
    let dir = TempDir::new().unwrap();
    focusctl(&dir).args(["work", "on"]).assert().success();
    focusctl(&dir).args(["personal", "on"]).assert().success();
    assert!(enabled(&dir, "work"));
    assert!(enabled(&dir, "personal"));

    focusctl(&dir)
        .args(["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("active: Personal"));

    focusctl(&dir).args(["personal", "off"]).assert().success();
    assert!(!enabled(&dir, "personal"));
    assert!(enabled(&dir, "work"));

    let out = focusctl(&dir)
        .args(["status", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let status: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(status["focus_enabled"], false);
    assert!(status["active_mode"].is_null());
    assert_eq!(status["activations"].as_array().unwrap().len(), 1);
    assert_eq!(status["activations"][0]["mode"], "work");
}

#[test]
fn flags_after_the_mode_are_honoured() {
    let dir = TempDir::new().unwrap();
    let out = focusctl(&dir)
        .args(["work", "on", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let change: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(change["mode"], "work");
    assert_eq!(change["name"], "Work");
    assert_eq!(change["enabled"], true);
    assert!(enabled(&dir, "work"));

    let other_root = dir.path().join("elsewhere");
    focusctl(&dir)
        .args(["sleep", "-j", "toggle", "--root"])
        .arg(&other_root)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"enabled\": true"));
    assert!(other_root.join("state.redb").exists());
    assert!(!enabled(&dir, "sleep"));
}

#[test]
fn extra_argument_after_action_fails() {
    let dir = TempDir::new().unwrap();
    focusctl(&dir)
        .args(["work", "on", "now"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unexpected argument 'now'"))
        .stderr(predicate::str::contains("usage: focusctl work [on|off|toggle]"));
}

#[test]
fn unknown_mode_fails() {
    let dir = TempDir::new().unwrap();
    focusctl(&dir)
        .args(["meditation", "on"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unknown focus mode 'meditation'"));
}

#[test]
fn missing_action_fails() {
    let dir = TempDir::new().unwrap();
    focusctl(&dir)
        .arg("work")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("missing action for work mode"));
}

#[test]
fn invalid_action_fails() {
    let dir = TempDir::new().unwrap();
    focusctl(&dir)
        .args(["work", "maybe"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid action 'maybe'"));
}

// ---------------------------------------------------------------------------
// focusctl shortcuts
// ---------------------------------------------------------------------------

#[test]
fn shortcuts_install_list_uninstall() {
    let dir = TempDir::new().unwrap();
    focusctl(&dir)
        .args(["shortcuts", "install"])
        .assert()
        .success()
        .stdout(predicate::str::contains("15/15 actions installed"));

    let file = dir
        .path()
        .join("Shortcuts/FocusCTL - Toggle Work Focus.shortcut");
    let doc: serde_json::Value = serde_json::from_slice(&std::fs::read(&file).unwrap()).unwrap();
    let params = &doc["WFWorkflowActions"][0]["WFWorkflowActionParameters"];
    assert_eq!(params["WFSSHScript"], "focusctl work toggle");
    assert_eq!(params["WFSSHUser"], "tester");

    // Reinstalling converges on the same set
    focusctl(&dir).args(["shortcuts", "install"]).assert().success();
    focusctl(&dir)
        .args(["shortcuts", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("FocusCTL - Toggle Work Focus.shortcut"));
    let out = focusctl(&dir)
        .args(["shortcuts", "list", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let names: Vec<String> = serde_json::from_slice(&out).unwrap();
    assert_eq!(names.len(), 15);

    focusctl(&dir)
        .args(["shortcuts", "uninstall"])
        .assert()
        .success()
        .stdout(predicate::str::contains("All FocusCTL actions uninstalled"));
    focusctl(&dir)
        .args(["shortcuts", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No FocusCTL actions installed"));
}

#[test]
fn shortcuts_install_reports_partial_failure() {
    let dir = TempDir::new().unwrap();
    // A directory squatting on one target name makes that write fail
    std::fs::create_dir_all(
        dir.path()
            .join("Shortcuts/FocusCTL - Toggle Gaming Focus.shortcut"),
    )
    .unwrap();

    focusctl(&dir)
        .args(["shortcuts", "install"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("14/15 actions installed"))
        .stderr(predicate::str::contains("1 of 15 actions failed"));

    // The other fourteen were still written
    assert!(dir
        .path()
        .join("Shortcuts/FocusCTL - Toggle Work Focus.shortcut")
        .is_file());
    assert!(dir
        .path()
        .join("Shortcuts/FocusCTL - Toggle Friends Focus.shortcut")
        .is_file());
}

#[test]
fn shortcuts_uninstall_fails_when_an_entry_cannot_be_removed() {
    let dir = TempDir::new().unwrap();
    focusctl(&dir).args(["shortcuts", "install"]).assert().success();
    let work = dir
        .path()
        .join("Shortcuts/FocusCTL - Toggle Work Focus.shortcut");
    std::fs::remove_file(&work).unwrap();
    std::fs::create_dir(&work).unwrap();

    focusctl(&dir)
        .args(["shortcuts", "uninstall"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("failed to remove"));
    assert!(work.exists());
}

#[test]
fn shortcuts_without_subcommand_fails() {
    let dir = TempDir::new().unwrap();
    focusctl(&dir)
        .arg("shortcuts")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("missing shortcuts command"));
}

#[test]
fn shortcuts_show_prints_document_without_installing() {
    let dir = TempDir::new().unwrap();
    focusctl(&dir)
        .args(["shortcuts", "show", "gaming"])
        .assert()
        .success()
        .stdout(predicate::str::contains("gamecontroller.fill"))
        .stdout(predicate::str::contains("focusctl gaming toggle"));
    assert!(!dir
        .path()
        .join("Shortcuts/FocusCTL - Toggle Gaming Focus.shortcut")
        .exists());
}

#[test]
fn shortcuts_install_honours_config_ssh() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join("state")).unwrap();
    std::fs::write(
        dir.path().join("state/config.yaml"),
        "ssh:\n  host: studio.local\n  port: 2222\n",
    )
    .unwrap();
    focusctl(&dir).args(["shortcuts", "install"]).assert().success();

    let file = dir
        .path()
        .join("Shortcuts/FocusCTL - Toggle Reading Focus.shortcut");
    let doc: serde_json::Value = serde_json::from_slice(&std::fs::read(&file).unwrap()).unwrap();
    let params = &doc["WFWorkflowActions"][0]["WFWorkflowActionParameters"];
    assert_eq!(params["WFSSHHost"], "studio.local");
    assert_eq!(params["WFSSHPort"], "2222");
}

// ---------------------------------------------------------------------------
// focusctl config / version
// ---------------------------------------------------------------------------

#[test]
fn config_init_then_show() {
    let dir = TempDir::new().unwrap();
    focusctl(&dir)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote"));
    assert!(dir.path().join("state/config.yaml").exists());

    focusctl(&dir)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));

    focusctl(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tester@localhost:22"));
}

#[test]
fn config_set_persists_overrides() {
    let dir = TempDir::new().unwrap();
    focusctl(&dir)
        .args(["config", "set", "--ssh-host", "studio.local", "--ssh-port", "2200"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated"));
    focusctl(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tester@studio.local:2200"));

    focusctl(&dir)
        .args(["config", "set"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("nothing to set"));
}

#[test]
fn version_command() {
    let dir = TempDir::new().unwrap();
    focusctl(&dir)
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("FocusCTL version"));
}
