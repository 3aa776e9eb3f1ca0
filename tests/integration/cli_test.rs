//! Integration tests for the framestep binary

use predicates::prelude::*;

use super::helpers::{framestep_cmd, temp_home};

#[test]
fn help_lists_subcommands() {
    let home = temp_home();
    framestep_cmd(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("step"))
        .stdout(predicate::str::contains("calibrate"))
        .stdout(predicate::str::contains("view"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn version_includes_package_version() {
    let home = temp_home();
    framestep_cmd(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn step_forward_without_snap() {
    let home = temp_home();
    framestep_cmd(&home)
        .args(["step", "--position=5", "--duration=10", "--snap=off"])
        .assert()
        .success()
        .stdout("5.033333\n");
}

#[test]
fn step_backward_from_zero_is_clamped() {
    let home = temp_home();
    framestep_cmd(&home)
        .args(["step", "--position=0", "--duration=10", "--backward"])
        .assert()
        .success()
        .stdout("0.000000\n");
}

#[test]
fn step_forward_near_end_hits_duration() {
    let home = temp_home();
    framestep_cmd(&home)
        .args(["step", "--position", "9.99", "--duration", "10"])
        .assert()
        .success()
        .stdout("10.000000\n");
}

#[test]
fn step_with_explicit_frame_duration() {
    let home = temp_home();
    framestep_cmd(&home)
        .args([
            "step",
            "--position",
            "1.01",
            "--duration",
            "10",
            "--step",
            "0.04",
            "--snap",
            "directional",
        ])
        .assert()
        .success()
        .stdout("1.080000\n");
}

#[test]
fn step_rejects_non_positive_duration() {
    let home = temp_home();
    framestep_cmd(&home)
        .args(["step", "--position", "1", "--duration", "0"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("duration must be a positive"));
}

#[test]
fn step_rejects_non_positive_frame_step() {
    let home = temp_home();
    for step in ["--step=0", "--step=-0.04"] {
        framestep_cmd(&home)
            .args(["step", "--position=1", "--duration=10", step])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("frame step must be a positive"));
    }
}

#[test]
fn step_uses_snap_mode_from_config() {
    let home = temp_home();
    let config_dir = home.path().join(".config").join("framestep");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(config_dir.join("config.toml"), "[snap]\nenabled = false\n").unwrap();

    // Snapped to the 1/30 grid this would be 5.033333
    framestep_cmd(&home)
        .args(["step", "--position", "5.01", "--duration", "10"])
        .assert()
        .success()
        .stdout("5.043333\n");
}

#[test]
fn calibrate_without_frame_callbacks_reports_json() {
    let home = temp_home();
    framestep_cmd(&home)
        .args(["calibrate", "--no-frame-callbacks", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"fallback\": \"unsupported\""))
        .stdout(predicate::str::contains("\"calibrated\": false"));
}

#[test]
fn calibrate_measures_simulated_video() {
    let home = temp_home();
    framestep_cmd(&home)
        .args(["calibrate", "--fps", "30", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"calibrated\": true"))
        .stdout(predicate::str::contains("\"fallback\": null"));
}

#[test]
fn calibrate_survives_unreachable_frames() {
    let home = temp_home();
    framestep_cmd(&home)
        .args(["calibrate", "--fps=1e-21", "--duration=1e30", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"fallback\": \"no_samples\""));
}

#[test]
fn calibrate_text_output() {
    let home = temp_home();
    framestep_cmd(&home)
        .args(["calibrate", "--block-autoplay"])
        .assert()
        .success()
        .stdout(predicate::str::contains("frame step: 0.033333s"))
        .stdout(predicate::str::contains("playback could not be started"));
}

#[test]
fn calibrate_rejects_zero_fps() {
    let home = temp_home();
    framestep_cmd(&home)
        .args(["calibrate", "--fps", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("frame rate must be positive"));
}

#[test]
fn config_path_is_inside_config_dir() {
    let home = temp_home();
    framestep_cmd(&home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("framestep"))
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn config_show_prints_defaults() {
    let home = temp_home();
    framestep_cmd(&home)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[snap]"))
        .stdout(predicate::str::contains("mode = \"nearest\""))
        .stdout(predicate::str::contains("max_frames = 12"));
}

#[test]
fn config_migrate_creates_then_reports_up_to_date() {
    let home = temp_home();
    framestep_cmd(&home)
        .args(["config", "migrate", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("created successfully"));

    let path = home
        .path()
        .join(".config")
        .join("framestep")
        .join("config.toml");
    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("[calibration]"));

    framestep_cmd(&home)
        .args(["config", "migrate", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already up to date"));
}

#[test]
fn completions_for_bash() {
    let home = temp_home();
    framestep_cmd(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("framestep"));
}
