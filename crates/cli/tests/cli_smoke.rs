//! CLI smoke tests for liquidpkg.
//!
//! These tests verify that the commands run without panicking, return the
//! right exit codes and surface configuration errors to the user.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get a Command for the liquidpkg binary.
fn liquidpkg_cmd() -> Command {
  cargo_bin_cmd!("liquidpkg")
}

fn inspect_json(args: &[&str]) -> serde_json::Value {
  let output = liquidpkg_cmd()
    .args(["--output", "json", "inspect"])
    .args(args)
    .output()
    .unwrap();
  assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
  serde_json::from_slice(&output.stdout).unwrap()
}

// =============================================================================
// Help & Version
// =============================================================================

#[test]
fn help_flag_works() {
  liquidpkg_cmd()
    .arg("--help")
    .assert()
    .success()
    .stdout(predicate::str::contains("Usage"));
}

#[test]
fn version_flag_works() {
  liquidpkg_cmd()
    .arg("--version")
    .assert()
    .success()
    .stdout(predicate::str::contains("liquidpkg"));
}

#[test]
fn subcommand_help_works() {
  for cmd in &["info", "inspect", "create", "package-info"] {
    liquidpkg_cmd()
      .arg(cmd)
      .arg("--help")
      .assert()
      .success()
      .stdout(predicate::str::contains("Usage"));
  }
}

#[test]
fn info_runs() {
  liquidpkg_cmd()
    .arg("info")
    .assert()
    .success()
    .stdout(predicate::str::contains("liquid-dsp"));
}

// =============================================================================
// inspect
// =============================================================================

#[test]
fn inspect_rejects_macos_static() {
  liquidpkg_cmd()
    .args(["inspect", "--os", "Macos", "--arch", "armv8"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("Issue with liquid-dsp static and libtool"));
}

#[test]
fn inspect_rejects_visual_studio() {
  liquidpkg_cmd()
    .args(["inspect", "--os", "Windows", "--arch", "x86_64", "--compiler", "msvc", "--shared"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("does not support Visual Studio"));
}

#[test]
fn inspect_macos_shared_targets_dylib() {
  liquidpkg_cmd()
    .args(["inspect", "--os", "Macos", "--arch", "armv8", "--shared"])
    .assert()
    .success()
    .stdout(predicate::str::contains("libliquid.dylib"));
}

#[test]
fn inspect_linux_static_keeps_pic() {
  let report = inspect_json(&["--os", "Linux", "--arch", "x86_64"]);
  assert_eq!(report["target"], "libliquid.a");
  assert_eq!(report["configuration"]["options"]["fPIC"], true);
  assert_eq!(report["configuration"]["options"]["shared"], false);
}

#[test]
fn inspect_windows_shared_is_unresolved_archive() {
  let report = inspect_json(&["--os", "Windows", "--arch", "x86_64", "--shared"]);
  assert_eq!(report["target"], "libliquid.a");
  assert_eq!(report["target_status"], "Unresolved");
  assert!(report["configuration"]["options"].get("fPIC").is_none());
}

#[test]
fn inspect_drops_cpp_settings() {
  let report = inspect_json(&["--os", "Linux", "--arch", "x86_64", "--cppstd", "17", "--libcxx", "libstdc++11"]);
  assert!(report["configuration"]["settings"]["compiler"]["cppstd"].is_null());
  assert!(report["configuration"]["settings"]["compiler"]["libcxx"].is_null());
}

#[test]
fn inspect_rejects_unknown_os() {
  liquidpkg_cmd()
    .args(["inspect", "--os", "Plan9"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("unknown os"));
}

// =============================================================================
// package-info
// =============================================================================

#[test]
fn package_info_links_libm_on_linux() {
  liquidpkg_cmd()
    .args(["package-info", "--os", "Linux", "--arch", "x86_64"])
    .assert()
    .success()
    .stdout(predicate::str::contains("-lliquid -lm"));
}

#[test]
fn package_info_no_libm_on_macos() {
  let output = liquidpkg_cmd()
    .args(["--output", "json", "package-info", "--os", "Macos", "--arch", "armv8", "--shared"])
    .output()
    .unwrap();
  assert!(output.status.success());
  let info: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(info["libs"], serde_json::json!(["liquid"]));
  assert_eq!(info["system_libs"], serde_json::json!([]));
}

#[test]
fn package_info_missing_package_dir_fails() {
  let temp = TempDir::new().unwrap();
  liquidpkg_cmd()
    .args(["package-info", "--package-dir"])
    .arg(temp.path().join("nope"))
    .assert()
    .failure()
    .stderr(predicate::str::contains("Failed to read package info"));
}

// =============================================================================
// create
// =============================================================================

#[test]
fn create_rejects_invalid_configuration_before_reading_sources() {
  let temp = TempDir::new().unwrap();
  liquidpkg_cmd()
    .args(["create", "--os", "Macos", "--arch", "armv8", "--workdir"])
    .arg(temp.path())
    .assert()
    .failure()
    .stderr(predicate::str::contains("Issue with liquid-dsp static and libtool"));
  assert!(!temp.path().join("source_subfolder").exists());
}

#[test]
fn create_without_sources_file_fails() {
  let temp = TempDir::new().unwrap();
  liquidpkg_cmd()
    .args(["create", "--os", "Linux", "--arch", "x86_64", "--sources"])
    .arg(temp.path().join("missing.yml"))
    .arg("--workdir")
    .arg(temp.path())
    .assert()
    .failure()
    .stderr(predicate::str::contains("Failed to load sources"));
}

#[test]
fn create_help_mentions_builtin_sources() {
  liquidpkg_cmd()
    .args(["create", "--help"])
    .assert()
    .success()
    .stdout(predicate::str::contains("built into liquidpkg"));
}

#[test]
fn create_skip_source_requires_extracted_tree() {
  let temp = TempDir::new().unwrap();
  liquidpkg_cmd()
    .args(["create", "--os", "Linux", "--arch", "x86_64", "--skip-source", "--workdir"])
    .arg(temp.path())
    .assert()
    .failure()
    .stderr(predicate::str::contains("source tree not found"));
}
