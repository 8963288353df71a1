//! Build script for lopper
//!
//! Embeds the git commit the binary was built from for `--version`.

use std::process::Command;

/// Entry point for the build script.
fn main() {
  embed_git_hash();

  println!("cargo:rerun-if-changed=build.rs");
  println!("cargo:rerun-if-changed=../.git/HEAD");
}

/// Sets `LOPPER_GIT_HASH`, falling back to `unknown` when git is unavailable
/// or the sources are not a checkout.
fn embed_git_hash() {
  let git_hash = Command::new("git")
    .args(["rev-parse", "--short", "HEAD"])
    .output()
    .ok()
    .filter(|output| output.status.success())
    .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
    .filter(|hash| !hash.is_empty())
    .unwrap_or_else(|| "unknown".to_string());

  println!("cargo:rustc-env=LOPPER_GIT_HASH={git_hash}");
}
