use std::process::Command;

use chrono::Utc;

/// Run git with `args` in the workspace and return trimmed stdout on success.
fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!text.is_empty()).then_some(text)
}

fn main() {
    let commit = git(&["rev-parse", "--short", "HEAD"]).unwrap_or_else(|| "nogit".to_string());

    // Uncommitted edits to tracked files get a build stamp so two local
    // builds of the same commit can still be told apart
    let dirty = git(&["status", "--porcelain", "--untracked-files=no"]).is_some();
    let build_hash = if dirty {
        format!("{commit}+{}", Utc::now().format("%Y%m%dT%H%MZ"))
    } else {
        commit
    };

    println!("cargo:rustc-env=BUILD_HASH={build_hash}");
    println!("cargo:rerun-if-changed=../../.git/HEAD");
    println!("cargo:rerun-if-changed=../../.git/index");
}
