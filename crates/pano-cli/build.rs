use std::process::Command;

/// Exposes `PANO_GIT_SHA` to the binary.
///
/// Packagers building outside a checkout can set `PANO_GIT_SHA` themselves;
/// otherwise `git describe` is asked, and "unknown" is the last resort.
fn main() {
    println!("cargo:rerun-if-env-changed=PANO_GIT_SHA");

    let revision = std::env::var("PANO_GIT_SHA")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .or_else(git_revision)
        .unwrap_or_else(|| "unknown".to_string());
    println!("cargo:rustc-env=PANO_GIT_SHA={revision}");

    println!("cargo:rerun-if-changed=../../.git/HEAD");
}

fn git_revision() -> Option<String> {
    let out = Command::new("git")
        .args(["describe", "--always", "--dirty", "--abbrev=8"])
        .output()
        .ok()?;
    if !out.status.success() {
        return None;
    }
    let rev = String::from_utf8(out.stdout).ok()?;
    Some(rev.trim().to_string()).filter(|r| !r.is_empty())
}
