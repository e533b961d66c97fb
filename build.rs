//! Embeds the commit, build date and profile for `campfire --version`.

use std::env;
use std::fs;
use std::path::PathBuf;
use std::process::Command;

/// Short commit hash from `CAMPFIRE_COMMIT` or git, `unknown` without either.
fn commit() -> String {
    if let Ok(commit) = env::var("CAMPFIRE_COMMIT") {
        return commit;
    }
    Command::new("git")
        .args(["rev-parse", "--short=7", "HEAD"])
        .output()
        .ok()
        .filter(|out| out.status.success())
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}

fn build_date() -> String {
    env::var("CAMPFIRE_BUILD_DATE")
        .unwrap_or_else(|_| chrono::Utc::now().format("%Y-%m-%d").to_string())
}

fn main() {
    let profile = env::var("PROFILE").unwrap_or_else(|_| "debug".to_string());
    let generated = format!(
        "pub const BUILD_COMMIT: &str = {:?};\n\
         pub const BUILD_DATE: &str = {:?};\n\
         pub const BUILD_PROFILE: &str = {:?};\n",
        commit(),
        build_date(),
        profile,
    );

    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("cargo sets OUT_DIR"));
    fs::write(out_dir.join("build_info.rs"), generated).expect("write build_info.rs");

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-env-changed=CAMPFIRE_COMMIT");
    println!("cargo:rerun-if-env-changed=CAMPFIRE_BUILD_DATE");
}
