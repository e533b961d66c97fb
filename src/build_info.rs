//! Build metadata generated by `build.rs`.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// One-line version string, e.g. `campfire 0.1.0 (a1b2c3d, 2026-10-17, release)`.
pub fn version_line() -> String {
    format!(
        "campfire {} ({}, {}, {})",
        env!("CARGO_PKG_VERSION"),
        BUILD_COMMIT,
        BUILD_DATE,
        BUILD_PROFILE
    )
}
