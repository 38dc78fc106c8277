// build.rs

use std::env;

fn main() {
    // A packager may stamp its own version; otherwise the crate version is reported.
    let version = env::var("SPINELJSON_VERSION")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .or_else(|| env::var("CARGO_PKG_VERSION").ok())
        .unwrap_or_else(|| "dev".to_string());
    let profile = env::var("PROFILE").unwrap_or_else(|_| "unknown".to_string());

    println!("cargo:rustc-env=SPINELJSON_BUILD_VERSION={version}");
    println!("cargo:rustc-env=SPINELJSON_BUILD_PROFILE={profile}");
    println!("cargo:rerun-if-env-changed=SPINELJSON_VERSION");
    println!("cargo:rerun-if-changed=build.rs");
}
