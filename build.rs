use std::error::Error;
use std::time::{SystemTime, UNIX_EPOCH};

/// Stamps the binary with its build time and the git revision it was built from, if any.
fn main() -> Result<(), Box<dyn Error>> {
    // Build timestamp in milliseconds since epoch
    let build_timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)?
        .as_millis()
        .to_string();
    println!("cargo:rustc-env=BUILD_TIMESTAMP={}", build_timestamp);

    let revision = std::process::Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|rev| rev.trim().to_string())
        .filter(|rev| !rev.is_empty())
        .unwrap_or_else(|| "unknown".to_string());
    println!("cargo:rustc-env=BUILD_REVISION={}", revision);

    println!("cargo:rerun-if-changed=build.rs");
    Ok(())
}
