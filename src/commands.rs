//! One-shot commands that talk to the backend without the dashboard.

use crate::api::LedgerApi;
use crate::config::Config;
use crate::format::{UNKNOWN, format_timestamp, sanitize, sanitize_or_unknown};
use crate::ui::dashboard::view::{GENESIS_PREV_HASH, verification_view};
use crate::workers::exporter::{ExportOutcome, run_export};
use crate::{print_cmd_error, print_cmd_info, print_cmd_success};
use std::error::Error;
use std::path::Path;

/// Runs a chain verification and prints the report.
///
/// Fails when the request fails or when the backend flags any block.
pub async fn verify(api: &dyn LedgerApi) -> Result<(), Box<dyn Error>> {
    print_cmd_info!("Verifying chain", "{}", api.environment().api_url());
    let report = match api.verify_chain().await {
        Ok(report) => report,
        Err(e) => {
            print_cmd_error!("Failed to verify blockchain", sanitize(&e.to_string()).as_str());
            return Err(e.into());
        }
    };

    let view = verification_view(&report);
    if view.problems.is_empty() {
        print_cmd_success!(&view.headline, "{}", view.summary);
    } else {
        print_cmd_error!(&view.headline, view.summary.as_str());
    }
    for fact in view.confirmations {
        println!("  ✓ {}", fact);
    }
    println!("  {}", view.audit);
    for step in &view.steps {
        println!("  ✓ {}", step);
    }
    for problem in &view.problems {
        println!("  ✗ {}", problem);
    }

    if view.problems.is_empty() {
        Ok(())
    } else {
        Err(Box::from(view.summary))
    }
}

/// Requests an audit report, saving it into `download_dir` when the backend
/// sends the file itself.
pub async fn export_audit(api: &dyn LedgerApi, download_dir: &Path) -> Result<(), Box<dyn Error>> {
    print_cmd_info!("Requesting audit report", "{}", api.environment().api_url());
    match run_export(api, download_dir).await {
        Ok(ExportOutcome::Saved { filename, path, bytes }) => {
            print_cmd_success!(
                "Audit report saved",
                "{} ({} bytes) at {}",
                filename,
                bytes,
                path.display()
            );
            Ok(())
        }
        Ok(ExportOutcome::Reported { filename }) => {
            print_cmd_success!("Audit report generated", "{}", filename);
            Ok(())
        }
        Err(e) => {
            print_cmd_error!("Failed to generate audit report", sanitize(&e.to_string()).as_str());
            Err(e.into())
        }
    }
}

/// Prints a single block.
pub async fn show_block(api: &dyn LedgerApi, index: u64) -> Result<(), Box<dyn Error>> {
    let block = match api.get_block(index).await {
        Ok(block) => block,
        Err(e) => {
            print_cmd_error!("Failed to load block", sanitize(&e.to_string()).as_str());
            return Err(e.into());
        }
    };

    let prev_hash = match &block.prev_hash {
        Some(hash) => sanitize_or_unknown(hash),
        None if block.is_genesis() => GENESIS_PREV_HASH.to_string(),
        None => UNKNOWN.to_string(),
    };
    print_cmd_success!(&format!("Block #{}", block.index), "");
    println!("  Data:      {}", sanitize_or_unknown(&block.data));
    println!("  Hash:      {}", sanitize_or_unknown(&block.hash));
    println!("  Prev hash: {}", prev_hash);
    println!("  Time:      {}", format_timestamp(block.timestamp));
    println!("  Nonce:     {}", block.nonce);
    Ok(())
}

/// Forgets the first-visit flag and the remembered backend.
pub fn reset(config_path: &Path) -> Result<(), Box<dyn Error>> {
    Config::clear(config_path)?;
    print_cmd_success!(
        "Preferences cleared.",
        "Removed {}",
        config_path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockLedgerApi;
    use crate::api::types::{BlockReport, VerificationResult};
    use crate::environment::Environment;
    use tempfile::tempdir;

    fn api_with_report(report: VerificationResult) -> MockLedgerApi {
        let mut api = MockLedgerApi::new();
        api.expect_environment()
            .return_const(Environment::default());
        api.expect_verify_chain()
            .times(1)
            .return_once(move || Ok(report));
        api
    }

    #[tokio::test]
    async fn clean_verification_succeeds() {
        let api = api_with_report(VerificationResult {
            total_blocks: 4,
            ..Default::default()
        });
        assert!(verify(&api).await.is_ok());
    }

    #[tokio::test]
    async fn flagged_verification_fails() {
        let api = api_with_report(VerificationResult {
            total_blocks: 4,
            valid: Some(false),
            blocks: vec![BlockReport {
                block_index: 2,
                valid: false,
                ..Default::default()
            }],
            ..Default::default()
        });
        assert!(verify(&api).await.is_err());
    }

    #[test]
    fn reset_removes_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        Config::new(true, None).save(&path).unwrap();

        reset(&path).unwrap();
        assert!(!path.exists());
        // Resetting twice is fine.
        reset(&path).unwrap();
    }
}
