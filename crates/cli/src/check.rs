use std::path::Path;
use std::process;

use compat_core::ReportOptions;
use compat_interchange::load_snapshot;

use crate::config::resolve_config;
use crate::{report_error, OutputFormat, EXIT_FAIL, EXIT_INPUT_ERROR};

pub(crate) fn cmd_check(
    before_path: &Path,
    after_path: &Path,
    allow: &[String],
    config_path: Option<&Path>,
    output: OutputFormat,
    quiet: bool,
) {
    let cwd = std::env::current_dir().unwrap_or_else(|_| ".".into());
    let config = match resolve_config(config_path, &cwd) {
        Ok(c) => c,
        Err(e) => {
            report_error(&e.to_string(), output, quiet);
            process::exit(EXIT_INPUT_ERROR);
        }
    };

    let before = match load_snapshot(before_path) {
        Ok(s) => s,
        Err(e) => {
            report_error(&e.to_string(), output, quiet);
            process::exit(EXIT_INPUT_ERROR);
        }
    };
    let after = match load_snapshot(after_path) {
        Ok(s) => s,
        Err(e) => {
            report_error(&e.to_string(), output, quiet);
            process::exit(EXIT_INPUT_ERROR);
        }
    };

    let options = ReportOptions {
        allow_breaking: config.allow_set(allow),
    };
    tracing::info!(
        before = %before.snapshot.version(),
        after = %after.snapshot.version(),
        allowed = options.allow_breaking.len(),
        "checking compatibility"
    );

    let report = compat_core::check(&before.snapshot, &after.snapshot, &options)
        .with_digests(before.digest, after.digest);

    if !quiet {
        match output {
            OutputFormat::Json => match report.to_json() {
                Ok(json) => {
                    println!(
                        "{}",
                        serde_json::to_string_pretty(&json).unwrap_or_default()
                    );
                }
                Err(e) => {
                    let msg = format!("internal error: failed to serialize report: {}", e);
                    report_error(&msg, output, quiet);
                    process::exit(EXIT_FAIL);
                }
            },
            OutputFormat::Text => {
                println!("{}", report.to_text());
            }
        }
    }

    if !report.passed() {
        process::exit(EXIT_FAIL);
    }
}
