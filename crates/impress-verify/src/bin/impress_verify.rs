//! impress-verify command-line front end
//!
//! Runs the verification pipeline on a local file and prints the result as JSON.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use impress_identifiers::{
    extract_identifier, normalize_identifier, ExtractedIdentifier, IdentifierKind,
};
use impress_verify::logging::init_logging;
use impress_verify::{classify, Verifier, VerificationResult, VerifierConfig};
use serde_json::json;

/// Exit code when the document needs manual review
const EXIT_PENDING_REVIEW: u8 = 2;

#[derive(Parser, Debug)]
#[command(name = "impress-verify", version, about = "Verify publication identifiers against external registries")]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Registry timeout in seconds (overrides the config file)
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Verify an uploaded document
    Verify {
        /// Document to verify
        path: PathBuf,
    },
    /// Print the identifier found in a document, without network access
    Extract {
        /// Plain-text document to scan
        path: PathBuf,
    },
    /// Verify one identifier directly
    Lookup {
        /// doi, issn or isbn
        kind: IdentifierKind,
        value: String,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => VerifierConfig::load(path)?,
        None => VerifierConfig::default(),
    };
    if let Some(timeout) = cli.timeout {
        config.timeout_secs = timeout;
    }

    match &cli.command {
        Command::Extract { path } => {
            let text = std::fs::read_to_string(path)?;
            let identifier = extract_identifier(&text).into_option();
            print_json(&json!({ "identifier": identifier }), cli.pretty)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Verify { path } => {
            let bytes = std::fs::read(path)?;
            let verifier = Verifier::from_config(&config)?;
            let result = verifier
                .verify_document_until(&bytes, shutdown_signal())
                .await;
            report(result, cli.pretty)
        }
        Command::Lookup { kind, value } => {
            let verifier = Verifier::from_config(&config)?;
            let identifier = ExtractedIdentifier::new(*kind, normalize_identifier(*kind, value));
            let result = verifier.verify_identifier(&identifier).await;
            report(Some(result), cli.pretty)
        }
    }
}

fn report(
    result: Option<VerificationResult>,
    pretty: bool,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let Some(result) = result else {
        return Err("verification cancelled".into());
    };

    let decision = classify(&result);
    print_json(
        &json!({
            "result": result,
            "approved": decision.is_approved,
            "feedback": decision.status.feedback_label(),
        }),
        pretty,
    )?;

    if decision.is_approved {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(EXIT_PENDING_REVIEW))
    }
}

fn print_json(value: &serde_json::Value, pretty: bool) -> Result<(), serde_json::Error> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", out);
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}
