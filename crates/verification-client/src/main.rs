//! HumanHash command-line client
//!
//! Commands:
//! - kyc: Request a KYC check for a human hash id
//! - zkp: Submit a proof for a human hash id
//! - verify-zkp: Verify a proof against a verifying key
//! - biometric: Upload a biometric sample with a bearer token
//! - health: Check both services

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use verification_client::{
    BiometricFile, ClientConfig, OracleResponse, VerificationClient, VerificationOutcome,
};

#[derive(Parser)]
#[command(name = "humanhash")]
#[command(about = "Submit KYC, ZKP and biometric verification requests")]
struct Cli {
    /// Print the tagged outcome as JSON instead of the display text
    #[arg(long, global = true)]
    json: bool,

    /// Oracle origin (overrides ORACLE_URL)
    #[arg(long, global = true)]
    oracle_url: Option<String>,

    /// Biometric API origin (overrides BIOMETRIC_API_URL)
    #[arg(long, global = true)]
    biometric_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Request a KYC check
    Kyc {
        #[arg(long, default_value = "")]
        human_hash_id: String,
    },

    /// Submit a zero-knowledge proof
    Zkp {
        #[arg(long, default_value = "")]
        human_hash_id: String,

        #[arg(long, default_value = "")]
        proof: String,
    },

    /// Verify a zero-knowledge proof
    VerifyZkp {
        #[arg(long, default_value = "")]
        human_hash_id: String,

        #[arg(long, default_value = "")]
        proof: String,

        #[arg(long, default_value = "")]
        verifying_key: String,
    },

    /// Upload a biometric sample
    Biometric {
        /// Image file holding the sample
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Bearer token for the biometric API
        #[arg(short, long, env = "HUMANHASH_TOKEN", hide_env_values = true)]
        token: Option<String>,
    },

    /// Check oracle and biometric API health
    Health,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Results go to stdout, logs to stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "verification_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let env_config = ClientConfig::load_env().context("Failed to load configuration")?;
    let config = configure(&cli, env_config)?;
    info!("Oracle URL: {}", config.oracle_url);
    info!("Biometric API URL: {}", config.biometric_api_url);

    let client = VerificationClient::new(config).context("Failed to create client")?;

    let success = match cli.command {
        Commands::Kyc { human_hash_id } => {
            report(&client.request_kyc(&human_hash_id).await, cli.json)?
        }
        Commands::Zkp {
            human_hash_id,
            proof,
        } => report(&client.request_zkp(&human_hash_id, &proof).await, cli.json)?,
        Commands::VerifyZkp {
            human_hash_id,
            proof,
            verifying_key,
        } => report(
            &client
                .verify_zkp(&human_hash_id, &proof, &verifying_key)
                .await,
            cli.json,
        )?,
        Commands::Biometric { file, token } => {
            let file = match file {
                Some(path) => Some(
                    BiometricFile::from_path(&path)
                        .with_context(|| format!("Failed to read {}", path.display()))?,
                ),
                None => None,
            };
            report(
                &client.upload_biometric(file, token.as_deref()).await,
                cli.json,
            )?
        }
        Commands::Health => health(&client).await,
    };

    Ok(if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Environment configuration with command-line overrides applied
fn configure(cli: &Cli, mut config: ClientConfig) -> Result<ClientConfig> {
    if let Some(url) = &cli.oracle_url {
        config.oracle_url = url.clone();
    }
    if let Some(url) = &cli.biometric_url {
        config.biometric_api_url = url.clone();
    }

    let config = config.normalized();
    config.validate()?;

    Ok(config)
}

fn report<T>(outcome: &VerificationOutcome<T>, json: bool) -> Result<bool>
where
    T: OracleResponse + Serialize,
{
    if json {
        println!("{}", serde_json::to_string_pretty(outcome)?);
    } else {
        println!("{}", outcome);
    }

    Ok(outcome.is_success())
}

async fn health(client: &VerificationClient) -> bool {
    let checks = [
        ("oracle", client.oracle_health().await),
        ("biometric api", client.biometric_health().await),
    ];

    let mut all_healthy = true;
    for (name, result) in checks {
        match result {
            Ok(true) => println!("{}: healthy", name),
            Ok(false) => {
                all_healthy = false;
                println!("{}: unhealthy", name);
            }
            Err(e) => {
                all_healthy = false;
                println!("{}: unreachable ({})", name, e);
            }
        }
    }

    all_healthy
}
