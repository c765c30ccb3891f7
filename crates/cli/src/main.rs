//! `onboard` -- submit a client onboarding form from the command line.
//!
//! # Environment variables
//!
//! | Variable                    | Required | Default    | Description                        |
//! |-----------------------------|----------|------------|------------------------------------|
//! | `ONBOARD_URL`               | yes      | --         | Endpoint receiving the JSON POST   |
//! | `ONBOARD_CONFIRMATION_PATH` | no       | `/success` | Confirmation view path             |
//! | `RUST_LOG`                  | no       | `onboard_cli=info,onboard_client=info` | Log filter |

use std::path::Path;

use anyhow::{bail, Context};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use onboard_cli::cli::{Cli, Cmd};
use onboard_cli::render;
use onboard_client::{ClientConfig, HttpTransport, SubmissionController, SubmitOutcome};
use onboard_core::ConfirmationView;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "onboard_cli=info,onboard_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.cmd {
        Cmd::Submit { input } => submit(&input).await,
        Cmd::Confirm { query } => {
            let view = ConfirmationView::from_query(&query);
            print!("{}", render::render_confirmation(&view));
            Ok(())
        }
    }
}

async fn submit(input: &Path) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read form input {}", input.display()))?;
    let raw = render::parse_raw_input(&text)?;

    let config = ClientConfig::from_env()?;
    tracing::info!(endpoint = %config.endpoint_url, "Loaded client configuration");

    let transport = HttpTransport::new(config.endpoint_url.clone())?;
    let controller = SubmissionController::new(transport);

    match controller.submit(raw).await {
        SubmitOutcome::Submitted(payload) => {
            println!("{}", payload.confirmation_url(&config.confirmation_path));
            Ok(())
        }
        SubmitOutcome::Invalid(errors) => {
            eprint!("{}", render::render_field_errors(&errors));
            bail!(errors)
        }
        SubmitOutcome::Failed(message) => bail!(message),
        SubmitOutcome::Rejected(reason) => bail!("Submission ignored: {reason:?}"),
    }
}
