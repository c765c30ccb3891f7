use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "onboard", version, about = "Client onboarding form")]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Debug, Subcommand)]
pub enum Cmd {
    /// Validate a filled-in form and submit it to the onboarding endpoint
    Submit {
        /// JSON object of raw field values keyed by field name
        #[arg(long, short)]
        input: PathBuf,
    },
    /// Render the confirmation view for a forwarding query string or URL
    Confirm {
        query: String,
    },
}
