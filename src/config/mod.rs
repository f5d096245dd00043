pub mod credentials;
pub mod toml_config;

use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "property-relay")]
#[command(about = "Look up a rental listing and relay it over WhatsApp")]
pub struct CliConfig {
    /// Path to an optional TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Override the dataset path from the configuration
    #[arg(long, global = true)]
    pub dataset: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List the available locations and BHK labels
    Options,

    /// Show the message for the first matching listing without sending it
    Preview {
        #[arg(short, long)]
        location: String,
        #[arg(short, long)]
        bhk: String,
    },

    /// Send the first matching listing to a WhatsApp number
    Send {
        #[arg(short, long)]
        location: String,
        #[arg(short, long)]
        bhk: String,
        /// WhatsApp number including country code, e.g. +91XXXXXXXXXX
        #[arg(short, long)]
        phone: String,
    },
}
