//! Clothy CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! clothy-cli migrate
//!
//! # Create an admin profile
//! clothy-cli admin create-user -e admin@example.com -f Ada -l Lovelace
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `admin create-user` - Create an admin profile row

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "clothy-cli")]
#[command(author, version, about = "Clothy CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage user profiles
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Create a profile row with the admin role
    CreateUser {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// First name
        #[arg(short, long, default_value = "")]
        first_name: String,

        /// Last name
        #[arg(short, long, default_value = "")]
        last_name: String,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "clothy_cli=info,clothy_server=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Migrate => commands::migrate::run().await,
        Commands::Admin {
            action:
                AdminAction::CreateUser {
                    email,
                    first_name,
                    last_name,
                },
        } => commands::admin::create_user(&email, &first_name, &last_name).await,
    };

    if let Err(e) = result {
        tracing::error!("command failed: {e}");
        std::process::exit(1);
    }
}
