//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the miroapi binary.

use clap::{Parser, Subcommand, ValueEnum};

/// Miro API command-line interface.
#[derive(Parser, Debug)]
#[command(name = "miroapi", about = "Miro API CLI", version)]
pub struct Cli {
    /// Output results as JSON instead of human-readable text.
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Abandon the call after this many seconds.
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Miro access key.
    #[arg(long, env = "MIRO_ACCESS_KEY", hide_env_values = true)]
    pub access_key: Option<String>,

    /// API base URL.
    #[arg(long, env = "MIRO_API_URL", default_value = "https://api.miro.com/")]
    pub api_url: String,

    /// Value of the `User-Agent` header. Omitted when empty.
    #[arg(long, env = "MIRO_USER_AGENT", default_value = "")]
    pub user_agent: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Get a single entity by ID.
    Get {
        /// The type of entity to get.
        entity: Entity,

        /// The entity ID.
        id: String,
    },

    /// Show the user the access key belongs to.
    Me,

    /// Create a board.
    CreateBoard {
        #[arg(long)]
        name: String,

        #[arg(long, default_value = "")]
        description: String,

        /// Link access (e.g., "private", "view", "comment").
        #[arg(long)]
        access: Option<String>,
    },

    /// Delete an entity by ID.
    Delete {
        /// The type of entity to delete.
        entity: DeletableEntity,

        /// The entity ID.
        id: String,
    },

    /// List the organization audit log.
    AuditLogs,

    /// Describe the access key in use.
    Token,
}

/// Entity types that can be fetched.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Entity {
    #[value(alias = "boards")]
    Board,
    #[value(alias = "users")]
    User,
    #[value(alias = "teams")]
    Team,
    /// A user's membership of a board.
    BoardConnection,
    /// A user's membership of a team.
    TeamConnection,
}

/// Entity types that can be deleted.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeletableEntity {
    #[value(alias = "boards")]
    Board,
    BoardConnection,
    TeamConnection,
}
