//! Miro REST API client library.
//!
//! A typed client for the Miro whiteboard API (v1). Every call goes through
//! one shared transport that authenticates the request, records the
//! service's rate-limit headers and checks the response status. Response
//! bodies are decoded tolerantly: key casing does not matter, unknown keys
//! are ignored and a `null` nested object becomes `None`.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::time::Duration;
//! use miroapi::{CallContext, CreateBoardRequest, MiroClient};
//!
//! #[tokio::main]
//! async fn main() -> miroapi::Result<()> {
//!     // Create client from environment variables
//!     let client = MiroClient::from_env()?;
//!     let ctx = CallContext::background().with_timeout(Duration::from_secs(10));
//!
//!     // Who am I?
//!     let me = client.users().current(&ctx).await?;
//!     println!("Signed in as {}", me.name);
//!
//!     // Create a board
//!     let board = client
//!         .boards()
//!         .create(
//!             &ctx,
//!             &CreateBoardRequest {
//!                 name: "Retro".to_string(),
//!                 description: "Sprint 42".to_string(),
//!                 sharing_policy: None,
//!             },
//!         )
//!         .await?;
//!     println!("Created {}", board.view_link);
//!
//!     // Rate-limit budget left after the last response
//!     println!("{} calls left", client.rate_limit().remaining);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`MiroClient`] builds and executes requests and owns the rate-limit
//!   snapshot.
//! - Resource services ([`BoardsService`], [`UsersService`], ...) borrow the
//!   client and map each operation to one endpoint.
//! - [`Decode`] is implemented by every entity through a static field table.
//! - [`CallContext`] carries per-call cancellation and deadline.
//!
//! # Configuration
//!
//! The client reads configuration from environment variables:
//!
//! - `MIRO_ACCESS_KEY` (required) - Your Miro access key
//! - `MIRO_API_URL` (optional) - Base URL (defaults to `https://api.miro.com/`)
//! - `MIRO_USER_AGENT` (optional) - Value of the `User-Agent` header

pub mod cli;
mod client;
mod context;
pub mod decode;
mod error;
mod models;
pub mod output;
mod pagination;
mod rate_limit;

// Re-export core types
pub use client::MiroClient;
pub use context::CallContext;
pub use decode::{Decode, DecodeError};
pub use error::{MiroError, Result};
pub use pagination::Page;
pub use rate_limit::{RateLimit, DEFAULT_RATE_LIMIT};

// Re-export models
pub use models::{
    // Errors
    ApiErrorBody,
    // Audit logs
    AuditLogEntry,
    AuditLogsService,
    Context,
    Detail,
    Organization,
    // Authorization
    AuthorizationInfo,
    AuthorizationService,
    // Boards
    Board,
    BoardsService,
    CreateBoardRequest,
    ShareBoardRequest,
    SharingPolicy,
    UpdateBoardRequest,
    // Connections
    BoardUserConnection,
    BoardUserConnectionsService,
    TeamUserConnection,
    TeamUserConnectionsService,
    UpdateConnectionRequest,
    // Pictures
    MiniPicture,
    Picture,
    PictureOwner,
    PicturesService,
    UpsertPictureRequest,
    // Teams
    MiniTeam,
    Team,
    TeamsService,
    UpdateTeamRequest,
    // Users
    MiniUser,
    User,
    UsersService,
};

// Re-exported so callers can build a cancellable `CallContext`.
pub use tokio_util::sync::CancellationToken;
