//! Miro API model types.

mod api_error;
mod audit_log;
mod authorization;
mod board;
mod connection;
mod picture;
mod team;
mod user;

pub use api_error::*;
pub use audit_log::*;
pub use authorization::*;
pub use board::*;
pub use connection::*;
pub use picture::*;
pub use team::*;
pub use user::*;
