//! Print the name of a board.
//!
//! Run with:
//! ```
//! MIRO_ACCESS_KEY=your-key cargo run --example boards -- <board-id>
//! ```

use miroapi::{CallContext, MiroClient, MiroError};

#[tokio::main]
async fn main() -> miroapi::Result<()> {
    tracing_subscriber::fmt::init();

    let board_id = std::env::args()
        .nth(1)
        .ok_or_else(|| MiroError::ConfigMissing("usage: boards <board-id>".to_string()))?;

    let client = MiroClient::from_env()?;
    let board = client
        .boards()
        .get(&CallContext::background(), &board_id)
        .await?;

    println!("{}", board.name);
    Ok(())
}
