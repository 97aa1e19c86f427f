//! Create a board, read it back and delete it again.
//!
//! All three calls share one 3 second deadline.
//!
//! Run with:
//! ```
//! MIRO_ACCESS_KEY=your-key cargo run --example create_board -- <name> <description>
//! ```

use std::time::Duration;

use miroapi::{CallContext, CreateBoardRequest, MiroClient, MiroError};

#[tokio::main]
async fn main() -> miroapi::Result<()> {
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let (Some(name), Some(description)) = (args.next(), args.next()) else {
        return Err(MiroError::ConfigMissing(
            "usage: create_board <name> <description>".to_string(),
        ));
    };

    let client = MiroClient::from_env()?;
    let ctx = CallContext::background().with_timeout(Duration::from_secs(3));

    let request = CreateBoardRequest {
        name,
        description,
        sharing_policy: None,
    };

    let created = client.boards().create(&ctx, &request).await?;
    let board = client.boards().get(&ctx, &created.id).await?;
    println!("{} board created", board.name);

    client.boards().delete(&ctx, &board.id).await?;
    println!("{} board deleted", board.name);

    println!(
        "{} of {} calls left",
        client.rate_limit().remaining,
        client.rate_limit().limit
    );
    Ok(())
}
