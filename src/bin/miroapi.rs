//! Miro API CLI binary.
//!
//! A command-line interface for interacting with the Miro API.

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use miroapi::cli::{Cli, Command, DeletableEntity, Entity};
use miroapi::output::{page_footer, PrettyPrint};
use miroapi::{
    AuditLogEntry, CallContext, CancellationToken, CreateBoardRequest, MiroClient, MiroError, Page,
    SharingPolicy,
};
use serde::Serialize;
use tabled::{Table, Tabled};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let client = match build_client(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Hint: Set MIRO_ACCESS_KEY environment variable");
            return ExitCode::FAILURE;
        }
    };

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.cancel();
        }
    });

    let mut ctx = CallContext::background().with_cancellation(cancel);
    if let Some(secs) = cli.timeout {
        ctx = ctx.with_timeout(Duration::from_secs(secs));
    }

    let result = run(&client, &ctx, cli).await;

    let rate_limit = client.rate_limit();
    tracing::debug!(
        limit = rate_limit.limit,
        remaining = rate_limit.remaining,
        reset = ?rate_limit.reset,
        "rate limit after command"
    );

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn build_client(cli: &Cli) -> miroapi::Result<MiroClient> {
    let token = cli.access_key.as_deref().ok_or_else(|| {
        MiroError::ConfigMissing("MIRO_ACCESS_KEY environment variable not set".to_string())
    })?;
    Ok(MiroClient::new(token, &cli.api_url)?.with_user_agent(cli.user_agent.as_str()))
}

async fn run(client: &MiroClient, ctx: &CallContext, cli: Cli) -> miroapi::Result<()> {
    let json = cli.json;
    match cli.command {
        Command::Get { entity, id } => handle_get(client, ctx, entity, &id, json).await,
        Command::Me => {
            let user = client.users().current(ctx).await?;
            output_single(&user, json)
        }
        Command::CreateBoard {
            name,
            description,
            access,
        } => {
            let request = CreateBoardRequest {
                name,
                description,
                sharing_policy: access.map(|access| SharingPolicy {
                    access,
                    ..SharingPolicy::default()
                }),
            };
            let board = client.boards().create(ctx, &request).await?;
            output_single(&board, json)
        }
        Command::Delete { entity, id } => {
            match entity {
                DeletableEntity::Board => client.boards().delete(ctx, &id).await?,
                DeletableEntity::BoardConnection => {
                    client.board_user_connections().delete(ctx, &id).await?
                }
                DeletableEntity::TeamConnection => {
                    client.team_user_connections().delete(ctx, &id).await?
                }
            }
            if !json {
                println!("Deleted {id}");
            }
            Ok(())
        }
        Command::AuditLogs => {
            let page = client.audit_logs().list(ctx).await?;
            output_page(&page, json, |e| AuditLogRow::from(e))
        }
        Command::Token => {
            let info = client.authorization().get(ctx).await?;
            output_single(&info, json)
        }
    }
}

async fn handle_get(
    client: &MiroClient,
    ctx: &CallContext,
    entity: Entity,
    id: &str,
    json: bool,
) -> miroapi::Result<()> {
    match entity {
        Entity::Board => {
            let board = client.boards().get(ctx, id).await?;
            output_single(&board, json)
        }
        Entity::User => {
            let user = client.users().get(ctx, id).await?;
            output_single(&user, json)
        }
        Entity::Team => {
            let team = client.teams().get(ctx, id).await?;
            output_single(&team, json)
        }
        Entity::BoardConnection => {
            let connection = client.board_user_connections().get(ctx, id).await?;
            output_single(&connection, json)
        }
        Entity::TeamConnection => {
            let connection = client.team_user_connections().get(ctx, id).await?;
            output_single(&connection, json)
        }
    }
}

fn output_single<T: Serialize + PrettyPrint>(item: &T, json: bool) -> miroapi::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(item)?);
    } else {
        println!("{}", item.pretty_print());
    }
    Ok(())
}

fn output_page<T, R, F>(page: &Page<T>, json: bool, to_row: F) -> miroapi::Result<()>
where
    T: Serialize,
    R: Tabled,
    F: Fn(&T) -> R,
{
    if json {
        println!("{}", serde_json::to_string_pretty(page)?);
    } else {
        let rows: Vec<R> = page.iter().map(to_row).collect();
        println!("{}", Table::new(rows));
        println!("\n{}", page_footer(page));
    }
    Ok(())
}

#[derive(Tabled)]
struct AuditLogRow {
    id: String,
    event: String,
    #[tabled(rename = "created by")]
    created_by: String,
    #[tabled(rename = "created at")]
    created_at: String,
    ip: String,
}

impl From<&AuditLogEntry> for AuditLogRow {
    fn from(e: &AuditLogEntry) -> Self {
        Self {
            id: e.id.clone(),
            event: e.event.clone(),
            created_by: e
                .created_by
                .as_ref()
                .map(|u| u.name.clone())
                .unwrap_or_default(),
            created_at: e
                .created_at
                .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_default(),
            ip: e
                .context
                .as_ref()
                .map(|c| c.ip.clone())
                .unwrap_or_default(),
        }
    }
}
