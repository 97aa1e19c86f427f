//! Board and team user connections.
//!
//! A connection binds a user to a board or a team with a role.

use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde::Serialize;

use crate::client::MiroClient;
use crate::context::CallContext;
use crate::decode::{set_entity, Decode, Field};
use crate::error::Result;
use crate::models::{MiniTeam, MiniUser};

const BOARD_CONNECTION_PATH: &str = "board-user-connection";
const TEAM_CONNECTION_PATH: &str = "team-user-connection";

/// Connection deletes answer with either status.
const DELETE_STATUSES: &[StatusCode] = &[StatusCode::OK, StatusCode::NO_CONTENT];

/// A user's membership of a board.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardUserConnection {
    pub id: String,
    /// Role on the board (e.g., "viewer", "editor", "owner").
    pub role: String,
    pub user: Option<MiniUser>,
    pub created_at: Option<DateTime<Utc>>,
    pub modified_at: Option<DateTime<Utc>>,
    pub created_by: Option<MiniUser>,
    pub modified_by: Option<MiniUser>,
}

impl Decode for BoardUserConnection {
    const ENTITY: &'static str = "board_user_connection";
    const FIELDS: &'static [Field<Self>] = &[
        Field::string("id", |c| &mut c.id),
        Field::string("role", |c| &mut c.role),
        Field::entity("user", |c, o| set_entity(&mut c.user, o)),
        Field::timestamp("createdat", |c| &mut c.created_at),
        Field::timestamp("modifiedat", |c| &mut c.modified_at),
        Field::entity("createdby", |c, o| set_entity(&mut c.created_by, o)),
        Field::entity("modifiedby", |c, o| set_entity(&mut c.modified_by, o)),
    ];
}

/// A user's membership of a team.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamUserConnection {
    pub id: String,
    pub name: String,
    /// Role in the team (e.g., "member", "admin").
    pub role: String,
    pub user: Option<MiniUser>,
    pub team: Option<MiniTeam>,
    pub created_at: Option<DateTime<Utc>>,
    pub modified_at: Option<DateTime<Utc>>,
    pub created_by: Option<MiniUser>,
    pub modified_by: Option<MiniUser>,
}

impl Decode for TeamUserConnection {
    const ENTITY: &'static str = "team_user_connection";
    const FIELDS: &'static [Field<Self>] = &[
        Field::string("id", |c| &mut c.id),
        Field::string("name", |c| &mut c.name),
        Field::string("role", |c| &mut c.role),
        Field::entity("user", |c, o| set_entity(&mut c.user, o)),
        Field::entity("team", |c, o| set_entity(&mut c.team, o)),
        Field::timestamp("createdat", |c| &mut c.created_at),
        Field::timestamp("modifiedat", |c| &mut c.modified_at),
        Field::entity("createdby", |c, o| set_entity(&mut c.created_by, o)),
        Field::entity("modifiedby", |c, o| set_entity(&mut c.modified_by, o)),
    ];
}

/// Payload for changing the role of a connection.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateConnectionRequest {
    pub role: String,
}

/// Board connection operations. Obtained with
/// [`MiroClient::board_user_connections`].
#[derive(Debug, Clone, Copy)]
pub struct BoardUserConnectionsService<'a> {
    client: &'a MiroClient,
}

/// Team connection operations. Obtained with
/// [`MiroClient::team_user_connections`].
#[derive(Debug, Clone, Copy)]
pub struct TeamUserConnectionsService<'a> {
    client: &'a MiroClient,
}

impl MiroClient {
    pub fn board_user_connections(&self) -> BoardUserConnectionsService<'_> {
        BoardUserConnectionsService { client: self }
    }

    pub fn team_user_connections(&self) -> TeamUserConnectionsService<'_> {
        TeamUserConnectionsService { client: self }
    }
}

impl BoardUserConnectionsService<'_> {
    #[tracing::instrument(skip(self, ctx))]
    pub async fn get(&self, ctx: &CallContext, id: &str) -> Result<BoardUserConnection> {
        let request = self
            .client
            .get_request(&connection_path(BOARD_CONNECTION_PATH, id))?;
        self.client.fetch(ctx, request, &[StatusCode::OK]).await
    }

    /// Change the role of a board connection.
    #[tracing::instrument(skip(self, ctx))]
    pub async fn update(
        &self,
        ctx: &CallContext,
        id: &str,
        update: &UpdateConnectionRequest,
    ) -> Result<BoardUserConnection> {
        let request = self
            .client
            .patch_request(&connection_path(BOARD_CONNECTION_PATH, id), update)?;
        self.client.fetch(ctx, request, &[StatusCode::OK]).await
    }

    /// Remove a user from a board.
    #[tracing::instrument(skip(self, ctx))]
    pub async fn delete(&self, ctx: &CallContext, id: &str) -> Result<()> {
        let request = self
            .client
            .delete_request(&connection_path(BOARD_CONNECTION_PATH, id))?;
        self.client.fetch_empty(ctx, request, DELETE_STATUSES).await
    }
}

impl TeamUserConnectionsService<'_> {
    #[tracing::instrument(skip(self, ctx))]
    pub async fn get(&self, ctx: &CallContext, id: &str) -> Result<TeamUserConnection> {
        let request = self
            .client
            .get_request(&connection_path(TEAM_CONNECTION_PATH, id))?;
        self.client.fetch(ctx, request, &[StatusCode::OK]).await
    }

    /// Change the role of a team connection.
    #[tracing::instrument(skip(self, ctx))]
    pub async fn update(
        &self,
        ctx: &CallContext,
        id: &str,
        update: &UpdateConnectionRequest,
    ) -> Result<TeamUserConnection> {
        let request = self
            .client
            .patch_request(&connection_path(TEAM_CONNECTION_PATH, id), update)?;
        self.client.fetch(ctx, request, &[StatusCode::OK]).await
    }

    /// Remove a user from a team.
    #[tracing::instrument(skip(self, ctx))]
    pub async fn delete(&self, ctx: &CallContext, id: &str) -> Result<()> {
        let request = self
            .client
            .delete_request(&connection_path(TEAM_CONNECTION_PATH, id))?;
        self.client.fetch_empty(ctx, request, DELETE_STATUSES).await
    }
}

fn connection_path(prefix: &str, id: &str) -> String {
    format!("{prefix}/{}", urlencoding::encode(id))
}
