//! Team model and service.

use chrono::{DateTime, Utc};
use reqwest::{Method, StatusCode};
use serde::Serialize;

use crate::client::MiroClient;
use crate::context::CallContext;
use crate::decode::{set_entity, Decode, Field};
use crate::error::Result;
use crate::models::{MiniPicture, MiniUser, TeamUserConnection};
use crate::pagination::Page;

const TEAMS_PATH: &str = "teams";
const USER_CONNECTIONS_PATH: &str = "user-connections";
const INVITE_PATH: &str = "invite";

/// A Miro team.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: String,
    pub name: String,
    pub created_at: Option<DateTime<Utc>>,
    pub modified_at: Option<DateTime<Utc>>,
    pub created_by: Option<MiniUser>,
    pub modified_by: Option<MiniUser>,
    pub picture: Option<MiniPicture>,
}

impl Decode for Team {
    const ENTITY: &'static str = "team";
    const FIELDS: &'static [Field<Self>] = &[
        Field::string("id", |t| &mut t.id),
        Field::string("name", |t| &mut t.name),
        Field::timestamp("createdat", |t| &mut t.created_at),
        Field::timestamp("modifiedat", |t| &mut t.modified_at),
        Field::entity("createdby", |t, o| set_entity(&mut t.created_by, o)),
        Field::entity("modifiedby", |t, o| set_entity(&mut t.modified_by, o)),
        Field::entity("picture", |t, o| set_entity(&mut t.picture, o)),
    ];
}

/// The short team reference embedded in other entities.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MiniTeam {
    pub id: String,
    pub name: String,
}

impl Decode for MiniTeam {
    const ENTITY: &'static str = "mini_team";
    const FIELDS: &'static [Field<Self>] = &[
        Field::string("id", |t| &mut t.id),
        Field::string("name", |t| &mut t.name),
    ];
}

/// Payload for renaming a team.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateTeamRequest {
    pub name: String,
}

/// Team operations. Obtained with [`MiroClient::teams`].
#[derive(Debug, Clone, Copy)]
pub struct TeamsService<'a> {
    client: &'a MiroClient,
}

impl MiroClient {
    pub fn teams(&self) -> TeamsService<'_> {
        TeamsService { client: self }
    }
}

impl TeamsService<'_> {
    /// Get a team by ID.
    #[tracing::instrument(skip(self, ctx))]
    pub async fn get(&self, ctx: &CallContext, id: &str) -> Result<Team> {
        let request = self.client.get_request(&team_path(id))?;
        self.client.fetch(ctx, request, &[StatusCode::OK]).await
    }

    /// Update a team and return the updated version.
    #[tracing::instrument(skip(self, ctx))]
    pub async fn update(
        &self,
        ctx: &CallContext,
        id: &str,
        update: &UpdateTeamRequest,
    ) -> Result<Team> {
        let request = self.client.patch_request(&team_path(id), update)?;
        self.client.fetch(ctx, request, &[StatusCode::OK]).await
    }

    /// List the user connections (members) of a team.
    #[tracing::instrument(skip(self, ctx))]
    pub async fn members(
        &self,
        ctx: &CallContext,
        id: &str,
    ) -> Result<Page<TeamUserConnection>> {
        let path = format!("{}/{USER_CONNECTIONS_PATH}", team_path(id));
        let request = self.client.get_request(&path)?;
        self.client.fetch(ctx, request, &[StatusCode::OK]).await
    }

    /// Get the connection between the current user and a team.
    #[tracing::instrument(skip(self, ctx))]
    pub async fn current_user_connection(
        &self,
        ctx: &CallContext,
        id: &str,
    ) -> Result<TeamUserConnection> {
        let path = format!("{}/{USER_CONNECTIONS_PATH}/me", team_path(id));
        let request = self.client.get_request(&path)?;
        self.client.fetch(ctx, request, &[StatusCode::OK]).await
    }

    /// Invite a user to a team by email.
    #[tracing::instrument(skip(self, ctx, email))]
    pub async fn invite(
        &self,
        ctx: &CallContext,
        id: &str,
        email: &str,
    ) -> Result<Vec<TeamUserConnection>> {
        let path = format!(
            "{}/{USER_CONNECTIONS_PATH}/{INVITE_PATH}?email={}",
            team_path(id),
            urlencoding::encode(email)
        );
        let request = self.client.build_request::<()>(Method::POST, &path, None)?;
        self.client.fetch_list(ctx, request, &[StatusCode::OK]).await
    }
}

fn team_path(id: &str) -> String {
    format!("{TEAMS_PATH}/{}", urlencoding::encode(id))
}
