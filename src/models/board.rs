//! Board model and service.

use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde::Serialize;

use crate::client::MiroClient;
use crate::context::CallContext;
use crate::decode::{set_entity, Decode, Field};
use crate::error::Result;
use crate::models::{BoardUserConnection, MiniPicture, MiniUser};
use crate::pagination::Page;

const BOARDS_PATH: &str = "boards";
const SHARE_PATH: &str = "share";

/// A Miro board.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image_url: String,
    /// Browser link to the board.
    pub view_link: String,
    pub created_at: Option<DateTime<Utc>>,
    pub modified_at: Option<DateTime<Utc>>,
    pub created_by: Option<MiniUser>,
    pub modified_by: Option<MiniUser>,
    pub owner: Option<MiniUser>,
    pub picture: Option<MiniPicture>,
    pub sharing_policy: Option<SharingPolicy>,
    /// The calling user's connection to this board.
    pub current_user_connection: Option<BoardUserConnection>,
}

impl Decode for Board {
    const ENTITY: &'static str = "board";
    const FIELDS: &'static [Field<Self>] = &[
        Field::string("id", |b| &mut b.id),
        Field::string("name", |b| &mut b.name),
        Field::string("description", |b| &mut b.description),
        Field::string("imageurl", |b| &mut b.image_url),
        Field::string("viewlink", |b| &mut b.view_link),
        Field::timestamp("createdat", |b| &mut b.created_at),
        Field::timestamp("modifiedat", |b| &mut b.modified_at),
        Field::entity("createdby", |b, o| set_entity(&mut b.created_by, o)),
        Field::entity("modifiedby", |b, o| set_entity(&mut b.modified_by, o)),
        Field::entity("owner", |b, o| set_entity(&mut b.owner, o)),
        Field::entity("picture", |b, o| set_entity(&mut b.picture, o)),
        Field::entity("sharingpolicy", |b, o| set_entity(&mut b.sharing_policy, o)),
        Field::entity("currentuserconnection", |b, o| {
            set_entity(&mut b.current_user_connection, o)
        }),
    ];
}

/// Who can open a board.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SharingPolicy {
    /// Access for anyone with the link (e.g., "private", "view", "comment").
    pub access: String,
    /// Access for members of the owning team.
    pub team_access: String,
}

impl Decode for SharingPolicy {
    const ENTITY: &'static str = "sharing_policy";
    const FIELDS: &'static [Field<Self>] = &[
        Field::string("access", |p| &mut p.access),
        Field::string("teamaccess", |p| &mut p.team_access),
    ];
}

/// Payload for creating a board.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBoardRequest {
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sharing_policy: Option<SharingPolicy>,
}

/// Payload for updating a board. Only set fields are sent.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBoardRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sharing_policy: Option<SharingPolicy>,
}

/// Payload for sharing a board with a list of people.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareBoardRequest {
    pub emails: Vec<String>,
    /// How invitees outside the team are handled (e.g., "invite_when_required").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_invitation_strategy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Board operations. Obtained with [`MiroClient::boards`].
#[derive(Debug, Clone, Copy)]
pub struct BoardsService<'a> {
    client: &'a MiroClient,
}

impl MiroClient {
    pub fn boards(&self) -> BoardsService<'_> {
        BoardsService { client: self }
    }
}

impl BoardsService<'_> {
    /// Get a board by ID.
    #[tracing::instrument(skip(self, ctx))]
    pub async fn get(&self, ctx: &CallContext, id: &str) -> Result<Board> {
        let request = self.client.get_request(&board_path(id))?;
        self.client.fetch(ctx, request, &[StatusCode::OK]).await
    }

    /// Create a board and return it as stored by Miro.
    #[tracing::instrument(skip(self, ctx, board), fields(name = %board.name))]
    pub async fn create(&self, ctx: &CallContext, board: &CreateBoardRequest) -> Result<Board> {
        let request = self.client.post_request(BOARDS_PATH, board)?;
        self.client.fetch(ctx, request, &[StatusCode::CREATED]).await
    }

    /// Update a board and return the updated version.
    #[tracing::instrument(skip(self, ctx, update))]
    pub async fn update(
        &self,
        ctx: &CallContext,
        id: &str,
        update: &UpdateBoardRequest,
    ) -> Result<Board> {
        let request = self.client.patch_request(&board_path(id), update)?;
        self.client.fetch(ctx, request, &[StatusCode::OK]).await
    }

    /// Delete a board.
    #[tracing::instrument(skip(self, ctx))]
    pub async fn delete(&self, ctx: &CallContext, id: &str) -> Result<()> {
        let request = self.client.delete_request(&board_path(id))?;
        self.client
            .fetch_empty(ctx, request, &[StatusCode::NO_CONTENT])
            .await
    }

    /// Share a board and return the resulting user connections.
    #[tracing::instrument(skip(self, ctx, share), fields(invitees = share.emails.len()))]
    pub async fn share(
        &self,
        ctx: &CallContext,
        id: &str,
        share: &ShareBoardRequest,
    ) -> Result<Page<BoardUserConnection>> {
        let path = format!("{}/{SHARE_PATH}", board_path(id));
        let request = self.client.post_request(&path, share)?;
        self.client.fetch(ctx, request, &[StatusCode::OK]).await
    }
}

fn board_path(id: &str) -> String {
    format!("{BOARDS_PATH}/{}", urlencoding::encode(id))
}
