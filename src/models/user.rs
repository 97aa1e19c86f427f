//! User model and service.

use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde::Serialize;

use crate::client::MiroClient;
use crate::context::CallContext;
use crate::decode::{set_entity, Decode, Field};
use crate::error::Result;
use crate::models::MiniPicture;

const USERS_PATH: &str = "users";

/// A Miro user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub company: String,
    pub role: String,
    pub industry: String,
    pub email: String,
    /// Account state (e.g., "registered", "not_registered").
    pub state: String,
    pub created_at: Option<DateTime<Utc>>,
    pub picture: Option<MiniPicture>,
}

impl Decode for User {
    const ENTITY: &'static str = "user";
    const FIELDS: &'static [Field<Self>] = &[
        Field::string("id", |u| &mut u.id),
        Field::string("name", |u| &mut u.name),
        Field::string("company", |u| &mut u.company),
        Field::string("role", |u| &mut u.role),
        Field::string("industry", |u| &mut u.industry),
        Field::string("email", |u| &mut u.email),
        Field::string("state", |u| &mut u.state),
        Field::timestamp("createdat", |u| &mut u.created_at),
        Field::entity("picture", |u, o| set_entity(&mut u.picture, o)),
    ];
}

/// The short user reference embedded in other entities.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MiniUser {
    pub id: String,
    pub name: String,
}

impl Decode for MiniUser {
    const ENTITY: &'static str = "mini_user";
    const FIELDS: &'static [Field<Self>] = &[
        Field::string("id", |u| &mut u.id),
        Field::string("name", |u| &mut u.name),
    ];
}

/// User operations. Obtained with [`MiroClient::users`].
#[derive(Debug, Clone, Copy)]
pub struct UsersService<'a> {
    client: &'a MiroClient,
}

impl MiroClient {
    pub fn users(&self) -> UsersService<'_> {
        UsersService { client: self }
    }
}

impl UsersService<'_> {
    /// Get a user by ID.
    #[tracing::instrument(skip(self, ctx))]
    pub async fn get(&self, ctx: &CallContext, id: &str) -> Result<User> {
        let path = format!("{USERS_PATH}/{}", urlencoding::encode(id));
        let request = self.client.get_request(&path)?;
        self.client.fetch(ctx, request, &[StatusCode::OK]).await
    }

    /// Get the user the access key belongs to.
    #[tracing::instrument(skip(self, ctx))]
    pub async fn current(&self, ctx: &CallContext) -> Result<User> {
        let request = self.client.get_request(&format!("{USERS_PATH}/me"))?;
        self.client.fetch(ctx, request, &[StatusCode::OK]).await
    }
}
