//! Access token introspection.

use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde::Serialize;

use crate::client::MiroClient;
use crate::context::CallContext;
use crate::decode::{set_entity, Decode, Field};
use crate::error::Result;
use crate::models::{MiniTeam, MiniUser};

const OAUTH_TOKEN_PATH: &str = "oauth-token";

/// What the current access key is allowed to do, and for whom.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationInfo {
    pub id: String,
    /// Granted OAuth scopes (e.g., "boards:read").
    pub scopes: Vec<String>,
    pub user: Option<MiniUser>,
    pub team: Option<MiniTeam>,
    pub created_by: Option<MiniUser>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Decode for AuthorizationInfo {
    const ENTITY: &'static str = "authorization_info";
    const FIELDS: &'static [Field<Self>] = &[
        Field::string("id", |a| &mut a.id),
        Field::strings("scopes", |a| &mut a.scopes),
        Field::entity("user", |a, o| set_entity(&mut a.user, o)),
        Field::entity("team", |a, o| set_entity(&mut a.team, o)),
        Field::entity("createdby", |a, o| set_entity(&mut a.created_by, o)),
        Field::timestamp("createdat", |a| &mut a.created_at),
    ];
}

/// Token introspection. Obtained with [`MiroClient::authorization`].
#[derive(Debug, Clone, Copy)]
pub struct AuthorizationService<'a> {
    client: &'a MiroClient,
}

impl MiroClient {
    pub fn authorization(&self) -> AuthorizationService<'_> {
        AuthorizationService { client: self }
    }
}

impl AuthorizationService<'_> {
    /// Describe the access key the client authenticates with.
    #[tracing::instrument(skip(self, ctx))]
    pub async fn get(&self, ctx: &CallContext) -> Result<AuthorizationInfo> {
        let request = self.client.get_request(OAUTH_TOKEN_PATH)?;
        self.client.fetch(ctx, request, &[StatusCode::OK]).await
    }
}
