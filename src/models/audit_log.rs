//! Audit log model and service.

use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde::Serialize;

use crate::client::MiroClient;
use crate::context::CallContext;
use crate::decode::{set_entity, Decode, Field};
use crate::error::Result;
use crate::models::{MiniTeam, MiniUser};
use crate::pagination::Page;

const AUDIT_LOGS_PATH: &str = "audit/logs";

/// One event recorded in the organization audit log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogEntry {
    pub id: String,
    /// Event name (e.g., "sign_in_succeeded").
    pub event: String,
    pub details: Option<Detail>,
    pub created_at: Option<DateTime<Utc>>,
    pub created_by: Option<MiniUser>,
    pub context: Option<Context>,
}

impl Decode for AuditLogEntry {
    const ENTITY: &'static str = "audit_log_entry";
    const FIELDS: &'static [Field<Self>] = &[
        Field::string("id", |e| &mut e.id),
        Field::string("event", |e| &mut e.event),
        Field::entity("details", |e, o| set_entity(&mut e.details, o)),
        Field::timestamp("createdat", |e| &mut e.created_at),
        Field::entity("createdby", |e, o| set_entity(&mut e.created_by, o)),
        Field::entity("context", |e, o| set_entity(&mut e.context, o)),
    ];
}

/// Where an audited event (or an API error) happened.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Context {
    pub organization: Option<Organization>,
    pub team: Option<MiniTeam>,
    pub ip: String,
}

impl Decode for Context {
    const ENTITY: &'static str = "context";
    const FIELDS: &'static [Field<Self>] = &[
        Field::entity("organization", |c, o| set_entity(&mut c.organization, o)),
        Field::entity("team", |c, o| set_entity(&mut c.team, o)),
        Field::string("ip", |c| &mut c.ip),
    ];
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Organization {
    pub id: String,
    pub name: String,
}

impl Decode for Organization {
    const ENTITY: &'static str = "organization";
    const FIELDS: &'static [Field<Self>] = &[
        Field::string("id", |o| &mut o.id),
        Field::string("name", |o| &mut o.name),
    ];
}

/// Event-specific details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Detail {
    pub role: String,
}

impl Decode for Detail {
    const ENTITY: &'static str = "detail";
    const FIELDS: &'static [Field<Self>] = &[Field::string("role", |d| &mut d.role)];
}

/// Audit log operations. Obtained with [`MiroClient::audit_logs`].
#[derive(Debug, Clone, Copy)]
pub struct AuditLogsService<'a> {
    client: &'a MiroClient,
}

impl MiroClient {
    pub fn audit_logs(&self) -> AuditLogsService<'_> {
        AuditLogsService { client: self }
    }
}

impl AuditLogsService<'_> {
    /// List audit log entries of the organization.
    #[tracing::instrument(skip(self, ctx))]
    pub async fn list(&self, ctx: &CallContext) -> Result<Page<AuditLogEntry>> {
        let request = self.client.get_request(AUDIT_LOGS_PATH)?;
        self.client.fetch(ctx, request, &[StatusCode::OK]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audit_entry_decodes_context() {
        let entry = AuditLogEntry::from_slice(
            br#"{
                "id": "e1",
                "event": "sign_in_succeeded",
                "details": {"role": "admin"},
                "context": {
                    "ip": "127.0.0.1",
                    "team": {"id": "t1", "name": "test-team"},
                    "organization": {"id": "o1", "name": "test-org"}
                },
                "createdBy": {"id": "u1", "name": "Sergey"},
                "createdAt": "1995-06-15T10:00:00Z"
            }"#,
        )
        .unwrap();

        let context = entry.context.unwrap();
        assert_eq!(context.ip, "127.0.0.1");
        assert_eq!(context.organization.unwrap().name, "test-org");
        assert_eq!(context.team.unwrap().id, "t1");
        assert_eq!(entry.details.unwrap().role, "admin");
    }

    #[test]
    fn test_audit_entry_wrong_nested_type() {
        let err = AuditLogEntry::from_slice(br#"{"context": {"team": "t1"}}"#).unwrap_err();
        assert_eq!(err.path(), "context.team");
    }
}
