//! Error payload returned by the Miro API.

use std::fmt;

use serde::Serialize;

use crate::decode::{set_entity, Decode, Field};
use crate::models::Context;

/// Body of a non-success response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApiErrorBody {
    pub status: i64,
    pub code: String,
    pub message: String,
    #[serde(rename = "type")]
    pub error_type: String,
    pub context: Option<Context>,
}

impl Decode for ApiErrorBody {
    const ENTITY: &'static str = "api_error";
    const FIELDS: &'static [Field<Self>] = &[
        Field::integer("status", |e| &mut e.status),
        Field::string("code", |e| &mut e.code),
        Field::string("message", |e| &mut e.message),
        Field::string("type", |e| &mut e.error_type),
        Field::entity("context", |e, o| set_entity(&mut e.context, o)),
    ];
}

impl fmt::Display for ApiErrorBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
