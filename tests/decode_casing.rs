//! Key casing never changes what an entity decodes to.

use std::fmt::Debug;

use miroapi::{
    ApiErrorBody, AuditLogEntry, AuthorizationInfo, Board, BoardUserConnection, Decode, Page,
    Team, TeamUserConnection,
};
use serde_json::{json, Map, Value};

/// Upper-case every object key at every depth, including inside arrays.
fn upper_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (key.to_uppercase(), upper_keys(value)))
                .collect::<Map<String, Value>>(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(upper_keys).collect()),
        other => other,
    }
}

fn assert_same_under_upper_case<T: Decode + PartialEq + Debug>(document: Value) {
    let canonical = T::from_value(&document).unwrap();
    let shouted = T::from_value(&upper_keys(document)).unwrap();
    assert_eq!(canonical, shouted, "{} differs by key casing", T::ENTITY);
    assert_ne!(canonical, T::default(), "{} decoded nothing", T::ENTITY);
}

#[test]
fn test_upper_case_keys_decode_identically() {
    assert_same_under_upper_case::<Board>(json!({
        "id": "o9J_kzlUDmo=",
        "name": "Retro",
        "description": "Sprint 42",
        "viewLink": "https://miro.com/app/board/o9J_kzlUDmo=",
        "createdAt": "2020-03-30T12:00:00Z",
        "owner": {"id": "u1", "name": "Sergey"},
        "picture": null,
        "sharingPolicy": {"access": "private", "teamAccess": "edit"},
        "currentUserConnection": {
            "id": "c1",
            "role": "owner",
            "user": {"id": "u1", "name": "Sergey"},
            "modifiedAt": "2020-03-31T08:15:00Z"
        }
    }));

    assert_same_under_upper_case::<Team>(json!({
        "id": "t1",
        "name": "test-team",
        "createdBy": {"id": "u1", "name": "Sergey"},
        "createdAt": "1995-06-15T10:00:00Z",
        "picture": {"id": "p1", "imageUrl": "https://x/p1.png"}
    }));

    assert_same_under_upper_case::<BoardUserConnection>(json!({
        "id": "c1",
        "role": "editor",
        "user": {"id": "u2", "name": "Anna"},
        "createdAt": "2021-01-01T00:00:00Z",
        "modifiedBy": null
    }));

    assert_same_under_upper_case::<TeamUserConnection>(json!({
        "id": "c2",
        "role": "member",
        "user": {"id": "u2", "name": "Anna"},
        "team": {"id": "t1", "name": "test-team"},
        "modifiedAt": "2021-01-01T00:00:00Z"
    }));

    assert_same_under_upper_case::<AuthorizationInfo>(json!({
        "id": "tok1",
        "scopes": ["boards:read", "team:read"],
        "user": {"id": "u1", "name": "Sergey"},
        "team": {"id": "t1", "name": "test-team"},
        "createdAt": "2022-02-02T02:02:02Z"
    }));

    assert_same_under_upper_case::<Page<AuditLogEntry>>(json!({
        "limit": 2,
        "offset": 0,
        "size": 2,
        "nextLink": "https://api.miro.com/v1/audit/logs?offset=2",
        "data": [
            {
                "id": "e1",
                "event": "board_created",
                "createdAt": "2022-02-02T02:02:02Z",
                "createdBy": {"id": "u1", "name": "Sergey"},
                "details": {"role": "owner"},
                "context": {
                    "ip": "10.0.0.1",
                    "organization": {"id": "o1", "name": "Acme"},
                    "team": {"id": "t1", "name": "test-team"}
                }
            },
            {"id": "e2", "event": "board_deleted", "context": null}
        ]
    }));

    assert_same_under_upper_case::<ApiErrorBody>(json!({
        "status": 404,
        "code": "notFound",
        "message": "Board not found",
        "type": "error",
        "context": {"ip": "10.0.0.1"}
    }));
}
