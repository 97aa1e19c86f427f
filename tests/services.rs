//! Users, teams, pictures, connections, audit logs and token introspection.

use miroapi::{
    CallContext, MiroClient, PictureOwner, UpdateConnectionRequest, UpdateTeamRequest,
    UpsertPictureRequest,
};
use tokio_test::assert_ok;
use wiremock::matchers::{body_json, body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> MiroClient {
    MiroClient::new("test-token", &server.uri()).unwrap()
}

fn ctx() -> CallContext {
    CallContext::background()
}

#[tokio::test]
async fn test_current_user_with_user_agent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/users/me"))
        .and(header("user-agent", "miroapi-tests/0.1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "type": "user",
            "ID": "u1",
            "Name": "Sergey",
            "EMAIL": "sergey@miro.com",
            "unknownField": {"nested": true}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let user = client(&mock_server)
        .with_user_agent("miroapi-tests/0.1")
        .users()
        .current(&ctx())
        .await
        .unwrap();

    assert_eq!(user.id, "u1");
    assert_eq!(user.name, "Sergey");
    assert_eq!(user.email, "sergey@miro.com");
}

#[tokio::test]
async fn test_get_user_by_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/users/3074457345618265000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "3074457345618265000",
            "company": "Miro"
        })))
        .mount(&mock_server)
        .await;

    let user = client(&mock_server)
        .users()
        .get(&ctx(), "3074457345618265000")
        .await
        .unwrap();

    assert_eq!(user.company, "Miro");
}

#[tokio::test]
async fn test_team_get_and_update() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/teams/t1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "t1",
            "name": "Design"
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/v1/teams/t1"))
        .and(body_json(serde_json::json!({"name": "Research"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "t1",
            "name": "Research"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    let team = client.teams().get(&ctx(), "t1").await.unwrap();
    assert_eq!(team.name, "Design");

    let update = UpdateTeamRequest {
        name: "Research".to_string(),
    };
    let team = client.teams().update(&ctx(), "t1", &update).await.unwrap();
    assert_eq!(team.name, "Research");
}

#[tokio::test]
async fn test_team_members_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/teams/t1/user-connections"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "size": 1,
            "nextLink": "https://api.miro.com/v1/teams/t1/user-connections?offset=1",
            "data": [{"id": "c1", "role": "admin", "team": {"id": "t1", "name": "Design"}}]
        })))
        .mount(&mock_server)
        .await;

    let page = client(&mock_server)
        .teams()
        .members(&ctx(), "t1")
        .await
        .unwrap();

    assert!(page.has_more());
    assert_eq!(page.len(), 1);
    assert_eq!(page.data[0].team.as_ref().unwrap().name, "Design");
}

#[tokio::test]
async fn test_team_current_user_connection() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/teams/t1/user-connections/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "c9",
            "role": "member"
        })))
        .mount(&mock_server)
        .await;

    let connection = client(&mock_server)
        .teams()
        .current_user_connection(&ctx(), "t1")
        .await
        .unwrap();

    assert_eq!(connection.id, "c9");
}

#[tokio::test]
async fn test_team_invite_posts_email_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/teams/t1/user-connections/invite"))
        .and(query_param("email", "new+user@miro.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": "c1", "role": "member", "user": {"id": "u7"}}
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let connections = client(&mock_server)
        .teams()
        .invite(&ctx(), "t1", "new+user@miro.com")
        .await
        .unwrap();

    assert_eq!(connections.len(), 1);
    assert_eq!(connections[0].user.as_ref().unwrap().id, "u7");
}

#[tokio::test]
async fn test_picture_get_upsert_delete() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/teams/t1/pictures"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "p1",
            "imageURL": "https://img/old"
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/boards/b1/pictures"))
        .and(body_string_contains("name=\"image\""))
        .and(body_string_contains("fake-png-bytes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "p2",
            "imageUrl": "https://img/new"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/v1/users/u1/pictures"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    let pictures = client.pictures();

    let picture = pictures.get(&ctx(), PictureOwner::Teams, "t1").await.unwrap();
    assert_eq!(picture.image_url, "https://img/old");

    let upload = UpsertPictureRequest::new(b"fake-png-bytes".to_vec());
    let picture = pictures
        .upsert(&ctx(), PictureOwner::Boards, "b1", upload)
        .await
        .unwrap();
    assert_eq!(picture.id, "p2");

    assert_ok!(pictures.delete(&ctx(), PictureOwner::Users, "u1").await);
}

#[tokio::test]
async fn test_board_connection_update_and_delete() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/v1/board-user-connection/c1"))
        .and(body_json(serde_json::json!({"role": "viewer"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "c1",
            "role": "viewer"
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/v1/board-user-connection/c1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    let connections = client.board_user_connections();

    let update = UpdateConnectionRequest {
        role: "viewer".to_string(),
    };
    let connection = connections.update(&ctx(), "c1", &update).await.unwrap();
    assert_eq!(connection.role, "viewer");

    assert_ok!(connections.delete(&ctx(), "c1").await);
}

#[tokio::test]
async fn test_team_connection_get_and_delete_no_content() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/team-user-connection/c2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "c2",
            "role": "admin",
            "createdAt": "2020-03-01T12:30:00+02:00"
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/v1/team-user-connection/c2"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    let connections = client.team_user_connections();

    let connection = connections.get(&ctx(), "c2").await.unwrap();
    assert_eq!(
        connection.created_at.unwrap().to_rfc3339(),
        "2020-03-01T10:30:00+00:00"
    );

    assert_ok!(connections.delete(&ctx(), "c2").await);
}

#[tokio::test]
async fn test_audit_logs_bad_entry_names_index() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/audit/logs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [
                {"id": "e1", "createdAt": "2020-01-01T00:00:00Z"},
                {"id": "e2", "createdAt": "not-a-date"}
            ]
        })))
        .mount(&mock_server)
        .await;

    let err = client(&mock_server)
        .audit_logs()
        .list(&ctx())
        .await
        .unwrap_err();

    match err {
        miroapi::MiroError::DecodeError(e) => assert_eq!(e.path(), "data[1].createdat"),
        other => panic!("Expected DecodeError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_authorization_info() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/oauth-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "type": "oauth-token",
            "scopes": ["boards:read", "identity:read"],
            "team": {"id": "t1", "name": "Design"},
            "user": {"id": "u1", "name": "Sergey"}
        })))
        .mount(&mock_server)
        .await;

    let info = client(&mock_server)
        .authorization()
        .get(&ctx())
        .await
        .unwrap();

    assert_eq!(info.scopes, ["boards:read", "identity:read"]);
    assert_eq!(info.user.unwrap().name, "Sergey");
}
