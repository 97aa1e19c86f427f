//! What service spans record about a call.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use miroapi::{CallContext, MiroClient};
use tracing::Level;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn test_invite_span_omits_invitee_email() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/teams/t1/user-connections/invite"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": "c1", "role": "member"}
        ])))
        .mount(&mock_server)
        .await;

    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let client = MiroClient::new("test-token", &mock_server.uri()).unwrap();
    client
        .teams()
        .invite(&CallContext::background(), "t1", "new+user@miro.com")
        .await
        .unwrap();

    let output = logs.contents();
    assert!(output.contains("invite"), "no invite span in: {output}");
    assert!(output.contains("received response"));
    assert!(!output.contains("new+user@miro.com"));
    assert!(!output.contains("new%2Buser"));
    assert!(!output.contains("test-token"));
}
