use companion_library::application::CompanionStore;
use companion_library::infrastructure::server::{router, AppState};
use reqwest::header::AUTHORIZATION;
use reqwest::RequestBuilder;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Running companion-library server on an ephemeral port, plus a client
/// that sends `session` as its bearer token when set
#[allow(dead_code)]
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: reqwest::Client,
    pub session: Option<String>,
}

#[allow(dead_code)]
impl TestServer {
    /// Start a server in the background backed by the given store
    pub async fn start(store: Arc<dyn CompanionStore>, session: Option<&str>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read test address");

        let app = router(AppState::new(store));
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Test server failed");
        });

        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("Failed to build test client");

        Self {
            addr,
            client,
            session: session.map(str::to_string),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn get(&self, path: &str) -> RequestBuilder {
        self.with_session(self.client.get(self.url(path)))
    }

    pub fn delete(&self, path: &str) -> RequestBuilder {
        self.with_session(self.client.delete(self.url(path)))
    }

    fn with_session(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.session {
            Some(token) => request.header(AUTHORIZATION, format!("Bearer {token}")),
            None => request,
        }
    }
}

/// Store rows as the REST interface returns them, extra columns included
#[allow(dead_code)]
pub fn store_rows() -> Value {
    json!([
        {
            "id": "cmp-maths-1",
            "subject": "maths",
            "name": "Countsy the Number Wizard",
            "topic": "Derivatives and integrals",
            "duration": 30,
            "author": "user_2abc",
            "voice": "female",
            "style": "casual"
        },
        {
            "id": "cmp-science-1",
            "subject": "science",
            "name": "Neura the Brainy Explorer",
            "topic": "The nervous system",
            "duration": 45,
            "author": "user_2abc",
            "voice": "male",
            "style": "formal"
        }
    ])
}

/// Known companion ids from the sample data
#[allow(dead_code)]
pub mod test_companions {
    pub const COUNTSY: &str = "cmp-maths-1";
    pub const ALGEBRINA: &str = "cmp-maths-2";
    pub const NEURA: &str = "cmp-science-1";
    pub const CODEY: &str = "cmp-coding-1";

    // For testing error cases
    pub const NONEXISTENT: &str = "cmp-does-not-exist";
}
