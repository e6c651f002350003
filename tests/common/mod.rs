//! Shared test infrastructure: a real server on an ephemeral port, backed
//! by the per-test database pool that `#[sqlx::test]` provides.

use sqlx::PgPool;

use taskman::config::AppConfig;
use taskman::web::{self, state::AppState};

pub struct TestServer {
    pub base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    pub async fn start(pool: PgPool) -> Self {
        let state = AppState::new(AppConfig::default(), pool);
        let app = web::create_app(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind test listener");
        let addr = listener.local_addr().expect("listener has no address");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("test server failed");
        });

        Self {
            base_url: format!("http://{addr}"),
            handle,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub fn shutdown(&self) {
        self.handle.abort();
    }
}
