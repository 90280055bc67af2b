//! In-process HTTP stub used by provider and aggregation tests.

use axum::Router;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// A router served on an ephemeral local port for the lifetime of the value.
pub(crate) struct StubServer {
    pub base_url: String,
    handle: JoinHandle<()>,
}

impl StubServer {
    pub(crate) async fn start(router: Router) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        Self {
            base_url: format!("http://{addr}"),
            handle,
        }
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
