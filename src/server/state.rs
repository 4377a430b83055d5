//! Shared router state.

use crate::Gateway;

/// State handed to every handler. Cloning shares the gateway.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Gateway,
}

impl AppState {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    /// Run a command on a blocking worker thread.
    ///
    /// Model inference is CPU-bound; running it inline would stall the
    /// async runtime.
    pub async fn run<T, F>(&self, command: F) -> crate::Result<T>
    where
        F: FnOnce(&Gateway) -> crate::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let gateway = self.gateway.clone();
        tokio::task::spawn_blocking(move || command(&gateway))
            .await
            .map_err(|e| crate::MimirError::Internal(format!("command worker failed: {e}")))?
    }
}
