use std::sync::Arc;

use tokio::sync::Mutex;

use super::data::Data;

/// Mock implementation of the Config actor.
///
/// Stores configuration data in memory, so tests never read a config file.
/// Loading is a no-op.
#[derive(Debug, Clone)]
pub struct Mock {
    data: Arc<Mutex<Data>>,
}

impl Mock {
    pub fn new(data: Data) -> Self {
        Self {
            data: Arc::new(Mutex::new(data)),
        }
    }

    /// Runs `f` with exclusive access to the stored data.
    pub async fn with<T>(&self, f: impl FnOnce(&mut Data) -> T) -> T {
        let mut data = self.data.lock().await;
        f(&mut data)
    }
}
