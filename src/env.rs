use std::collections::HashMap;

use anyhow::Context;
use tokio::sync::mpsc::Sender;

use crate::ArcStr;

mod core;
mod message;
mod mock;
#[cfg(test)]
mod tests;

use message::Message;

/// The env actor reads environment variables.
///
/// This enum represents either a real environment variable actor or a mock implementation
/// for testing purposes. Configuration overrides (`PORT`, `YTRSS_LOG_LEVEL`, `HOME`) are
/// read through it so tests never touch the process environment.
///
/// # Examples
/// ```ignore
/// let env = Env::spawn();
/// let port = env.env("PORT").await?;
/// ```
#[derive(Debug, Clone)]
pub enum Env {
    /// A real environment variable actor that interacts with the system
    Actual(Sender<Message>),
    /// A mock implementation backed by an in-memory map
    Mock(mock::Mock),
}

impl Env {
    /// Spawns a new Env actor.
    pub fn spawn() -> Self {
        let (env, _) = core::Core::new().spawn();
        env
    }

    /// Creates a mock that sees only `variables`.
    pub fn mock(variables: HashMap<ArcStr, ArcStr>) -> Self {
        Self::Mock(mock::Mock::new(variables))
    }

    /// Gets an environment variable.
    ///
    /// Returns `Ok(None)` when the variable is not set.
    ///
    /// # Errors
    /// Fails when the value is not valid unicode or the actor is gone.
    pub async fn env<K: Into<ArcStr>>(&self, key: K) -> anyhow::Result<Option<ArcStr>> {
        let key = key.into();
        match self {
            Self::Actual(sender) => {
                let (tx, rx) = tokio::sync::oneshot::channel();
                sender
                    .send(Message::Get {
                        tx,
                        key: key.clone(),
                    })
                    .await
                    .context("Getting environment variable with Env")?;
                rx.await
                    .context("Awaiting response for environment variable get with Env")?
                    .with_context(|| format!("Environment variable {key} is not valid unicode"))
            }
            Self::Mock(mock) => Ok(mock.env(&key)),
        }
    }
}
