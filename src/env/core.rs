use std::env::VarError;

use tokio::sync::{mpsc, oneshot};

use crate::ArcStr;

use super::message::Message;

/// The core of the Env actor.
///
/// Every read of the process environment goes through this single task.
#[derive(Debug, Default)]
pub struct Core {}

impl Core {
    pub fn new() -> Self {
        Default::default()
    }

    /// Transforms an instance of [`Core`] into an actor ready to receive messages.
    pub fn spawn(self) -> (super::Env, tokio::task::JoinHandle<()>) {
        let (tx, mut rx) = mpsc::channel(crate::BUFFER_SIZE);
        let handle = tokio::spawn(async move {
            while let Some(msg) = rx.recv().await {
                match msg {
                    Message::Get { tx, key } => self.get_env(tx, &key),
                }
            }
        });

        (super::Env::Actual(tx), handle)
    }

    /// Reads a variable and replies with `None` when it is not set.
    pub fn get_env(&self, tx: oneshot::Sender<Result<Option<ArcStr>, VarError>>, key: &str) {
        let value = match std::env::var(key) {
            Ok(value) => Ok(Some(ArcStr::from(value))),
            Err(VarError::NotPresent) => Ok(None),
            Err(err) => Err(err),
        };
        let _ = tx.send(value);
    }
}
