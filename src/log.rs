use std::fmt::Display;

use tokio::sync::mpsc::{Sender, error::TrySendError};
use tokio::task::JoinHandle;

use crate::ArcPath;

mod core;
mod data;
mod message;
mod mock;

pub use data::{LogLevel, LogMessage};
use message::Message;

/// The logging actor that provides a thread-safe interface for logging operations.
///
/// This enum represents either a real logging actor or a mock implementation
/// for testing purposes. It provides a unified interface for logging operations
/// regardless of the underlying implementation.
///
/// # Examples
/// ```ignore
/// let log = Log::spawn(LogLevel::Info, 7, Some(log_dir)).await?;
/// log.info("main", "Server started");
/// ```
///
/// # Thread Safety
/// This type is designed to be safely shared between threads. Cloning is cheap as it only
/// copies the channel sender or mock reference.
#[derive(Debug, Clone)]
pub enum Log {
    /// A real logging actor that writes to stderr and, optionally, log files
    Actual(Sender<Message>),
    /// A mock implementation for testing that keeps messages in memory
    Mock(mock::Mock),
}

impl Log {
    /// Builds the logger core and spawns it as an actor.
    ///
    /// # Arguments
    /// * `level` - Minimum level of messages printed to stderr
    /// * `max_age` - Age in days after which old log files are collected (0 keeps them forever)
    /// * `log_dir` - Directory for log files. `None` logs to stderr only
    ///
    /// # Errors
    /// Fails if the log directory or its files cannot be created.
    pub async fn spawn(
        level: LogLevel,
        max_age: usize,
        log_dir: Option<ArcPath>,
    ) -> anyhow::Result<Self> {
        let (log, _) = core::Core::build(level, max_age, log_dir).await?.spawn();
        Ok(log)
    }

    /// Creates a new mock logger that records every message.
    pub fn mock() -> Self {
        Self::Mock(mock::Mock::new())
    }

    /// Sends a [`LogMessage`] to the logger without blocking the caller.
    ///
    /// Messages sent from the same task keep their order. Messages sent after
    /// a flush are dropped.
    fn log(&self, scope: &'static str, message: String, level: LogLevel) {
        let message = LogMessage::new(level, scope, message);
        match self {
            Log::Mock(mock) => mock.push(message),
            Log::Actual(sender) => {
                if let Err(TrySendError::Full(msg)) = sender.try_send(Message::Log(message)) {
                    let sender = sender.clone();
                    tokio::spawn(async move {
                        let _ = sender.send(msg).await;
                    });
                }
            }
        }
    }

    /// Log a message with the `INFO` level
    pub fn info<M: Display>(&self, scope: &'static str, message: M) {
        self.log(scope, message.to_string(), LogLevel::Info);
    }

    /// Log a message with the `ERROR` level
    pub fn error<M: Display>(&self, scope: &'static str, message: M) {
        self.log(scope, message.to_string(), LogLevel::Error);
    }

    /// Log a warning message if the result is an error
    /// and return the result as is
    pub fn warn_on_error<T, E: Display>(
        &self,
        scope: &'static str,
        result: Result<T, E>,
    ) -> Result<T, E> {
        if let Err(err) = &result {
            self.log(scope, err.to_string(), LogLevel::Warning);
        }
        result
    }

    /// Flushes and closes the log files. After the returned handle completes
    /// every message sent before the flush has been written, and further
    /// messages are discarded.
    pub fn flush(self) -> JoinHandle<()> {
        let Self::Actual(sender) = self else {
            return tokio::spawn(async {});
        };

        tokio::spawn(async move {
            let (tx, rx) = tokio::sync::oneshot::channel();
            if sender.send(Message::Flush { tx }).await.is_ok() {
                let _ = rx.await;
            }
        })
    }

    /// Deletes log files older than the `max_age` given to [`Log::spawn`].
    pub async fn collect_garbage(&self) {
        let Self::Actual(sender) = self else {
            return;
        };

        let (tx, rx) = tokio::sync::oneshot::channel();
        if sender.send(Message::CollectGarbage { tx }).await.is_ok() {
            let _ = rx.await;
        }
    }

    /// Returns every message recorded so far, or `None` for a real logger.
    pub fn messages(&self) -> Option<Vec<LogMessage>> {
        match self {
            Log::Mock(mock) => Some(mock.messages()),
            Log::Actual(_) => None,
        }
    }
}
