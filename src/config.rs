use anyhow::Context;
use tokio::sync::{mpsc::Sender, oneshot};

use crate::{ArcPath, ArcStr, env::Env, log::LogLevel};

mod core;
mod data;
mod message;
mod mock;
#[cfg(test)]
mod tests;

pub use self::core::{LOG_LEVEL_VAR, PORT_VAR};
pub use data::{Data, PathOpt, StrOpt, USizeOpt};
use message::Message;

/// The configuration actor that provides a thread-safe interface for configuration operations.
///
/// This enum represents either a real configuration actor or a mock implementation
/// for testing purposes.
///
/// # Examples
/// ```ignore
/// let config = Config::spawn(env, config_path);
/// config.load().await?;
/// let port = config.port().await?;
/// ```
#[derive(Debug, Clone)]
pub enum Config {
    /// A real configuration actor that reads a file and the environment
    Actual(Sender<Message>),
    /// A mock implementation for testing that stores data in memory
    Mock(mock::Mock),
}

impl Config {
    /// Creates a new configuration instance and spawns its actor.
    ///
    /// # Arguments
    /// * `env` - The environment actor used for overrides
    /// * `path` - The path to the TOML configuration file
    pub fn spawn(env: Env, path: ArcPath) -> Self {
        let (config, _) = core::Core::new(env, path).spawn();
        config
    }

    /// Creates a new mock configuration instance holding `data`.
    pub fn mock(data: Data) -> Self {
        Self::Mock(mock::Mock::new(data))
    }

    /// Sends a request and waits for the actor to answer it.
    async fn request<T>(
        sender: &Sender<Message>,
        message: impl FnOnce(oneshot::Sender<T>) -> Message,
    ) -> anyhow::Result<T> {
        let (tx, rx) = oneshot::channel();
        sender
            .send(message(tx))
            .await
            .context("Sending message to Config actor")?;
        rx.await.context("Awaiting response from Config actor")
    }

    /// Sends a message that expects no answer.
    async fn notify(sender: &Sender<Message>, message: Message) -> anyhow::Result<()> {
        sender
            .send(message)
            .await
            .context("Sending message to Config actor")
    }

    /// Loads the configuration file and applies environment overrides.
    ///
    /// For the mock implementation this is a no-op.
    ///
    /// # Errors
    /// Fails if the file exists but is not valid TOML, or if an environment
    /// override cannot be parsed.
    pub async fn load(&self) -> anyhow::Result<()> {
        match self {
            Self::Actual(sender) => Self::request(sender, |tx| Message::Load { tx }).await?,
            Self::Mock(_) => Ok(()),
        }
    }

    pub async fn port(&self) -> anyhow::Result<u16> {
        match self {
            Self::Actual(sender) => Self::request(sender, |tx| Message::GetPort { tx }).await,
            Self::Mock(mock) => Ok(mock.with(|data| data.port()).await),
        }
    }

    pub async fn set_port(&self, port: u16) -> anyhow::Result<()> {
        match self {
            Self::Actual(sender) => Self::notify(sender, Message::SetPort { port }).await,
            Self::Mock(mock) => {
                mock.with(|data| data.set_port(port)).await;
                Ok(())
            }
        }
    }

    pub async fn path(&self, opt: PathOpt) -> anyhow::Result<Option<ArcPath>> {
        match self {
            Self::Actual(sender) => Self::request(sender, |tx| Message::GetPath { opt, tx }).await,
            Self::Mock(mock) => Ok(mock.with(|data| data.path(opt)).await),
        }
    }

    pub async fn log_level(&self) -> anyhow::Result<LogLevel> {
        match self {
            Self::Actual(sender) => Self::request(sender, |tx| Message::GetLogLevel { tx }).await,
            Self::Mock(mock) => Ok(mock.with(|data| data.log_level()).await),
        }
    }

    pub async fn usize(&self, opt: USizeOpt) -> anyhow::Result<usize> {
        match self {
            Self::Actual(sender) => Self::request(sender, |tx| Message::GetUSize { opt, tx }).await,
            Self::Mock(mock) => Ok(mock.with(|data| data.usize(opt)).await),
        }
    }

    pub async fn str(&self, opt: StrOpt) -> anyhow::Result<ArcStr> {
        match self {
            Self::Actual(sender) => Self::request(sender, |tx| Message::GetStr { opt, tx }).await,
            Self::Mock(mock) => Ok(mock.with(|data| data.str(opt)).await),
        }
    }
}
