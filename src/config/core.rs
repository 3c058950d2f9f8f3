use std::io::ErrorKind;

use anyhow::Context;

use crate::{ArcPath, env::Env, log::LogLevel};

use super::{data::Data, message::Message};

/// Environment variable overriding the listening port
pub const PORT_VAR: &str = "PORT";
/// Environment variable overriding the log level
pub const LOG_LEVEL_VAR: &str = "YTRSS_LOG_LEVEL";

/// The core configuration actor.
///
/// Holds the current [`Data`] and knows how to rebuild it from the config
/// file and the environment.
pub struct Core {
    /// The environment actor used for overrides
    env: Env,
    /// The path to the configuration file
    path: ArcPath,
    /// The current configuration data
    data: Data,
}

impl Core {
    pub fn new(env: Env, path: ArcPath) -> Self {
        Self {
            env,
            path,
            data: Data::default(),
        }
    }

    /// Spawns the configuration actor and returns a handle to it.
    pub fn spawn(mut self) -> (super::Config, tokio::task::JoinHandle<()>) {
        let (tx, mut rx) = tokio::sync::mpsc::channel(crate::BUFFER_SIZE);
        let handle = tokio::spawn(async move {
            while let Some(msg) = rx.recv().await {
                match msg {
                    Message::Load { tx } => {
                        let res = self.load().await;
                        let _ = tx.send(res);
                    }
                    Message::GetPort { tx } => {
                        let _ = tx.send(self.data.port());
                    }
                    Message::SetPort { port } => self.data.set_port(port),
                    Message::GetPath { opt, tx } => {
                        let _ = tx.send(self.data.path(opt));
                    }
                    Message::GetLogLevel { tx } => {
                        let _ = tx.send(self.data.log_level());
                    }
                    Message::GetUSize { opt, tx } => {
                        let _ = tx.send(self.data.usize(opt));
                    }
                    Message::GetStr { opt, tx } => {
                        let _ = tx.send(self.data.str(opt));
                    }
                }
            }
        });
        (super::Config::Actual(tx), handle)
    }

    /// Rebuilds the configuration: defaults, then the file, then the
    /// environment. Nothing changes if any step fails.
    ///
    /// A missing config file is not an error.
    async fn load(&mut self) -> anyhow::Result<()> {
        let mut data = read_file(&self.path).await?;
        apply_env(&self.env, &mut data).await?;
        self.data = data;
        Ok(())
    }
}

/// Parses the TOML config file, falling back to the defaults when it does
/// not exist.
pub async fn read_file(path: &ArcPath) -> anyhow::Result<Data> {
    match tokio::fs::read_to_string(path).await {
        Ok(contents) => toml::from_str(&contents)
            .with_context(|| format!("Invalid config file: {}", path.display())),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(Data::default()),
        Err(err) => {
            Err(err).with_context(|| format!("Failed to read config file: {}", path.display()))
        }
    }
}

/// Applies `PORT` and `YTRSS_LOG_LEVEL` on top of `data`.
pub async fn apply_env(env: &Env, data: &mut Data) -> anyhow::Result<()> {
    if let Some(port) = env.env(PORT_VAR).await? {
        let port = port
            .trim()
            .parse()
            .with_context(|| format!("Invalid {PORT_VAR} value: {port}"))?;
        data.set_port(port);
    }
    if let Some(level) = env.env(LOG_LEVEL_VAR).await? {
        let level: LogLevel = level
            .parse()
            .with_context(|| format!("Invalid {LOG_LEVEL_VAR} value"))?;
        data.set_log_level(level);
    }
    Ok(())
}
