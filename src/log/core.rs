use anyhow::Context;
use tokio::{
    fs::{File, OpenOptions},
    io::AsyncWriteExt,
    task::JoinHandle,
};

use super::data::{LogLevel, LogMessage};
use super::message::Message;
use crate::ArcPath;

const LOG_PREFIX: &str = "ytrss_";

/// The pair of files a logger writes to when a log directory is configured.
#[derive(Debug)]
struct LogFiles {
    /// Directory where log files are stored
    dir: ArcPath,
    /// Path to the timestamped log file of this run
    path: ArcPath,
    /// Handle to the timestamped log file
    file: File,
    /// Handle to the "latest" log file
    latest: File,
}

/// The core of the logging system that manages logging to stderr and log files.
///
/// Messages at or above the print level go to stderr as soon as they arrive.
/// When a log directory is configured, every message is also written to a
/// timestamped log file and to `latest.log`.
///
/// # Thread Safety
/// This type is driven by a single task; all logging operations are handled
/// sequentially in arrival order.
#[derive(Debug)]
pub struct Core {
    files: Option<LogFiles>,
    /// Minimum level of messages to be printed to stderr
    print_level: LogLevel,
    /// Maximum age of log files in days before they are deleted
    max_age: usize,
}

impl Core {
    /// Creates a new logger instance with the specified configuration.
    ///
    /// # Errors
    /// Returns an error if the log directory, the timestamped log file or the
    /// latest log file cannot be created.
    pub async fn build(
        level: LogLevel,
        max_age: usize,
        log_dir: Option<ArcPath>,
    ) -> anyhow::Result<Self> {
        let files = match log_dir {
            Some(dir) => Some(Self::open_files(dir).await?),
            None => None,
        };

        Ok(Self {
            files,
            print_level: level,
            max_age,
        })
    }

    async fn open_files(dir: ArcPath) -> anyhow::Result<LogFiles> {
        tokio::fs::create_dir_all(&dir)
            .await
            .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;

        let path = ArcPath::from(dir.join(format!(
            "{}{}.log",
            LOG_PREFIX,
            chrono::Utc::now().format("%Y-%m-%d-%H-%M-%S")
        )));
        let latest_path = dir.join("latest.log");

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await
            .with_context(|| format!("Failed to create log file: {}", path.display()))?;
        let latest = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&latest_path)
            .await
            .with_context(|| {
                format!("Failed to create latest log file: {}", latest_path.display())
            })?;

        Ok(LogFiles {
            dir,
            path,
            file,
            latest,
        })
    }

    /// Transforms the logger core instance into an actor.
    pub fn spawn(mut self) -> (super::Log, JoinHandle<()>) {
        let (tx, mut rx) = tokio::sync::mpsc::channel(crate::BUFFER_SIZE);
        let handle = tokio::spawn(async move {
            while let Some(command) = rx.recv().await {
                match command {
                    Message::Log(msg) => {
                        self.log(msg).await;
                    }
                    Message::Flush { tx } => {
                        rx.close();
                        while let Ok(Message::Log(msg)) = rx.try_recv() {
                            self.log(msg).await;
                        }
                        self.flush().await;
                        let _ = tx.send(());
                        break;
                    }
                    Message::CollectGarbage { tx } => {
                        self.collect_garbage().await;
                        let _ = tx.send(());
                    }
                }
            }
        });

        (super::Log::Actual(tx), handle)
    }

    /// Prints the message to stderr if its level is high enough and appends it
    /// to both log files.
    async fn log(&mut self, message: LogMessage) {
        if message.level >= self.print_level {
            eprintln!("{}", message);
        }

        let Some(files) = self.files.as_mut() else {
            return;
        };

        let line = format!("{}\n", message);
        let written = async {
            files.file.write_all(line.as_bytes()).await?;
            files.latest.write_all(line.as_bytes()).await
        }
        .await;

        if let Err(err) = written {
            eprintln!(
                "Failed to write to log file {}: {}",
                files.path.display(),
                err
            );
        }
    }

    /// Flushes both log files and tells the user where the full log lives.
    async fn flush(mut self) {
        let Some(files) = self.files.as_mut() else {
            return;
        };

        let _ = files.file.flush().await;
        let _ = files.latest.flush().await;
        eprintln!("Check the full log file: {}", files.path.display());
    }

    /// Deletes log files older than `max_age` days. Does nothing when
    /// `max_age` is 0 or no log directory is configured.
    async fn collect_garbage(&mut self) {
        if self.max_age == 0 {
            return;
        }
        let Some((dir, current)) = self
            .files
            .as_ref()
            .map(|files| (files.dir.clone(), files.path.clone()))
        else {
            return;
        };

        let now = std::time::SystemTime::now();
        let Ok(mut entries) = tokio::fs::read_dir(&dir).await else {
            self.log(LogMessage::new(
                LogLevel::Error,
                "log",
                "Failed to read the logs directory during garbage collection".into(),
            ))
            .await;
            return;
        };

        while let Ok(Some(entry)) = entries.next_entry().await {
            let path = entry.path();
            let filename = entry.file_name();
            let filename = filename.to_string_lossy();
            if !filename.starts_with(LOG_PREFIX)
                || !filename.ends_with(".log")
                || path.as_path() == &*current
            {
                continue;
            }

            let Ok(Ok(modified)) = entry.metadata().await.map(|meta| meta.modified()) else {
                continue;
            };
            let Ok(age) = now.duration_since(modified) else {
                continue;
            };
            let age = age.as_secs() / 60 / 60 / 24;

            if age as usize > self.max_age && tokio::fs::remove_file(&path).await.is_err() {
                self.log(LogMessage::new(
                    LogLevel::Warning,
                    "log",
                    format!("Failed to remove the log file: {}", path.display()),
                ))
                .await;
            }
        }
    }
}
