use tokio::sync::oneshot::Sender;

use super::data::LogMessage;

/// Messages that can be sent to a log [`Core`](super::core::Core) actor.
#[derive(Debug)]
pub enum Message {
    /// Logs a message with the specified level and content
    Log(LogMessage),
    /// Flushes the log files and stops the actor
    Flush { tx: Sender<()> },
    /// Runs the log garbage collector to delete old log files
    CollectGarbage { tx: Sender<()> },
}
