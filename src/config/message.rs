use tokio::sync::oneshot::Sender;

use crate::{ArcPath, ArcStr, log::LogLevel};

use super::data::{PathOpt, StrOpt, USizeOpt};

/// Messages that can be sent to the configuration actor.
#[derive(Debug)]
pub enum Message {
    /// Load the config file and apply environment overrides
    Load { tx: Sender<anyhow::Result<()>> },
    GetPort { tx: Sender<u16> },
    SetPort { port: u16 },
    GetPath {
        opt: PathOpt,
        tx: Sender<Option<ArcPath>>,
    },
    GetLogLevel { tx: Sender<LogLevel> },
    GetUSize { opt: USizeOpt, tx: Sender<usize> },
    GetStr { opt: StrOpt, tx: Sender<ArcStr> },
}
