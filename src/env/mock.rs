use std::{collections::HashMap, sync::Arc};

use crate::ArcStr;

/// Mock implementation of the Env actor.
///
/// Variables are fixed at construction, so tests never depend on the actual
/// system environment.
#[derive(Debug, Clone, Default)]
pub struct Mock {
    variables: Arc<HashMap<ArcStr, ArcStr>>,
}

impl Mock {
    pub fn new(variables: HashMap<ArcStr, ArcStr>) -> Self {
        Self {
            variables: Arc::new(variables),
        }
    }

    pub fn env(&self, key: &str) -> Option<ArcStr> {
        self.variables.get(key).cloned()
    }
}
