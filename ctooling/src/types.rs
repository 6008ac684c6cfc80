//! Tool invocation context shared with every executing tool.

use ccommon::{MetadataMap, SessionId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolContext {
    pub session_id: SessionId,
    pub metadata: MetadataMap,
}

impl ToolContext {
    pub fn new(session_id: impl Into<SessionId>) -> Self {
        Self {
            session_id: session_id.into(),
            metadata: MetadataMap::new(),
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}
