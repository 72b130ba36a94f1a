use std::collections::HashMap;
use std::sync::Arc;

use common::localization::{Localization, StaticLocalization};
use pager::PagerSnapshot;
use serde::Serialize;
use tokio::sync::RwLock;

/// Topic row shown in the listing.
#[derive(Debug, Clone, Serialize)]
pub struct Topic {
    pub id: u64,
    pub title: String,
}

/// Shared host state. Each request builds its own pager; the only
/// cross-request piece is the snapshot store holding the paging values that
/// survive between renders of a listing.
#[derive(Clone)]
pub struct AppState {
    pub topics: Arc<Vec<Topic>>,
    pub snapshots: Arc<RwLock<HashMap<String, PagerSnapshot>>>,
    /// Route context for legacy by-message links: message id -> owning topic.
    pub message_topics: Arc<HashMap<u64, u64>>,
    pub pager_cfg: configs::PagerConfig,
    pub localization: Arc<dyn Localization>,
}

impl AppState {
    pub fn new(pager_cfg: configs::PagerConfig, topics: Vec<Topic>) -> Self {
        Self {
            topics: Arc::new(topics),
            snapshots: Arc::new(RwLock::new(HashMap::new())),
            message_topics: Arc::new(HashMap::new()),
            pager_cfg,
            localization: Arc::new(StaticLocalization),
        }
    }

    pub fn with_message_topics(mut self, map: HashMap<u64, u64>) -> Self {
        self.message_topics = Arc::new(map);
        self
    }

    /// Demo catalog used by the standalone binary.
    pub fn with_demo_topics(pager_cfg: configs::PagerConfig, count: u64) -> Self {
        let topics = (1..=count)
            .map(|id| Topic {
                id,
                title: format!("Topic {id}"),
            })
            .collect();
        Self::new(pager_cfg, topics)
    }
}
