//! Combo handlers
//!
//! The composer session applies edit commands to one sequence. The combo
//! service bridges sessions and the persistence collaborator: every read goes
//! through `unmarshal`, every write through `marshal`.

mod composer_session;

pub use composer_session::ComposerSession;

use crate::config::ComposerConfig;
use crate::error::{ComboError, ComboResult};
use crate::events::ComboEvent;
use crate::marshalling::{marshal, unmarshal, PersistedCombo};
use crate::value_objects::ComboId;
use async_trait::async_trait;
use indexmap::IndexMap;
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info};

/// Storage for the graph field of combos, keyed by an opaque id
#[async_trait]
pub trait ComboRepository: Send + Sync {
    /// Load the raw stored graph document
    ///
    /// A stored record whose graph field is absent comes back as `Value::Null`.
    async fn load(&self, combo_id: ComboId) -> ComboResult<Value>;

    /// Store a marshalled graph
    async fn save(&self, combo_id: ComboId, combo: PersistedCombo) -> ComboResult<()>;

    /// Delete a combo, returning whether it existed
    async fn delete(&self, combo_id: ComboId) -> ComboResult<bool>;

    /// Check if a combo exists
    async fn exists(&self, combo_id: ComboId) -> ComboResult<bool>;

    /// Generate a new combo id
    async fn next_combo_id(&self) -> ComboResult<ComboId>;
}

/// In-memory implementation of combo repository for testing
#[derive(Default)]
pub struct InMemoryComboRepository {
    combos: Mutex<IndexMap<ComboId, Value>>,
}

impl InMemoryComboRepository {
    /// Create a new in-memory repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a raw document as-is, bypassing marshalling
    pub fn insert_raw(&self, combo_id: ComboId, document: Value) {
        self.combos.lock().insert(combo_id, document);
    }

    /// Ids in insertion order
    pub fn combo_ids(&self) -> Vec<ComboId> {
        self.combos.lock().keys().copied().collect()
    }
}

#[async_trait]
impl ComboRepository for InMemoryComboRepository {
    async fn load(&self, combo_id: ComboId) -> ComboResult<Value> {
        self.combos
            .lock()
            .get(&combo_id)
            .cloned()
            .ok_or(ComboError::ComboNotFound(combo_id))
    }

    async fn save(&self, combo_id: ComboId, combo: PersistedCombo) -> ComboResult<()> {
        self.combos.lock().insert(combo_id, combo.into_value());
        Ok(())
    }

    async fn delete(&self, combo_id: ComboId) -> ComboResult<bool> {
        Ok(self.combos.lock().shift_remove(&combo_id).is_some())
    }

    async fn exists(&self, combo_id: ComboId) -> ComboResult<bool> {
        Ok(self.combos.lock().contains_key(&combo_id))
    }

    async fn next_combo_id(&self) -> ComboResult<ComboId> {
        Ok(ComboId::new())
    }
}

/// Opens composer sessions from storage and saves them back
pub struct ComboService {
    repository: Arc<dyn ComboRepository>,
    config: ComposerConfig,
}

impl ComboService {
    /// Create a new combo service
    pub fn new(repository: Arc<dyn ComboRepository>, config: ComposerConfig) -> Self {
        Self { repository, config }
    }

    /// Start composing a combo that does not exist yet
    pub fn compose(&self) -> ComposerSession {
        ComposerSession::new(self.config.clone())
    }

    /// Load a stored combo into a new session
    pub async fn open(&self, combo_id: ComboId) -> ComboResult<(ComposerSession, ComboEvent)> {
        let raw = self.repository.load(combo_id).await?;
        let graph = unmarshal(Some(&raw)).map_err(|e| {
            error!(%combo_id, error = %e, "Stored combo failed validation");
            e
        })?;
        let session = ComposerSession::from_graph(&graph, self.config.clone())?;

        info!(%combo_id, tricks = graph.node_count(), "Opened combo");
        Ok((
            session,
            ComboEvent::ComboLoaded {
                combo_id,
                trick_count: graph.node_count(),
            },
        ))
    }

    /// Validate a session's combo and store it under `combo_id`
    pub async fn save(&self, combo_id: ComboId, session: &ComposerSession) -> ComboResult<ComboEvent> {
        let graph = session.to_graph();
        let persisted = marshal(&graph)?;
        self.repository.save(combo_id, persisted).await?;

        info!(%combo_id, tricks = graph.node_count(), "Saved combo");
        Ok(ComboEvent::ComboSaved {
            combo_id,
            trick_count: graph.node_count(),
            saved_at: chrono::Utc::now(),
        })
    }

    /// Store a newly composed combo under a fresh id
    pub async fn save_new(&self, session: &ComposerSession) -> ComboResult<(ComboId, ComboEvent)> {
        let combo_id = self.repository.next_combo_id().await?;
        let event = self.save(combo_id, session).await?;
        Ok((combo_id, event))
    }

    /// Delete a stored combo
    pub async fn delete(&self, combo_id: ComboId) -> ComboResult<()> {
        if self.repository.delete(combo_id).await? {
            info!(%combo_id, "Deleted combo");
            Ok(())
        } else {
            Err(ComboError::ComboNotFound(combo_id))
        }
    }
}
