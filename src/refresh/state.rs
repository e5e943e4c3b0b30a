use crate::types::dataset::GlobalDataset;
use std::sync::Arc;

/// Lifecycle of the data a [`crate::WeatherPoller`] publishes.
///
/// `Idle` only occurs before the first refresh starts. Every refresh, scheduled or
/// manual, moves the state to `Loading` and then to `Ready` or `Failed`. The last
/// good dataset rides along in `Loading` and `Failed`, so a renderer can keep drawing
/// it while a refresh runs or after one dies.
#[derive(Debug, Clone, Default)]
pub enum RefreshState {
    #[default]
    Idle,
    Loading {
        previous: Option<Arc<GlobalDataset>>,
    },
    Ready(Arc<GlobalDataset>),
    /// The dataset build itself died. Individual point failures never get here; they
    /// become placeholders in a `Ready` dataset.
    Failed {
        error: String,
        previous: Option<Arc<GlobalDataset>>,
    },
}

impl RefreshState {
    /// The freshest dataset available: the ready one, or the one kept from before
    /// the current refresh.
    pub fn dataset(&self) -> Option<&Arc<GlobalDataset>> {
        match self {
            RefreshState::Ready(dataset) => Some(dataset),
            RefreshState::Loading { previous } | RefreshState::Failed { previous, .. } => {
                previous.as_ref()
            }
            RefreshState::Idle => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, RefreshState::Loading { .. })
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, RefreshState::Ready(_))
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            RefreshState::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Moves to `Loading`, keeping the current dataset.
    pub(crate) fn start_loading(&mut self) {
        let previous = self.dataset().cloned();
        *self = RefreshState::Loading { previous };
    }

    /// Moves to `Failed`, keeping the current dataset.
    pub(crate) fn fail(&mut self, error: String) {
        let previous = self.dataset().cloned();
        *self = RefreshState::Failed { error, previous };
    }
}
