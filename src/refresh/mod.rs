//! Periodic and on-demand refresh of the global dataset.

mod poller;
mod state;

pub use poller::WeatherPoller;
pub use state::RefreshState;

use std::time::Duration;

/// Default time between two scheduled refreshes.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(5 * 60);
