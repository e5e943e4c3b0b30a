use crate::providers::{
    CloudCoverSource, MeteorologicalSource, OpenMeteoClient, OpenWeatherMapClient,
};
use crate::refresh::state::RefreshState;
use crate::weather_service::WeatherService;
use log::{debug, error, info};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// Keeps a [`RefreshState`] up to date by rebuilding the global dataset on a timer.
///
/// Starting the poller triggers one immediate refresh and then one every
/// `refresh_interval`. [`WeatherPoller::refetch`] adds an out-of-band refresh without
/// moving the schedule. Refreshes are not serialized; whichever finishes last wins.
///
/// While a refresh runs, the previous dataset stays available through
/// [`RefreshState::dataset`].
///
/// Stopping (explicitly or by dropping the poller) ends the schedule and discards the
/// result of any refresh still in flight. Requests already issued are left to finish.
///
/// Must be started from within a tokio runtime.
///
/// # Examples
///
/// ```rust,no_run
/// # use weather_globe::{RefreshState, ServiceConfig, WeatherGlobeError, WeatherPoller, WeatherService};
/// # use std::sync::Arc;
/// # #[tokio::main]
/// # async fn main() -> Result<(), WeatherGlobeError> {
/// let config = ServiceConfig::from_env();
/// let service = Arc::new(WeatherService::from_config(&config)?);
/// let poller = WeatherPoller::start(service, config.refresh_interval);
///
/// let mut updates = poller.subscribe();
/// while updates.changed().await.is_ok() {
///     if let Some(dataset) = updates.borrow().dataset() {
///         println!("{} observations", dataset.len());
///     }
/// }
/// # Ok(())
/// # }
/// ```
pub struct WeatherPoller<M = OpenMeteoClient, C = OpenWeatherMapClient> {
    service: Arc<WeatherService<M, C>>,
    state: Arc<watch::Sender<RefreshState>>,
    token: CancellationToken,
    refresh_interval: Duration,
}

impl<M, C> WeatherPoller<M, C>
where
    M: MeteorologicalSource + 'static,
    C: CloudCoverSource + 'static,
{
    /// Starts polling. The first refresh is scheduled immediately.
    pub fn start(service: Arc<WeatherService<M, C>>, refresh_interval: Duration) -> Self {
        let (state, _) = watch::channel(RefreshState::Idle);
        let poller = Self {
            service,
            state: Arc::new(state),
            token: CancellationToken::new(),
            refresh_interval,
        };
        info!(
            "Polling weather every {}s",
            poller.refresh_interval.as_secs_f64()
        );
        poller.spawn_schedule();
        poller
    }

    fn spawn_schedule(&self) {
        let service = self.service.clone();
        let state = self.state.clone();
        let token = self.token.clone();
        let refresh_interval = self.refresh_interval;

        tokio::spawn(async move {
            let mut ticker = interval(refresh_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => {
                        debug!("Weather polling stopped");
                        break;
                    }
                    _ = ticker.tick() => {
                        spawn_refresh(service.clone(), state.clone(), token.clone());
                    }
                }
            }
        });
    }

    /// Triggers a refresh now, outside the schedule. Does nothing once stopped.
    pub fn refetch(&self) {
        if self.token.is_cancelled() {
            debug!("Ignoring refetch on a stopped poller");
            return;
        }
        spawn_refresh(self.service.clone(), self.state.clone(), self.token.clone());
    }
}

impl<M, C> WeatherPoller<M, C> {
    /// Stops polling. In-flight results are discarded; the state keeps its last value.
    pub fn stop(&self) {
        self.token.cancel();
    }

    pub fn is_running(&self) -> bool {
        !self.token.is_cancelled()
    }

    pub fn refresh_interval(&self) -> Duration {
        self.refresh_interval
    }

    /// The current state.
    pub fn state(&self) -> RefreshState {
        self.state.borrow().clone()
    }

    /// A receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<RefreshState> {
        self.state.subscribe()
    }
}

impl<M, C> Drop for WeatherPoller<M, C> {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

fn spawn_refresh<M, C>(
    service: Arc<WeatherService<M, C>>,
    state: Arc<watch::Sender<RefreshState>>,
    token: CancellationToken,
) where
    M: MeteorologicalSource + 'static,
    C: CloudCoverSource + 'static,
{
    tokio::spawn(async move {
        if token.is_cancelled() {
            return;
        }
        state.send_modify(RefreshState::start_loading);

        // Run the build as its own task so a panic surfaces as a JoinError.
        let build = tokio::spawn(async move { service.global_dataset().await });
        let outcome = build.await;

        if token.is_cancelled() {
            debug!("Discarding weather refresh finished after stop");
            return;
        }
        match outcome {
            Ok(dataset) => {
                info!(
                    "Weather refresh complete: {} points, {} placeholders",
                    dataset.len(),
                    dataset.placeholder_count()
                );
                state.send_replace(RefreshState::Ready(Arc::new(dataset)));
            }
            Err(e) => {
                error!("Weather refresh failed: {}", e);
                state.send_modify(|state| state.fail(e.to_string()));
            }
        }
    });
}
