//! In-process provider fakes shared by the unit tests.

use crate::providers::error::ProviderError;
use crate::providers::{CloudCoverSource, CurrentConditions, MeteorologicalSource};
use crate::types::coordinate::{CoordinateKey, LatLon};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

pub(crate) const SAMPLE_CONDITIONS: CurrentConditions = CurrentConditions {
    temperature: 25.3,
    precipitation: 0.0,
    wind_speed: 10.0,
    wind_direction: 90.0,
};

fn upstream_failure(url: &str) -> ProviderError {
    ProviderError::HttpStatus {
        url: url.to_string(),
        status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
        body: "upstream unavailable".to_string(),
    }
}

/// Primary provider fake. Returns fixed conditions, optionally failing, panicking or
/// sleeping for selected coordinates.
pub(crate) struct FakeMeteorological {
    conditions: CurrentConditions,
    failing: HashSet<CoordinateKey>,
    panic_at: Option<CoordinateKey>,
    delay: Option<Duration>,
    calls: AtomicUsize,
    completed: AtomicUsize,
}

impl FakeMeteorological {
    pub(crate) fn new(conditions: CurrentConditions) -> Self {
        Self {
            conditions,
            failing: HashSet::new(),
            panic_at: None,
            delay: None,
            calls: AtomicUsize::new(0),
            completed: AtomicUsize::new(0),
        }
    }

    pub(crate) fn failing_at(mut self, coordinates: impl IntoIterator<Item = LatLon>) -> Self {
        self.failing.extend(coordinates.into_iter().map(|c| c.key()));
        self
    }

    pub(crate) fn panicking_at(mut self, coordinate: LatLon) -> Self {
        self.panic_at = Some(coordinate.key());
        self
    }

    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Requests issued so far.
    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Requests that ran to completion (successfully or not).
    pub(crate) fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }
}

impl MeteorologicalSource for FakeMeteorological {
    async fn current_conditions(
        &self,
        coordinate: LatLon,
    ) -> Result<CurrentConditions, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.completed.fetch_add(1, Ordering::SeqCst);

        let key = coordinate.key();
        if self.panic_at == Some(key) {
            panic!("fake provider blew up at {}", coordinate);
        }
        if self.failing.contains(&key) {
            return Err(upstream_failure("fake://meteo/forecast"));
        }
        Ok(self.conditions)
    }
}

/// Cloud provider fake. `None` makes every call fail.
pub(crate) struct FakeCloud {
    clouds: Option<f64>,
    calls: AtomicUsize,
}

impl FakeCloud {
    pub(crate) fn new(clouds: f64) -> Self {
        Self {
            clouds: Some(clouds),
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            clouds: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl CloudCoverSource for FakeCloud {
    async fn cloud_cover(&self, _coordinate: LatLon) -> Result<f64, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.clouds
            .ok_or_else(|| upstream_failure("fake://clouds/weather"))
    }
}

/// Serves exactly one HTTP response on a local port.
///
/// Returns the base URL to point a client at and a handle resolving to the request
/// line the client sent.
pub(crate) async fn serve_once(status: &str, body: &str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buffer = [0u8; 1024];
        while !request.windows(4).any(|window| window == b"\r\n\r\n") {
            let read = socket.read(&mut buffer).await.unwrap();
            if read == 0 {
                break;
            }
            request.extend_from_slice(&buffer[..read]);
        }
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;

        String::from_utf8_lossy(&request)
            .lines()
            .next()
            .unwrap_or_default()
            .to_string()
    });
    (format!("http://{}", address), handle)
}
