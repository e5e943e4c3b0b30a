use std::sync::Arc;
use weather_globe::{
    DisplayMode, LatLon, Overlay, RefreshState, ServiceConfig, WeatherGlobeError, WeatherPoller,
    WeatherService,
};

#[tokio::main]
async fn main() -> Result<(), WeatherGlobeError> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = ServiceConfig::from_env();
    let service = Arc::new(WeatherService::from_config(&config)?);

    let berlin = service.point_observation(LatLon(52.52, 13.405)).await?;
    println!("Berlin: {:#?}", berlin);

    let dataset = service.global_dataset().await;
    println!(
        "Fetched {} grid points ({} placeholders)",
        dataset.len(),
        dataset.placeholder_count()
    );

    let nearest = dataset
        .nearest()
        .location(LatLon(48.85, 2.35))
        .max_distance_km(3_000.0)
        .limit(3)
        .call();
    for (observation, distance_km) in nearest {
        println!(
            "{} at {:.0} km: {:.1} °C, {:.0}% clouds",
            observation.coordinate(),
            distance_km,
            observation.temperature,
            observation.clouds
        );
    }

    let overlay = Overlay::build(&dataset, DisplayMode::Composite, 100.0);
    println!(
        "Composite overlay: {} points, {} wind particles",
        overlay.points.len(),
        overlay.particles.len()
    );

    // Poll once more through the poller; the cache makes this refresh cheap.
    let poller = WeatherPoller::start(service, config.refresh_interval);
    let mut updates = poller.subscribe();
    if let Ok(state) = updates
        .wait_for(|state| state.is_ready() || state.error().is_some())
        .await
    {
        match &*state {
            RefreshState::Ready(dataset) => println!("Poller ready with {} points", dataset.len()),
            RefreshState::Failed { error, .. } => println!("Poller failed: {}", error),
            _ => {}
        }
    }
    poller.stop();

    Ok(())
}
