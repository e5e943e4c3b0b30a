//! Renderer overlay selector.

use crate::error::WeatherGlobeError;
use std::fmt;
use std::str::FromStr;

/// Which weather quantity the renderer overlays on the globe.
///
/// The data layer does not depend on the mode; it only selects how
/// [`crate::Overlay::build`] turns a dataset into markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DisplayMode {
    /// Colored points by air temperature.
    #[default]
    Temperature,
    /// Points sized and colored by precipitation.
    Precipitation,
    /// Wind particles only.
    Wind,
    /// Temperature points, precipitation points where it rains, and wind particles.
    Composite,
}

impl DisplayMode {
    pub const ALL: [DisplayMode; 4] = [
        DisplayMode::Temperature,
        DisplayMode::Precipitation,
        DisplayMode::Wind,
        DisplayMode::Composite,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            DisplayMode::Temperature => "temperature",
            DisplayMode::Precipitation => "precipitation",
            DisplayMode::Wind => "wind",
            DisplayMode::Composite => "composite",
        }
    }
}

/// # Examples
///
/// ```
/// use weather_globe::DisplayMode;
///
/// assert_eq!(DisplayMode::Wind.to_string(), "wind");
/// ```
impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DisplayMode {
    type Err = WeatherGlobeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        DisplayMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == normalized)
            .ok_or_else(|| WeatherGlobeError::UnknownDisplayMode(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_display_modes() {
        for mode in DisplayMode::ALL {
            assert_eq!(mode.to_string().parse::<DisplayMode>().unwrap(), mode);
        }
        assert_eq!(" Composite ".parse::<DisplayMode>().unwrap(), DisplayMode::Composite);
        assert!(matches!(
            "humidity".parse::<DisplayMode>(),
            Err(WeatherGlobeError::UnknownDisplayMode(mode)) if mode == "humidity"
        ));
    }
}
