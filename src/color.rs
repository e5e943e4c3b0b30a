//! Color mapping functions for weather visualization
//!
//! Each mapping normalizes a physical value into `[0, 1]`, clamping anything outside
//! the documented range, and picks a color on an HSL ramp. Every function is total:
//! a `NaN` input is treated as the low end of its range.

use serde::{Deserialize, Serialize};

/// Temperature range mapped onto the blue → white → red ramp, in °C.
pub const TEMPERATURE_RANGE: (f64, f64) = (-50.0, 50.0);
/// Precipitation range mapped onto the light → heavy blue ramp, in mm/h.
pub const PRECIPITATION_RANGE: (f64, f64) = (0.0, 100.0);
/// Wind speed range mapped onto the green → red ramp, in km/h.
pub const WIND_SPEED_RANGE: (f64, f64) = (0.0, 100.0);

const BLUE_HUE: f32 = 0.6;
const RED_HUE: f32 = 0.0;
const GREEN_HUE: f32 = 0.3;

/// An sRGB color with channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Builds a color from hue, saturation and lightness, all in `[0, 1]`.
    ///
    /// The hue wraps around; saturation and lightness are clamped.
    ///
    /// ```
    /// use weather_globe::color::Rgb;
    ///
    /// assert_eq!(Rgb::from_hsl(0.0, 1.0, 0.5).to_hex(), "#ff0000");
    /// assert_eq!(Rgb::from_hsl(0.6, 1.0, 0.5).to_hex(), "#0066ff");
    /// ```
    pub fn from_hsl(hue: f32, saturation: f32, lightness: f32) -> Self {
        let hue = hue.rem_euclid(1.0);
        let saturation = saturation.clamp(0.0, 1.0);
        let lightness = lightness.clamp(0.0, 1.0);

        if saturation == 0.0 {
            return Self::new(lightness, lightness, lightness);
        }

        let q = if lightness <= 0.5 {
            lightness * (1.0 + saturation)
        } else {
            lightness + saturation - lightness * saturation
        };
        let p = 2.0 * lightness - q;

        Self::new(
            hue_to_channel(p, q, hue + 1.0 / 3.0),
            hue_to_channel(p, q, hue),
            hue_to_channel(p, q, hue - 1.0 / 3.0),
        )
    }

    /// `#rrggbb` form, as expected by most renderers.
    pub fn to_hex(&self) -> String {
        format!(
            "#{:02x}{:02x}{:02x}",
            to_byte(self.r),
            to_byte(self.g),
            to_byte(self.b)
        )
    }

    pub fn to_array(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

fn hue_to_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * 6.0 * (2.0 / 3.0 - t)
    } else {
        p
    }
}

fn to_byte(channel: f32) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Maps `value` from `(min, max)` into `[0, 1]`. NaN maps to 0.
pub fn normalize(value: f64, (min, max): (f64, f64)) -> f32 {
    if value.is_nan() {
        return 0.0;
    }
    ((value - min) / (max - min)).clamp(0.0, 1.0) as f32
}

/// Blue at -50 °C, white at 0 °C, red at 50 °C.
pub fn temperature_to_color(celsius: f64) -> Rgb {
    let t = normalize(celsius, TEMPERATURE_RANGE);
    let hue = if t < 0.5 { BLUE_HUE } else { RED_HUE };
    Rgb::from_hsl(hue, 1.0, 1.0 - (t - 0.5).abs())
}

/// Blue whose saturation grows with precipitation, from grey at 0 to pure blue at 100 mm/h.
pub fn precipitation_to_color(mm_per_hour: f64) -> Rgb {
    let n = normalize(mm_per_hour, PRECIPITATION_RANGE);
    Rgb::from_hsl(BLUE_HUE, n, 0.5)
}

/// Green when calm, through yellow, to red at 100 km/h.
pub fn wind_speed_to_color(kmh: f64) -> Rgb {
    let n = normalize(kmh, WIND_SPEED_RANGE);
    Rgb::from_hsl(GREEN_HUE * (1.0 - n), 1.0, 0.5)
}

/// Wind particle tint: blue, brightening with speed.
pub fn wind_particle_color(kmh: f64) -> Rgb {
    let n = normalize(kmh, WIND_SPEED_RANGE);
    Rgb::from_hsl(BLUE_HUE, 1.0, n)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: Rgb, expected: Rgb) {
        let close = actual
            .to_array()
            .iter()
            .zip(expected.to_array())
            .all(|(a, e)| (a - e).abs() < 1e-5);
        assert!(close, "expected {expected:?}, got {actual:?}");
    }

    #[test]
    fn test_hsl_primaries() {
        assert_close(Rgb::from_hsl(0.0, 1.0, 0.5), Rgb::new(1.0, 0.0, 0.0));
        assert_close(Rgb::from_hsl(1.0 / 3.0, 1.0, 0.5), Rgb::new(0.0, 1.0, 0.0));
        assert_close(Rgb::from_hsl(2.0 / 3.0, 1.0, 0.5), Rgb::new(0.0, 0.0, 1.0));
        assert_close(Rgb::from_hsl(0.25, 0.0, 0.3), Rgb::new(0.3, 0.3, 0.3));
        assert_close(Rgb::from_hsl(0.6, 1.0, 1.0), Rgb::new(1.0, 1.0, 1.0));
        assert_close(Rgb::from_hsl(0.6, 1.0, 0.0), Rgb::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_temperature_ramp() {
        assert_close(temperature_to_color(-50.0), Rgb::new(0.0, 0.4, 1.0));
        assert_close(temperature_to_color(0.0), Rgb::new(1.0, 1.0, 1.0));
        assert_close(temperature_to_color(50.0), Rgb::new(1.0, 0.0, 0.0));
        assert_eq!(temperature_to_color(50.0).to_hex(), "#ff0000");

        let cool = temperature_to_color(-25.0);
        assert!(cool.b > cool.r);
        let warm = temperature_to_color(25.0);
        assert!(warm.r > warm.b);
    }

    #[test]
    fn test_temperature_clamps() {
        assert_eq!(temperature_to_color(-100.0), temperature_to_color(-50.0));
        assert_eq!(temperature_to_color(100.0), temperature_to_color(50.0));
        assert_eq!(temperature_to_color(f64::NEG_INFINITY), temperature_to_color(-50.0));
    }

    #[test]
    fn test_precipitation_ramp() {
        assert_close(precipitation_to_color(0.0), Rgb::new(0.5, 0.5, 0.5));
        assert_close(precipitation_to_color(100.0), Rgb::new(0.0, 0.4, 1.0));
        assert_eq!(precipitation_to_color(250.0), precipitation_to_color(100.0));
        assert_eq!(precipitation_to_color(-3.0), precipitation_to_color(0.0));
        let light = precipitation_to_color(10.0);
        let heavy = precipitation_to_color(60.0);
        assert!(heavy.b - heavy.r > light.b - light.r);
    }

    #[test]
    fn test_wind_speed_ramp() {
        assert_close(wind_speed_to_color(0.0), Rgb::from_hsl(0.3, 1.0, 0.5));
        assert_close(wind_speed_to_color(100.0), Rgb::new(1.0, 0.0, 0.0));
        assert_eq!(wind_speed_to_color(180.0), wind_speed_to_color(100.0));
        let calm = wind_speed_to_color(0.0);
        assert!(calm.g > calm.r);
    }

    #[test]
    fn test_nan_maps_to_low_end() {
        assert_eq!(temperature_to_color(f64::NAN), temperature_to_color(-50.0));
        assert_eq!(precipitation_to_color(f64::NAN), precipitation_to_color(0.0));
        assert_eq!(wind_speed_to_color(f64::NAN), wind_speed_to_color(0.0));
    }

    #[test]
    fn test_wind_particle_brightens_with_speed() {
        assert_close(wind_particle_color(0.0), Rgb::new(0.0, 0.0, 0.0));
        assert_close(wind_particle_color(50.0), Rgb::new(0.0, 0.4, 1.0));
        assert_close(wind_particle_color(150.0), Rgb::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_hex_rounds_channels() {
        assert_eq!(Rgb::new(0.0, 0.4, 1.0).to_hex(), "#0066ff");
        assert_eq!(Rgb::new(1.5, -0.2, 0.5).to_hex(), "#ff0080");
    }
}
