//! Light/dark themes and the palettes the background draws with.
//!
//! The field never looks up the current theme itself. The host resolves a
//! [`Theme`] to a [`ThemePalette`] and pushes it with
//! [`NetworkField::set_palette`](crate::NetworkField::set_palette) whenever the
//! theme changes.
//!
//! ```ignore
//! let theme = prefs.theme.toggled();
//! field.set_palette(ThemePalette::for_theme(theme));
//! ```

use crate::error::{ColorError, ConfigError};
use glam::{Vec3, Vec4};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Site color theme.
///
/// Serialized as `"dark"` / `"light"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Dark background, white points (default).
    #[default]
    Dark,
    /// Light background, blue points.
    Light,
}

impl Theme {
    /// The other theme.
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Whether this is the light theme.
    pub fn is_light(self) -> bool {
        self == Theme::Light
    }
}

/// Colors used to draw the network for one theme.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemePalette {
    /// Colors sampled (uniformly) for each point. Empty falls back to white.
    pub particle_colors: Vec<Vec3>,
    /// Connection line color; alpha is multiplied by each line's opacity.
    pub line_color: Vec4,
    /// Clear color behind the network.
    pub background: Vec3,
}

impl ThemePalette {
    /// White points and faint white lines on a near-black background.
    pub fn dark() -> Self {
        Self {
            particle_colors: vec![Vec3::ONE],
            line_color: Vec4::new(1.0, 1.0, 1.0, 0.2),
            background: Vec3::new(0.02, 0.02, 0.05),
        }
    }

    /// Blue points and navy half-transparent lines on an off-white background.
    pub fn light() -> Self {
        Self {
            particle_colors: vec![Vec3::new(0.0, 0.4, 1.0)],
            line_color: Vec4::new(0.0, 0.2, 0.4, 0.5),
            background: Vec3::new(0.96, 0.97, 0.98),
        }
    }

    /// Palette for a theme.
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self::dark(),
            Theme::Light => Self::light(),
        }
    }

    /// Build a palette from hex strings.
    ///
    /// `line_alpha` becomes the alpha of the line color.
    pub fn from_hex(
        particles: &[&str],
        line: &str,
        line_alpha: f32,
        background: &str,
    ) -> Result<Self, ColorError> {
        let particle_colors = particles
            .iter()
            .map(|s| parse_hex_color(s))
            .collect::<Result<Vec<_>, _>>()?;
        let line = parse_hex_color(line)?;
        Ok(Self {
            particle_colors,
            line_color: line.extend(line_alpha.clamp(0.0, 1.0)),
            background: parse_hex_color(background)?,
        })
    }

    /// Replace the point colors.
    pub fn with_particle_colors(mut self, colors: Vec<Vec3>) -> Self {
        self.particle_colors = colors;
        self
    }

    /// Pick a point color at random.
    pub fn pick<R: Rng>(&self, rng: &mut R) -> Vec3 {
        match self.particle_colors.len() {
            0 => Vec3::ONE,
            1 => self.particle_colors[0],
            n => self.particle_colors[rng.gen_range(0..n)],
        }
    }
}

impl Default for ThemePalette {
    fn default() -> Self {
        Self::dark()
    }
}

/// Parse `#rgb` or `#rrggbb` (leading `#` optional) into RGB in `0.0..=1.0`.
pub fn parse_hex_color(input: &str) -> Result<Vec3, ColorError> {
    let err = || ColorError {
        input: input.to_string(),
    };
    let hex = input.trim().trim_start_matches('#');
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(err());
    }

    let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| err());
    let (r, g, b) = match hex.len() {
        3 => {
            // #abc == #aabbcc
            let expand = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17);
            (expand(0)?, expand(1)?, expand(2)?)
        }
        6 => (channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?),
        _ => return Err(err()),
    };

    Ok(Vec3::new(r as f32, g as f32, b as f32) / 255.0)
}

/// Stored user preferences.
///
/// Only the theme is kept, as `{"theme": "light"}` or `{"theme": "dark"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Last chosen theme.
    pub theme: Theme,
}

impl Preferences {
    /// Load preferences, falling back to defaults when the file does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Save preferences as JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_parse_long_hex() {
        let c = parse_hex_color("#0066ff").unwrap();
        assert!(c.x.abs() < 1e-6);
        assert!((c.y - 0.4).abs() < 1e-6);
        assert!((c.z - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_parse_short_hex() {
        assert_eq!(parse_hex_color("#fff").unwrap(), Vec3::ONE);
        assert_eq!(parse_hex_color("000").unwrap(), Vec3::ZERO);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_hex_color("#12").is_err());
        assert!(parse_hex_color("#gggggg").is_err());
        assert!(parse_hex_color("#1234567").is_err());
        assert!(parse_hex_color("").is_err());
    }

    #[test]
    fn test_light_palette_matches_hex() {
        let from_hex = ThemePalette::from_hex(&["#0066ff"], "#003366", 0.5, "#f5f7fa").unwrap();
        let light = ThemePalette::light();
        assert!((from_hex.particle_colors[0] - light.particle_colors[0]).length() < 1e-6);
        assert!((from_hex.line_color - light.line_color).length() < 1e-6);
    }

    #[test]
    fn test_toggle() {
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Light.toggled().toggled(), Theme::Light);
        assert!(Theme::Light.is_light());
    }

    #[test]
    fn test_pick_empty_palette_is_white() {
        let palette = ThemePalette::dark().with_particle_colors(Vec::new());
        let mut rng = SmallRng::seed_from_u64(1);
        assert_eq!(palette.pick(&mut rng), Vec3::ONE);
    }

    #[test]
    fn test_pick_stays_in_palette() {
        let colors = vec![Vec3::X, Vec3::Y, Vec3::Z];
        let palette = ThemePalette::dark().with_particle_colors(colors.clone());
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..50 {
            assert!(colors.contains(&palette.pick(&mut rng)));
        }
    }

    #[test]
    fn test_theme_serializes_lowercase() {
        let json = serde_json::to_string(&Preferences { theme: Theme::Light }).unwrap();
        assert_eq!(json, r#"{"theme":"light"}"#);
        let back: Preferences = serde_json::from_str(r#"{"theme":"dark"}"#).unwrap();
        assert_eq!(back.theme, Theme::Dark);
    }

    #[test]
    fn test_preferences_missing_file_is_default() {
        let path = std::env::temp_dir().join("netfield-prefs-does-not-exist.json");
        let _ = fs::remove_file(&path);
        assert_eq!(Preferences::load(&path).unwrap(), Preferences::default());
    }

    #[test]
    fn test_preferences_roundtrip_file() {
        let path = std::env::temp_dir().join(format!("netfield-prefs-{}.json", std::process::id()));
        Preferences { theme: Theme::Light }.save(&path).unwrap();
        assert_eq!(Preferences::load(&path).unwrap().theme, Theme::Light);
        let _ = fs::remove_file(&path);
    }
}
