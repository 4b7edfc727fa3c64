//! Startup configuration
//!
//! Fixed for the lifetime of a session. Never persisted.

use serde::{Deserialize, Serialize};

use crate::error::{MazeError, Result};

/// Maze and viewport configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Grid columns (cells horizontally)
    pub cols: usize,
    /// Grid rows (cells vertically)
    pub rows: usize,
    /// Interior wall thickness in pixels
    pub wall_thickness: f32,

    // === Viewport ===
    pub viewport_width: f32,
    pub viewport_height: f32,

    /// Fixed maze seed; a fresh one is drawn when absent
    pub seed: Option<u64>,
    /// Release the walls under gravity once the goal is reached
    pub collapse_on_win: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            cols: 12,
            rows: 10,
            wall_thickness: 3.0,

            viewport_width: 1200.0,
            viewport_height: 1000.0,

            seed: None,
            collapse_on_win: true,
        }
    }
}

impl Settings {
    /// Same settings, resized to the given viewport
    pub fn with_viewport(mut self, width: f32, height: f32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    pub fn cell_width(&self) -> f32 {
        self.viewport_width / self.cols as f32
    }

    pub fn cell_height(&self) -> f32 {
        self.viewport_height / self.rows as f32
    }

    /// Reject settings that cannot produce a maze
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(MazeError::InvalidDimensions {
                rows: self.rows,
                cols: self.cols,
            });
        }
        for (name, value) in [
            ("wall_thickness", self.wall_thickness),
            ("viewport_width", self.viewport_width),
            ("viewport_height", self.viewport_height),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(MazeError::InvalidConfig(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Parse and validate a JSON settings document; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings =
            serde_json::from_str(json).map_err(|e| MazeError::InvalidConfig(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Optional inline JSON (for instance a `data-settings` attribute), falling
    /// back to defaults when absent or invalid
    pub fn from_json_or_default(json: Option<&str>) -> Self {
        let Some(json) = json.filter(|j| !j.trim().is_empty()) else {
            return Self::default();
        };
        match Self::from_json(json) {
            Ok(settings) => {
                log::info!("Loaded settings: {}x{} maze", settings.rows, settings.cols);
                settings
            }
            Err(e) => {
                log::warn!("Ignoring settings: {}", e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!((s.rows, s.cols), (10, 12));
        assert_eq!(s.cell_width(), 100.0);
        assert_eq!(s.cell_height(), 100.0);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let s = Settings::from_json(r#"{"rows": 4, "seed": 7}"#).unwrap();
        assert_eq!(s.rows, 4);
        assert_eq!(s.cols, 12);
        assert_eq!(s.seed, Some(7));
        assert!(s.collapse_on_win);
    }

    #[test]
    fn test_invalid_settings() {
        assert_eq!(
            Settings::from_json(r#"{"cols": 0}"#),
            Err(MazeError::InvalidDimensions { rows: 10, cols: 0 })
        );
        assert!(matches!(
            Settings::from_json(r#"{"wall_thickness": -1.0}"#),
            Err(MazeError::InvalidConfig(_))
        ));
        assert!(matches!(
            Settings::from_json("not json"),
            Err(MazeError::InvalidConfig(_))
        ));
        let tiny = Settings::default().with_viewport(0.0, 600.0);
        assert!(tiny.validate().is_err());
    }

    #[test]
    fn test_inline_settings_fall_back_to_defaults() {
        assert_eq!(Settings::from_json_or_default(None), Settings::default());
        assert_eq!(Settings::from_json_or_default(Some("  ")), Settings::default());
        assert_eq!(Settings::from_json_or_default(Some(r#"{"rows": 0}"#)), Settings::default());
        assert_eq!(Settings::from_json_or_default(Some("{oops")), Settings::default());

        let s = Settings::from_json_or_default(Some(r#"{"cols": 5, "collapse_on_win": false}"#));
        assert_eq!(s.cols, 5);
        assert!(!s.collapse_on_win);
    }
}
