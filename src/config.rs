use std::{fs, path::Path};

use serde::Deserialize;

use crate::{GeoflowError, Result};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// store config
    #[serde(default)]
    pub store: StoreConfig,
    /// canvas viewport config
    #[serde(default)]
    pub canvas: CanvasConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoreConfig {
    /// store type
    #[serde(default)]
    pub store_type: StoreType,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StoreType {
    #[default]
    Mem,
}

/// Canvas viewport tuning. Zoom is clamped to [min_zoom, max_zoom].
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CanvasConfig {
    #[serde(default = "default_min_zoom")]
    pub min_zoom: f64,
    #[serde(default = "default_max_zoom")]
    pub max_zoom: f64,
    /// Zoom increment for one wheel/button step.
    #[serde(default = "default_zoom_step")]
    pub zoom_step: f64,
}

fn default_min_zoom() -> f64 {
    0.5
}

fn default_max_zoom() -> f64 {
    2.0
}

fn default_zoom_step() -> f64 {
    0.1
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            min_zoom: default_min_zoom(),
            max_zoom: default_max_zoom(),
            zoom_step: default_zoom_step(),
        }
    }
}

impl CanvasConfig {
    /// Checks that the zoom range is usable. The viewport transform
    /// divides by the zoom factor, so the lower bound must stay above
    /// zero, and the bounds must not be inverted.
    pub fn validate(&self) -> Result<()> {
        if !(self.min_zoom > 0.0) {
            return Err(GeoflowError::Config(format!("min_zoom must be positive, got {}", self.min_zoom)));
        }
        if self.min_zoom > self.max_zoom {
            return Err(GeoflowError::Config(format!("min_zoom {} exceeds max_zoom {}", self.min_zoom, self.max_zoom)));
        }
        Ok(())
    }
}

impl Config {
    pub fn create<T: AsRef<Path>>(path: T) -> Self {
        let data = fs::read_to_string(path.as_ref()).expect(&format!("failed to load config file {:?}", path.as_ref()));

        Self::load_from_str(data.as_str())
    }

    pub fn load_from_str(toml_str: &str) -> Self {
        let config = toml::from_str::<Config>(toml_str).expect("failed to parse the toml str");
        config
    }
}

#[cfg(test)]
mod test {
    use crate::{Config, StoreType};

    #[test]
    fn test_config_deserialize() {
        let toml_str = r#"
        [store]
        store_type = "mem"

        [canvas]
        min_zoom = 0.25
        max_zoom = 4.0
        "#;
        let config = Config::load_from_str(toml_str);
        assert_eq!(config.store.store_type, StoreType::Mem);
        assert_eq!(config.canvas.min_zoom, 0.25);
        assert_eq!(config.canvas.max_zoom, 4.0);
        assert_eq!(config.canvas.zoom_step, 0.1);
    }

    #[test]
    fn test_canvas_config_validate() {
        use crate::CanvasConfig;

        assert!(CanvasConfig::default().validate().is_ok());

        let inverted = CanvasConfig {
            min_zoom: 2.0,
            max_zoom: 0.5,
            zoom_step: 0.1,
        };
        assert!(inverted.validate().is_err());

        let zero_floor = CanvasConfig {
            min_zoom: 0.0,
            max_zoom: 2.0,
            zoom_step: 0.1,
        };
        assert!(zero_floor.validate().is_err());
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::load_from_str("");
        assert_eq!(config.store.store_type, StoreType::Mem);
        assert_eq!(config.canvas.min_zoom, 0.5);
        assert_eq!(config.canvas.max_zoom, 2.0);
    }
}
