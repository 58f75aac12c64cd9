use serde::Deserialize;

use crate::error::ConfigError;

pub const DATASET_URL: &str = "https://gist.githubusercontent.com/mbostock/77a98cd519be20ea1f8e33bbd3617ac2/raw/574433e95e983b288a54f4d2217cb39d1557cd8d/mtcars.csv";

/// Everything the view needs to know about its canvas, data source and
/// animation timing. The default reproduces the mtcars plot.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
    pub x_extent: Extent,
    pub y_extent: Extent,
    pub x_title: String,
    pub y_title: String,
    pub dataset_url: String,
    /// Delay between two perturbation steps.
    pub interval_ms: u32,
    /// Half-width of the uniform jitter added to each coordinate.
    pub max_offset: f64,
    pub transition_ms: f64,
    pub marker: MarkerStyle,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 400.0,
            margin: Margin::default(),
            x_extent: Extent::new(0.0, 50.0),
            y_extent: Extent::new(0.0, 400.0),
            x_title: "Miles per gallon".to_owned(),
            y_title: "Horsepower".to_owned(),
            dataset_url: DATASET_URL.to_owned(),
            interval_ms: 1500,
            max_offset: 5.0,
            transition_ms: 500.0,
            marker: MarkerStyle::default(),
        }
    }
}

impl PlotConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let inner_width = self.width - self.margin.left - self.margin.right;
        let inner_height = self.height - self.margin.top - self.margin.bottom;
        if !(inner_width > 0.0 && inner_height > 0.0) {
            return Err(ConfigError::NoDrawableArea {
                width: self.width,
                height: self.height,
            });
        }
        self.x_extent.validate("x")?;
        self.y_extent.validate("y")?;
        if self.interval_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        if !(self.max_offset.is_finite() && self.max_offset >= 0.0) {
            return Err(ConfigError::InvalidOffset(self.max_offset));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 20.0,
            right: 30.0,
            bottom: 30.0,
            left: 40.0,
        }
    }
}

/// Closed interval of data values.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct Extent {
    pub min: f64,
    pub max: f64,
}

impl Extent {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// `min(max(value, min), max)`.
    pub fn clamp(&self, value: f64) -> f64 {
        value.max(self.min).min(self.max)
    }

    fn validate(&self, axis: &'static str) -> Result<(), ConfigError> {
        if self.min.is_finite() && self.max.is_finite() && self.min < self.max {
            Ok(())
        } else {
            Err(ConfigError::InvalidExtent {
                axis,
                min: self.min,
                max: self.max,
            })
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct MarkerStyle {
    pub radius: f64,
    pub stroke: String,
    pub stroke_width: f64,
    pub label_dx: f64,
    pub font_family: String,
    pub font_size: f64,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            radius: 3.0,
            stroke: "steelblue".to_owned(),
            stroke_width: 1.5,
            label_dx: 7.0,
            font_family: "sans-serif".to_owned(),
            font_size: 10.0,
        }
    }
}
