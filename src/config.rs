//! Settings for whatever interactive shell drives the computation: the temperatures its control
//! offers, the spectral sampling, and the color scale of the heatmap. Every field has a default, so
//! an empty mapping is a complete configuration.
//!
//! ```yaml
//! temperature:
//!   min: 2000
//!   max: 10000
//!   step: 100
//!   default: 6500
//! shape:
//!   start: 380
//!   end: 780
//!   interval: 5
//! color_scale: Viridis
//! ```

use num::Zero;
use tracing::info;

use crate::complement::{compute_complement_map, MonochromaticTable};
use crate::error::{ComplementError, Result};
use crate::heatmap::{ColorScale, Heatmap};
use crate::observer::ColorMatchingFunctions;
use crate::spectrum::SpectralShape;

/// The temperatures a slider (or any other control) can produce, in Kelvin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemperatureRange {
    /// The coldest (reddest) white offered.
    pub min: u32,
    /// The hottest (bluest) white offered.
    pub max: u32,
    /// The distance between neighboring positions.
    pub step: u32,
    /// The starting position.
    pub default: u32,
}

impl Default for TemperatureRange {
    fn default() -> TemperatureRange {
        TemperatureRange {
            min: 2000,
            max: 10000,
            step: 100,
            default: 6500,
        }
    }
}

impl TemperatureRange {
    /// Whether `kelvin` lies within the range, regardless of the step.
    pub fn contains(&self, kelvin: f64) -> bool {
        f64::from(self.min) <= kelvin && kelvin <= f64::from(self.max)
    }

    /// The position closest to `kelvin`: clamped into the range, then rounded to the nearest step
    /// counted from `min`. NaN has no closest position and snaps to the default.
    /// # Example
    /// ```
    /// # use complementarity::config::TemperatureRange;
    /// let range = TemperatureRange::default();
    /// assert_eq!(range.snap(6449.), 6400);
    /// assert_eq!(range.snap(6450.), 6500);
    /// assert_eq!(range.snap(150.), 2000);
    /// assert_eq!(range.snap(1e9), 10000);
    /// ```
    pub fn snap(&self, kelvin: f64) -> u32 {
        if kelvin.is_nan() {
            return self.default;
        }
        let (min, max) = (f64::from(self.min), f64::from(self.max));
        let clamped = kelvin.max(min).min(max);
        let steps = ((clamped - min) / f64::from(self.step)).round();
        // u64 so that a step rounded up near u32::MAX can't overflow
        let snapped = u64::from(self.min) + steps as u64 * u64::from(self.step);
        // rounding up past a max that is off the grid stops at max
        snapped.min(u64::from(self.max)) as u32
    }

    /// Every position, from `min` upward, ending at the last one not past `max`.
    pub fn positions(&self) -> Vec<u32> {
        (self.min..=self.max).step_by(self.step.max(1) as usize).collect()
    }

    fn validate(&self) -> Result<()> {
        if self.min == 0 {
            Err(ComplementError::InvalidConfig("temperature range must start above 0 K".to_string()))
        } else if self.min > self.max {
            Err(ComplementError::InvalidConfig(format!(
                "temperature range is empty: {} K > {} K",
                self.min, self.max
            )))
        } else if self.step == 0 {
            Err(ComplementError::InvalidConfig("temperature step must be positive".to_string()))
        } else if self.default < self.min || self.default > self.max {
            Err(ComplementError::InvalidConfig(format!(
                "default temperature {} K is outside {}-{} K",
                self.default, self.min, self.max
            )))
        } else {
            Ok(())
        }
    }
}

/// The complete configuration of an explorer session.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    /// The temperatures on offer.
    pub temperature: TemperatureRange,
    /// The wavelengths along both axes of the map.
    pub shape: SpectralShape,
    /// The color scale handed to the renderer.
    pub color_scale: ColorScale,
}

impl ExplorerConfig {
    /// Parses and validates a YAML configuration. Missing fields take their defaults.
    /// # Errors
    /// `ComplementError::Config` for text that doesn't parse (including malformed spectral shapes),
    /// `ComplementError::InvalidConfig` for settings that parse but contradict each other.
    pub fn from_yaml(text: &str) -> Result<ExplorerConfig> {
        let config: ExplorerConfig = serde_yaml::from_str(text)?;
        config.validate()?;
        info!(
            min = config.temperature.min,
            max = config.temperature.max,
            shape = %config.shape,
            color_scale = %config.color_scale,
            "loaded explorer configuration"
        );
        Ok(config)
    }

    /// Checks that the temperature range is usable and that the observer sees every wavelength of
    /// the shape. A wavelength with all-zero color-matching functions has no chromaticity when mixed
    /// with itself, so no map could ever be computed.
    /// # Errors
    /// `ComplementError::InvalidConfig` describing the first problem found, or
    /// `ComplementError::NoColorMatchingData` if the shape misses the bundled data entirely.
    pub fn validate(&self) -> Result<()> {
        self.temperature.validate()?;
        let table = MonochromaticTable::new(&self.color_matching_functions()?)?;
        let blind = self
            .shape
            .wavelengths()
            .into_iter()
            .enumerate()
            .find(|&(i, _)| table.get(i).map_or(true, |xyz| xyz.is_zero()));
        match blind {
            Some((_, wavelength)) => Err(ComplementError::InvalidConfig(format!(
                "no color-matching data at {} nm in {}",
                wavelength, self.shape
            ))),
            None => Ok(()),
        }
    }

    /// The bundled standard observer, aligned to the configured shape. Build this once per session.
    /// # Errors
    /// See [`ColorMatchingFunctions::cie_1931_2_degree`](../observer/struct.ColorMatchingFunctions.html#method.cie_1931_2_degree).
    pub fn color_matching_functions(&self) -> Result<ColorMatchingFunctions> {
        ColorMatchingFunctions::cie_1931_2_degree(&self.shape)
    }

    /// One full round of the shell: a temperature from the control in, a heatmap for the renderer
    /// out.
    /// # Errors
    /// `ComplementError::InvalidTemperature` if `kelvin` is outside the configured range, and
    /// anything [`compute_complement_map`](../complement/fn.compute_complement_map.html) reports.
    pub fn heatmap_for(&self, kelvin: f64, cmfs: &ColorMatchingFunctions) -> Result<Heatmap> {
        if !self.temperature.contains(kelvin) {
            return Err(ComplementError::InvalidTemperature { kelvin });
        }
        let map = compute_complement_map(kelvin, cmfs)?;
        Ok(Heatmap::from_map(&map, self.color_scale))
    }
}
