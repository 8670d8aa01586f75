//! Everything needed to go from a temperature to a heatmap, in one import.

pub use crate::color::{Chromaticity, XYZColor};
pub use crate::complement::{compute_complement_map, ComplementMap, MonochromaticTable};
pub use crate::config::{ExplorerConfig, TemperatureRange};
pub use crate::error::{ComplementError, Result};
pub use crate::heatmap::{ColorScale, Heatmap, LongFormRecord};
pub use crate::illuminants::Illuminant;
pub use crate::observer::ColorMatchingFunctions;
pub use crate::spectrum::{SpectralDistribution, SpectralShape};
