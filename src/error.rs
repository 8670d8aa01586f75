//! The one error type of this crate. Everything here is a pure computation, so nothing is retried:
//! an error means the inputs were wrong, or the bundled data was, and no partial result exists.

use thiserror::Error;

use crate::spectrum::SpectralShape;

/// Everything that can go wrong between a temperature and a complementarity matrix.
#[derive(Debug, Error)]
pub enum ComplementError {
    /// A blackbody needs a positive, finite temperature.
    #[error("invalid color temperature: {kelvin} K")]
    InvalidTemperature {
        /// The rejected temperature.
        kelvin: f64,
    },

    /// Chromaticity is undefined when X + Y + Z is zero (or not a number at all).
    #[error("cannot compute chromaticity of XYZ ({x}, {y}, {z})")]
    NumericDegenerate {
        /// The X tristimulus value.
        x: f64,
        /// The Y tristimulus value.
        y: f64,
        /// The Z tristimulus value.
        z: f64,
    },

    /// A wavelength sampling that does not describe an evenly spaced, non-empty range.
    #[error("invalid spectral shape: {start}..={end} nm by {interval} nm")]
    InvalidShape {
        /// First wavelength, in nanometers.
        start: u32,
        /// Last wavelength, in nanometers.
        end: u32,
        /// Distance between samples, in nanometers.
        interval: u32,
    },

    /// A sample index past the end of the spectral shape.
    #[error("wavelength index {index} out of range for {len} samples")]
    WavelengthOutOfRange {
        /// The requested index.
        index: usize,
        /// The number of samples.
        len: usize,
    },

    /// Reading color-matching data, or writing a heatmap, as CSV failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The color-matching data bundled with the crate is corrupt.
    #[error("bundled color-matching data is corrupt: {0}")]
    BundledData(String),

    /// No row of the color-matching dataset falls within the requested wavelengths.
    #[error("color-matching data has no samples within {0}")]
    NoColorMatchingData(SpectralShape),

    /// A spectrum sampled on one shape was integrated against a table aligned to another.
    #[error("spectrum sampled on {found} but color-matching functions aligned to {expected}")]
    ShapeMismatch {
        /// The shape of the color-matching functions.
        expected: SpectralShape,
        /// The shape of the spectrum.
        found: SpectralShape,
    },

    /// The configuration text is not valid YAML for an `ExplorerConfig`.
    #[error("configuration could not be parsed: {0}")]
    Config(#[from] serde_yaml::Error),

    /// The configuration parsed, but does not make sense.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Shorthand used throughout the crate.
pub type Result<T> = std::result::Result<T, ComplementError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = ComplementError::InvalidTemperature { kelvin: -5. };
        assert_eq!(err.to_string(), "invalid color temperature: -5 K");
        let err = ComplementError::WavelengthOutOfRange { index: 81, len: 81 };
        assert_eq!(err.to_string(), "wavelength index 81 out of range for 81 samples");
        let err = ComplementError::InvalidShape { start: 780, end: 380, interval: 5 };
        assert_eq!(err.to_string(), "invalid spectral shape: 780..=380 nm by 5 nm");
    }
}
