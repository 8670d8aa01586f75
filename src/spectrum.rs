//! Discretized spectra. A [`SpectralShape`] is an evenly spaced sampling of wavelengths, at whole
//! nanometers; a [`SpectralDistribution`] attaches one value to each of those samples. Every
//! integral in this crate is a sum over one of these shapes.
//!
//! [`SpectralShape`]: struct.SpectralShape.html
//! [`SpectralDistribution`]: struct.SpectralDistribution.html

use std::fmt;

use crate::error::{ComplementError, Result};

/// An evenly spaced, inclusive range of wavelengths in nanometers.
///
/// # Example
/// ```
/// # use complementarity::spectrum::SpectralShape;
/// let shape = SpectralShape::VISIBLE;
/// assert_eq!(shape.len(), 81);
/// assert_eq!(shape.wavelength(0), Some(380));
/// assert_eq!(shape.wavelength(80), Some(780));
/// assert_eq!(shape.index_of(555), Some(35));
/// assert_eq!(shape.index_of(556), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawShape")]
pub struct SpectralShape {
    start: u32,
    end: u32,
    interval: u32,
}

// the unchecked form serde reads before validation
#[derive(Deserialize)]
struct RawShape {
    start: u32,
    end: u32,
    interval: u32,
}

impl std::convert::TryFrom<RawShape> for SpectralShape {
    type Error = ComplementError;
    fn try_from(raw: RawShape) -> Result<SpectralShape> {
        SpectralShape::new(raw.start, raw.end, raw.interval)
    }
}

impl Default for SpectralShape {
    fn default() -> SpectralShape {
        SpectralShape::VISIBLE
    }
}

impl fmt::Display for SpectralShape {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}-{} nm by {} nm", self.start, self.end, self.interval)
    }
}

impl SpectralShape {
    /// The visible spectrum, 380 to 780 nanometers in steps of 5: 81 samples.
    pub const VISIBLE: SpectralShape = SpectralShape {
        start: 380,
        end: 780,
        interval: 5,
    };

    /// Creates a new shape.
    /// # Errors
    /// Returns `ComplementError::InvalidShape` unless `start <= end`, `interval > 0`, and `end` is
    /// reached from `start` in whole steps.
    pub fn new(start: u32, end: u32, interval: u32) -> Result<SpectralShape> {
        if start > end || interval == 0 || (end - start) % interval != 0 {
            Err(ComplementError::InvalidShape {
                start,
                end,
                interval,
            })
        } else {
            Ok(SpectralShape {
                start,
                end,
                interval,
            })
        }
    }

    /// The first wavelength.
    pub fn start(&self) -> u32 {
        self.start
    }

    /// The last wavelength.
    pub fn end(&self) -> u32 {
        self.end
    }

    /// The distance between neighboring samples, which is also the width each sample stands for when
    /// summing.
    pub fn interval(&self) -> u32 {
        self.interval
    }

    /// The number of samples. Never zero.
    pub fn len(&self) -> usize {
        ((self.end - self.start) / self.interval) as usize + 1
    }

    /// Always false, a shape has at least one sample. Here to keep clippy and habits happy.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The wavelength of the sample at `index`, if there is one.
    pub fn wavelength(&self, index: usize) -> Option<u32> {
        if index < self.len() {
            Some(self.start + index as u32 * self.interval)
        } else {
            None
        }
    }

    /// The index of the sample at exactly `wavelength`, if there is one.
    pub fn index_of(&self, wavelength: u32) -> Option<usize> {
        if wavelength < self.start || wavelength > self.end {
            return None;
        }
        let offset = wavelength - self.start;
        if offset % self.interval == 0 {
            Some((offset / self.interval) as usize)
        } else {
            None
        }
    }

    /// All wavelengths in ascending order.
    pub fn wavelengths(&self) -> Vec<u32> {
        (self.start..=self.end).step_by(self.interval as usize).collect()
    }
}

/// A spectral power distribution sampled on a [`SpectralShape`]: one intensity per sample.
///
/// [`SpectralShape`]: struct.SpectralShape.html
#[derive(Debug, Clone, PartialEq)]
pub struct SpectralDistribution {
    shape: SpectralShape,
    values: Vec<f64>,
}

impl SpectralDistribution {
    /// Samples `f`, a function of the wavelength in nanometers, at every wavelength of the shape.
    pub fn from_fn<F: FnMut(f64) -> f64>(shape: SpectralShape, mut f: F) -> SpectralDistribution {
        let values = shape.wavelengths().into_iter().map(|w| f(f64::from(w))).collect();
        SpectralDistribution { shape, values }
    }

    /// The same intensity everywhere.
    pub fn constant(shape: SpectralShape, value: f64) -> SpectralDistribution {
        SpectralDistribution {
            shape,
            values: vec![value; shape.len()],
        }
    }

    /// Monochromatic light: 1 at the sample `index`, 0 everywhere else.
    /// # Errors
    /// Returns `ComplementError::WavelengthOutOfRange` if the shape has no such sample.
    /// # Example
    /// ```
    /// # use complementarity::spectrum::{SpectralDistribution, SpectralShape};
    /// let spd = SpectralDistribution::impulse(SpectralShape::VISIBLE, 2).unwrap();
    /// assert_eq!(spd.value(2), Some(1.));
    /// assert_eq!(spd.value(3), Some(0.));
    /// assert!(SpectralDistribution::impulse(SpectralShape::VISIBLE, 81).is_err());
    /// ```
    pub fn impulse(shape: SpectralShape, index: usize) -> Result<SpectralDistribution> {
        let len = shape.len();
        if index >= len {
            return Err(ComplementError::WavelengthOutOfRange { index, len });
        }
        let mut values = vec![0.; len];
        values[index] = 1.;
        Ok(SpectralDistribution { shape, values })
    }

    /// The shape the distribution is sampled on.
    pub fn shape(&self) -> &SpectralShape {
        &self.shape
    }

    /// The intensities, in wavelength order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// The intensity of the sample at `index`, if there is one.
    pub fn value(&self, index: usize) -> Option<f64> {
        self.values.get(index).cloned()
    }

    /// Pairs of (wavelength, intensity), in wavelength order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.shape
            .wavelengths()
            .into_iter()
            .zip(self.values.iter().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_shape() {
        let wavelengths = SpectralShape::VISIBLE.wavelengths();
        assert_eq!(wavelengths.len(), 81);
        assert_eq!(wavelengths[0], 380);
        assert_eq!(wavelengths[80], 780);
        assert!(wavelengths.windows(2).all(|w| w[1] - w[0] == 5));
        assert_eq!(SpectralShape::default(), SpectralShape::VISIBLE);
        assert_eq!(SpectralShape::VISIBLE.to_string(), "380-780 nm by 5 nm");
    }

    #[test]
    fn test_invalid_shapes() {
        assert!(SpectralShape::new(780, 380, 5).is_err());
        assert!(SpectralShape::new(380, 780, 0).is_err());
        assert!(SpectralShape::new(380, 782, 5).is_err());
        // a single sample is a perfectly fine shape
        let single = SpectralShape::new(555, 555, 5).unwrap();
        assert_eq!(single.len(), 1);
        assert_eq!(single.wavelengths(), vec![555]);
    }

    #[test]
    fn test_indexing() {
        let shape = SpectralShape::new(400, 700, 10).unwrap();
        assert_eq!(shape.len(), 31);
        for (i, w) in shape.wavelengths().into_iter().enumerate() {
            assert_eq!(shape.wavelength(i), Some(w));
            assert_eq!(shape.index_of(w), Some(i));
        }
        assert_eq!(shape.wavelength(31), None);
        assert_eq!(shape.index_of(395), None);
        assert_eq!(shape.index_of(710), None);
        assert_eq!(shape.index_of(405), None);
    }

    #[test]
    fn test_distributions() {
        let shape = SpectralShape::new(400, 420, 10).unwrap();
        let spd = SpectralDistribution::from_fn(shape, |w| w / 100.);
        assert_eq!(spd.values(), &[4., 4.1, 4.2][..]);
        let pairs: Vec<(u32, f64)> = spd.iter().collect();
        assert_eq!(pairs, vec![(400, 4.), (410, 4.1), (420, 4.2)]);
        let flat = SpectralDistribution::constant(shape, 2.);
        assert_eq!(flat.values(), &[2., 2., 2.][..]);
        match SpectralDistribution::impulse(shape, 3) {
            Err(ComplementError::WavelengthOutOfRange { index, len }) => {
                assert_eq!((index, len), (3, 3));
            }
            other => panic!("expected an out-of-range error, got {:?}", other),
        }
    }
}
