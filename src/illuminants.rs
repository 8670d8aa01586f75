//! This module provides the light sources white points are taken from. The interesting one is the
//! blackbody radiator, whose spectrum is given by Planck's law and whose chromaticity traces the
//! Planckian locus as its temperature rises: from the orange of a candle at 2000 K, through roughly
//! daylight at 6500 K, to a pale blue at 10000 K and beyond. The equal-energy illuminant is the
//! neutral reference the XYZ normalization is defined against.

use tracing::debug;

use crate::color::Chromaticity;
use crate::error::{ComplementError, Result};
use crate::observer::ColorMatchingFunctions;
use crate::spectrum::{SpectralDistribution, SpectralShape};

/// The first radiation constant, 2πhc², in W·m².
pub const C1: f64 = 3.741771852e-16;
/// The second radiation constant, hc/k, in m·K.
pub const C2: f64 = 1.438776877e-2;

/// Spectral radiant exitance of a blackbody at `kelvin`, per nanometer, at `wavelength` nanometers.
/// Far in the cold, short-wavelength corner the exponential overflows and the result is simply 0.
///
/// # Example
/// ```
/// # use complementarity::illuminants::planck_law;
/// // hotter bodies are brighter at every wavelength
/// assert!(planck_law(550., 6500.) > planck_law(550., 3000.));
/// // and their peak moves toward the blue: at 3000 K red outshines blue
/// assert!(planck_law(650., 3000.) > planck_law(450., 3000.));
/// ```
pub fn planck_law(wavelength: f64, kelvin: f64) -> f64 {
    let meters = wavelength * 1e-9;
    C1 / meters.powi(5) / (C2 / (meters * kelvin)).exp_m1() * 1e-9
}

/// A light source with a known spectrum.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Illuminant {
    /// Illuminant E: the same power at every wavelength.
    E,
    /// An ideal thermal radiator at the given temperature in Kelvin.
    Blackbody(f64),
}

impl Illuminant {
    /// A blackbody at `kelvin`, checked for being a physically meaningful temperature.
    /// # Errors
    /// Returns `ComplementError::InvalidTemperature` for zero, negative, or non-finite temperatures.
    pub fn blackbody(kelvin: f64) -> Result<Illuminant> {
        if kelvin > 0. && kelvin.is_finite() {
            Ok(Illuminant::Blackbody(kelvin))
        } else {
            Err(ComplementError::InvalidTemperature { kelvin })
        }
    }

    /// Samples the illuminant's spectrum on `shape`.
    /// # Errors
    /// Returns `ComplementError::InvalidTemperature` for a blackbody that was constructed directly
    /// with a nonsensical temperature.
    pub fn spectral_distribution(&self, shape: SpectralShape) -> Result<SpectralDistribution> {
        match *self {
            Illuminant::E => Ok(SpectralDistribution::constant(shape, 1.)),
            Illuminant::Blackbody(kelvin) => {
                Illuminant::blackbody(kelvin)?;
                Ok(SpectralDistribution::from_fn(shape, |w| planck_law(w, kelvin)))
            }
        }
    }

    /// The chromaticity of the illuminant as seen through `cmfs`.
    /// # Errors
    /// Besides invalid temperatures, returns `ComplementError::NumericDegenerate` when the spectrum
    /// contributes nothing at all, which happens for blackbodies of only a few Kelvin.
    pub fn white_point(&self, cmfs: &ColorMatchingFunctions) -> Result<Chromaticity> {
        let spd = self.spectral_distribution(*cmfs.shape())?;
        cmfs.spectral_to_xyz(&spd)?.chromaticity()
    }
}

/// The chromaticity of a blackbody at `kelvin`: the reference white of the complementarity map.
/// # Errors
/// See [`Illuminant::white_point`](enum.Illuminant.html#method.white_point).
pub fn blackbody_white_point(kelvin: f64, cmfs: &ColorMatchingFunctions) -> Result<Chromaticity> {
    let white = Illuminant::blackbody(kelvin)?.white_point(cmfs)?;
    debug!(kelvin, x = white.x, y = white.y, "blackbody white point");
    Ok(white)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visible() -> ColorMatchingFunctions {
        ColorMatchingFunctions::cie_1931_2_degree(&SpectralShape::VISIBLE).unwrap()
    }

    #[test]
    fn test_planckian_locus() {
        let cmfs = visible();
        // reference values from direct summation of Planck's law over 380-780 nm by 5 nm
        let expected = [
            (2000., 0.52667, 0.41330),
            (6500., 0.31354, 0.32367),
            (10000., 0.28066, 0.28835),
        ];
        for &(kelvin, x, y) in expected.iter() {
            let white = blackbody_white_point(kelvin, &cmfs).unwrap();
            assert!((white.x - x).abs() < 1e-4, "{} K: x = {}", kelvin, white.x);
            assert!((white.y - y).abs() < 1e-4, "{} K: y = {}", kelvin, white.y);
        }
    }

    #[test]
    fn test_locus_moves_toward_blue() {
        let cmfs = visible();
        let xs: Vec<f64> = (2..=10)
            .map(|k| blackbody_white_point(f64::from(k) * 1000., &cmfs).unwrap().x)
            .collect();
        assert!(xs.windows(2).all(|w| w[1] < w[0]), "{:?}", xs);
    }

    #[test]
    fn test_equal_energy() {
        let white = Illuminant::E.white_point(&visible()).unwrap();
        assert!((white.x - 1. / 3.).abs() < 1e-4);
        assert!((white.y - 1. / 3.).abs() < 1e-4);
    }

    #[test]
    fn test_invalid_temperatures() {
        let cmfs = visible();
        for &kelvin in [0., -6500., f64::NAN, f64::INFINITY].iter() {
            match blackbody_white_point(kelvin, &cmfs) {
                Err(ComplementError::InvalidTemperature { .. }) => {}
                other => panic!("{} K should be rejected, got {:?}", kelvin, other),
            }
        }
        // sidestepping the constructor doesn't sidestep the check
        assert!(Illuminant::Blackbody(-1.).white_point(&cmfs).is_err());
    }

    #[test]
    fn test_frozen_blackbody_is_degenerate() {
        // at 1 K every sample underflows to zero
        match blackbody_white_point(1., &visible()) {
            Err(ComplementError::NumericDegenerate { x, y, z }) => assert_eq!((x, y, z), (0., 0., 0.)),
            other => panic!("expected a degenerate error, got {:?}", other),
        }
    }
}
