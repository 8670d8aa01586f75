//! The two color representations this crate needs: a point in the CIE 1931 XYZ color space, where
//! light adds up linearly, and its projection onto the xy chromaticity diagram, where distances to
//! the white point are measured.
//!
//! Additive mixing of lights is plain componentwise addition of XYZ values, so [`XYZColor`] supports
//! `+` and scaling by any numeric scalar, but nothing fancier.
//!
//! # Example
//! ```
//! # use complementarity::color::XYZColor;
//! let blue = XYZColor{x: 0.25, y: 0.125, z: 1.5};
//! let yellow = XYZColor{x: 1., y: 0.875, z: 0.};
//! let mixed = blue + yellow;  // the point (1.25, 1, 1.5)
//! let xy = mixed.chromaticity().unwrap();
//! assert!((xy.x - 1.25 / 3.75).abs() <= 1e-10);
//! assert!((xy.y - 1. / 3.75).abs() <= 1e-10);
//! // scaling changes luminance, never chromaticity
//! assert_eq!((mixed * 4u8).chromaticity().unwrap(), xy);
//! ```
//!
//! [`XYZColor`]: struct.XYZColor.html

use std::iter::Sum;
use std::ops::{Add, Mul};

use num::{Num, NumCast, Zero};

use crate::error::{ComplementError, Result};

/// Anything that can scale an [`XYZColor`]: the common numeric types, described with the traits in
/// [`num`]. This has no added functionality of its own.
///
/// [`XYZColor`]: struct.XYZColor.html
pub trait Scalar: NumCast + Num {}

impl<T: NumCast + Num> Scalar for T {}

/// A point in the CIE 1931 XYZ color space. Physical lights always have non-negative components;
/// the type doesn't enforce it, but chromaticity conversion refuses anything that doesn't sum to a
/// positive, finite number.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct XYZColor {
    /// The X tristimulus value: roughly, the response of the long-wavelength cones.
    pub x: f64,
    /// The Y tristimulus value, which is luminance.
    pub y: f64,
    /// The Z tristimulus value: roughly, the response of the short-wavelength cones.
    pub z: f64,
}

/// Additive mixture of two lights. Commutative down to the last bit, because floating-point addition
/// is.
impl Add for XYZColor {
    type Output = XYZColor;
    fn add(self, rhs: XYZColor) -> XYZColor {
        XYZColor {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z,
        }
    }
}

// scalar multiplication only, there is no meaningful product of two colors
impl<U: Scalar> Mul<U> for XYZColor {
    type Output = XYZColor;
    fn mul(self, rhs: U) -> XYZColor {
        // a scalar that doesn't fit in f64 poisons the color, chromaticity() reports it later
        let r = rhs.to_f64().unwrap_or(f64::NAN);
        XYZColor {
            x: self.x * r,
            y: self.y * r,
            z: self.z * r,
        }
    }
}

impl Zero for XYZColor {
    fn zero() -> XYZColor {
        XYZColor { x: 0., y: 0., z: 0. }
    }
    fn is_zero(&self) -> bool {
        self.x == 0. && self.y == 0. && self.z == 0.
    }
}

impl Sum for XYZColor {
    fn sum<I: Iterator<Item = XYZColor>>(iter: I) -> XYZColor {
        iter.fold(XYZColor::zero(), |acc, c| acc + c)
    }
}

impl XYZColor {
    /// Projects the color onto the xy chromaticity diagram by normalizing X and Y by X + Y + Z.
    ///
    /// # Errors
    /// Returns `ComplementError::NumericDegenerate` if X + Y + Z is zero or not finite, since the
    /// projection would otherwise silently produce NaN.
    pub fn chromaticity(&self) -> Result<Chromaticity> {
        let sum = self.x + self.y + self.z;
        if sum == 0. || !sum.is_finite() {
            return Err(ComplementError::NumericDegenerate {
                x: self.x,
                y: self.y,
                z: self.z,
            });
        }
        Ok(Chromaticity {
            x: self.x / sum,
            y: self.y / sum,
        })
    }
}

/// A point on the CIE 1931 xy chromaticity diagram: a color with its luminance thrown away.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Chromaticity {
    /// The share of X in X + Y + Z.
    pub x: f64,
    /// The share of Y in X + Y + Z.
    pub y: f64,
}

impl Chromaticity {
    /// The straight-line distance between two points on the diagram. This is not a perceptual
    /// color difference: the xy diagram is far from uniform, so equal distances in the greens and
    /// the blues look very different. It is, however, exactly the quantity the complementarity map
    /// is defined in terms of.
    /// # Example
    /// ```
    /// # use complementarity::color::Chromaticity;
    /// let white = Chromaticity{x: 0.3, y: 0.3};
    /// let other = Chromaticity{x: 0.6, y: 0.7};
    /// assert!((white.euclidean_distance(&other) - 0.5).abs() <= 1e-10);
    /// ```
    pub fn euclidean_distance(&self, other: &Chromaticity) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// The implied z coordinate, 1 - x - y.
    pub fn z(&self) -> f64 {
        1. - self.x - self.y
    }
}
