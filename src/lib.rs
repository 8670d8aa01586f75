//! Complementarity answers a small question from color-mixing theory: given a white point somewhere
//! on the Planckian locus, which pairs of monochromatic wavelengths add up to something close to
//! it? Every wavelength of the visible spectrum is turned into CIE 1931 tristimulus values, every
//! pair of those is mixed additively, and the chromaticity of each mixture is compared against the
//! chromaticity of a blackbody radiator at the requested temperature. The result is a square
//! matrix of distances that is meant to be drawn as a heatmap by whatever shell hosts the library.
//!
//! The crate does no drawing of its own. It hands the renderer a [`Heatmap`]: the matrix, the two
//! wavelength axes, a color scale name and a title.
//!
//! # Example
//! ```
//! use complementarity::prelude::*;
//!
//! let cmfs = ColorMatchingFunctions::cie_1931_2_degree(&SpectralShape::VISIBLE).unwrap();
//! let map = compute_complement_map(6500., &cmfs).unwrap();
//! assert_eq!(map.size(), 81);
//! // yellow finds its partner in the blue; mixed with itself it stays yellow
//! let (complement, distance) = map.closest_complement(580).unwrap();
//! assert_eq!(complement, 475);
//! let yellow = map.index_of(580).unwrap();
//! assert!(distance < map[(yellow, yellow)]);
//! ```
//!
//! [`Heatmap`]: heatmap/struct.Heatmap.html

#![doc(html_root_url = "https://docs.rs/complementarity/0.1.0")]
#![deny(missing_docs)]
// CIE tables and physical constants are long decimals, separators would not help
#![allow(clippy::unreadable_literal)]

extern crate csv;
extern crate float_cmp;
#[macro_use]
extern crate lazy_static;
extern crate nalgebra as na;
extern crate num;
extern crate serde;
#[macro_use]
extern crate serde_derive;
extern crate serde_yaml;
extern crate thiserror;
extern crate tracing;

pub mod color;
pub mod complement;
pub mod config;
pub mod error;
pub mod heatmap;
pub mod illuminants;
pub mod observer;
pub mod prelude;
pub mod spectrum;

pub use complement::compute_complement_map;
pub use error::{ComplementError, Result};
