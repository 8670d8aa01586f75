//! This module builds the complementarity map: for every pair of monochromatic lights on a spectral
//! shape, how far their additive mixture lands from a white point on the chromaticity diagram. Pairs
//! with a small distance are (approximately) complementary wavelengths for that white.
//!
//! The tristimulus values of the single wavelengths are computed once, up front, in a
//! [`MonochromaticTable`]; every cell of the map is then one addition, one projection, and one
//! distance. Nothing is cached between maps: a new temperature means a new map.
//!
//! [`MonochromaticTable`]: struct.MonochromaticTable.html

use std::ops::Index;

use float_cmp::approx_eq;
use na::{DMatrix, RowDVector};
use tracing::debug;

use crate::color::{Chromaticity, XYZColor};
use crate::error::Result;
use crate::illuminants::blackbody_white_point;
use crate::observer::ColorMatchingFunctions;
use crate::spectrum::SpectralShape;

/// The XYZ values of unit-intensity monochromatic light at every sample of a shape. This only
/// depends on the color-matching functions, so one table serves any number of white points.
#[derive(Debug, Clone, PartialEq)]
pub struct MonochromaticTable {
    shape: SpectralShape,
    colors: Vec<XYZColor>,
}

impl MonochromaticTable {
    /// Integrates one impulse per sample of the shape `cmfs` is aligned to.
    /// # Errors
    /// Doesn't fail for any table built by this crate; errors from the integration are passed on.
    pub fn new(cmfs: &ColorMatchingFunctions) -> Result<MonochromaticTable> {
        let shape = *cmfs.shape();
        let colors = (0..shape.len())
            .map(|i| cmfs.wavelength_to_xyz(i))
            .collect::<Result<Vec<XYZColor>>>()?;
        Ok(MonochromaticTable { shape, colors })
    }

    /// The shape the table was computed on.
    pub fn shape(&self) -> &SpectralShape {
        &self.shape
    }

    /// The number of wavelengths.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Whether there are no wavelengths at all, which can't happen for a valid shape.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// The XYZ value of the sample at `index`.
    pub fn get(&self, index: usize) -> Option<XYZColor> {
        self.colors.get(index).cloned()
    }

    /// The additive mixture of the samples `i` and `j`, at unit intensity each.
    pub fn mix(&self, i: usize, j: usize) -> Option<XYZColor> {
        Some(self.get(i)? + self.get(j)?)
    }
}

/// A square matrix of distances from a white point, indexed by pairs of wavelength samples: row `i`
/// and column `j` hold the distance of the mixture of sample `i` and sample `j`. The matrix is
/// symmetric, exactly, so row `i` and column `i` are the same thing.
///
/// # Example
/// ```
/// # use complementarity::prelude::*;
/// let cmfs = ColorMatchingFunctions::cie_1931_2_degree(&SpectralShape::VISIBLE).unwrap();
/// let map = compute_complement_map(6500., &cmfs).unwrap();
/// assert_eq!(map[(3, 70)], map[(70, 3)]);
/// assert!(map.min() >= 0.);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ComplementMap {
    temperature: f64,
    white: Chromaticity,
    shape: SpectralShape,
    distances: DMatrix<f64>,
}

/// Computes the complementarity map for a blackbody white at `temperature` Kelvin, over the shape
/// `cmfs` is aligned to. This is a pure function: the same inputs give the same matrix, bit for bit.
/// # Errors
/// `ComplementError::InvalidTemperature` for non-positive or non-finite temperatures;
/// `ComplementError::NumericDegenerate` if the white point or a mixture has no chromaticity.
pub fn compute_complement_map(
    temperature: f64,
    cmfs: &ColorMatchingFunctions,
) -> Result<ComplementMap> {
    let white = blackbody_white_point(temperature, cmfs)?;
    let table = MonochromaticTable::new(cmfs)?;
    ComplementMap::from_table(temperature, white, &table)
}

impl ComplementMap {
    /// Builds the map from precomputed single-wavelength values and a white point. `temperature` is
    /// only recorded, for labelling.
    /// # Errors
    /// `ComplementError::NumericDegenerate` if some mixture sums to zero, in which case no map is
    /// returned at all.
    pub fn from_table(
        temperature: f64,
        white: Chromaticity,
        table: &MonochromaticTable,
    ) -> Result<ComplementMap> {
        let size = table.len();
        let mut distances = DMatrix::zeros(size, size);
        // each unordered pair once, mirrored into both cells
        for i in 0..size {
            for j in i..size {
                let mixed = table.colors[i] + table.colors[j];
                let distance = mixed.chromaticity()?.euclidean_distance(&white);
                distances[(i, j)] = distance;
                distances[(j, i)] = distance;
            }
        }
        debug!(
            temperature,
            white_x = white.x,
            white_y = white.y,
            size,
            "computed complementarity map"
        );
        Ok(ComplementMap {
            temperature,
            white,
            shape: table.shape,
            distances,
        })
    }

    /// The white point temperature the map was computed for.
    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// The chromaticity every distance is measured from.
    pub fn white_point(&self) -> Chromaticity {
        self.white
    }

    /// The spectral shape of both axes.
    pub fn shape(&self) -> &SpectralShape {
        &self.shape
    }

    /// The number of rows, which is also the number of columns.
    pub fn size(&self) -> usize {
        self.distances.nrows()
    }

    /// The wavelengths of the rows (and columns), ascending.
    pub fn wavelengths(&self) -> Vec<u32> {
        self.shape.wavelengths()
    }

    /// The row (and column) index of `wavelength`, if it is one of the samples.
    pub fn index_of(&self, wavelength: u32) -> Option<usize> {
        self.shape.index_of(wavelength)
    }

    /// The distance for the samples `i` and `j`, if both exist.
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        self.distances.get((i, j)).cloned()
    }

    /// Row `i`: the distances of sample `i` mixed with every sample in turn.
    pub fn row(&self, i: usize) -> Option<RowDVector<f64>> {
        self.distances.row_iter().nth(i).map(|r| r.into_owned())
    }

    /// All rows, in order.
    pub fn rows(&self) -> impl Iterator<Item = RowDVector<f64>> + '_ {
        self.distances.row_iter().map(|r| r.into_owned())
    }

    /// The underlying matrix.
    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.distances
    }

    /// The whole matrix as one slice. The storage is column by column, which for a symmetric
    /// matrix is the same as row by row.
    pub fn as_slice(&self) -> &[f64] {
        self.distances.as_slice()
    }

    /// Consumes the map, keeping only the matrix.
    pub fn into_matrix(self) -> DMatrix<f64> {
        self.distances
    }

    /// The smallest distance anywhere in the map.
    pub fn min(&self) -> f64 {
        self.distances.min()
    }

    /// The largest distance anywhere in the map.
    pub fn max(&self) -> f64 {
        self.distances.max()
    }

    /// The best partner for `wavelength`: the sample whose mixture with it lands closest to white,
    /// and that distance. Ties go to the shorter wavelength. `None` if `wavelength` isn't a sample.
    /// # Example
    /// ```
    /// # use complementarity::prelude::*;
    /// let cmfs = ColorMatchingFunctions::cie_1931_2_degree(&SpectralShape::VISIBLE).unwrap();
    /// let map = compute_complement_map(6500., &cmfs).unwrap();
    /// let (partner, _) = map.closest_complement(580).unwrap();
    /// assert_eq!(partner, 475);
    /// ```
    pub fn closest_complement(&self, wavelength: u32) -> Option<(u32, f64)> {
        let i = self.index_of(wavelength)?;
        // the column is the row
        let (best, distance) = self.distances.column(i).argmin();
        Some((self.shape.wavelength(best)?, distance))
    }

    /// Whether `self[(i, j)]` and `self[(j, i)]` agree to within `ulps` units in the last place for
    /// every pair. Maps built by this crate are symmetric with `ulps = 0`.
    pub fn is_symmetric(&self, ulps: i64) -> bool {
        self.distances
            .iter()
            .zip(self.distances.transpose().iter())
            .all(|(a, b)| approx_eq!(f64, *a, *b, ulps = ulps))
    }
}

impl Index<(usize, usize)> for ComplementMap {
    type Output = f64;
    /// Panics if either index is out of range, like slice indexing.
    fn index(&self, index: (usize, usize)) -> &f64 {
        &self.distances[index]
    }
}
