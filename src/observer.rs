//! The CIE 1931 2° standard observer: the three color-matching functions x̄, ȳ and z̄ that turn a
//! spectrum into XYZ tristimulus values.
//!
//! The data ships with the crate as a CSV file (CIE 1931 2°, 360 to 830 nm in 5 nm steps, as
//! published by the CVRL) and is parsed at most once per process. A [`ColorMatchingFunctions`]
//! value is that data *aligned* to one [`SpectralShape`]: restricted to its wavelengths, linearly
//! interpolated where a sample falls between two rows, and zero wherever the dataset has nothing to
//! say. Build one at startup and pass it by reference; it never changes afterwards.
//!
//! Integration is a plain sum over the samples, each weighted by the sampling interval, and scaled so
//! that an equal-energy spectrum has a luminance of exactly 100.
//!
//! [`ColorMatchingFunctions`]: struct.ColorMatchingFunctions.html
//! [`SpectralShape`]: ../spectrum/struct.SpectralShape.html

use std::io;

use tracing::{debug, trace};

use crate::color::XYZColor;
use crate::error::{ComplementError, Result};
use crate::spectrum::{SpectralDistribution, SpectralShape};

const CIE_1931_2_DEGREE_CSV: &str = include_str!("../data/cie-1931-standard-matching.csv");

#[derive(Debug, Clone, Copy, Deserialize)]
struct Record {
    wavelength: u32,
    xbar: f64,
    ybar: f64,
    zbar: f64,
}

lazy_static! {
    // the bundled file is ours, so it's parsed once and the error (if any) kept as text
    static ref CIE_1931_2_DEGREE: std::result::Result<Vec<Record>, String> =
        read_records(CIE_1931_2_DEGREE_CSV.as_bytes()).map_err(|e| e.to_string());
}

fn read_records<R: io::Read>(reader: R) -> std::result::Result<Vec<Record>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut records = vec![];
    for result in reader.deserialize() {
        let record: Record = result?;
        records.push(record);
    }
    records.sort_by_key(|r| r.wavelength);
    Ok(records)
}

// linear interpolation between the two rows around `wavelength`, zero outside the data
fn sample(records: &[Record], wavelength: u32) -> XYZColor {
    let idx = match records.binary_search_by_key(&wavelength, |r| r.wavelength) {
        Ok(i) => {
            let r = records[i];
            return XYZColor {
                x: r.xbar,
                y: r.ybar,
                z: r.zbar,
            };
        }
        Err(i) => i,
    };
    if idx == 0 || idx == records.len() {
        return XYZColor::default();
    }
    let (lo, hi) = (records[idx - 1], records[idx]);
    let t = f64::from(wavelength - lo.wavelength) / f64::from(hi.wavelength - lo.wavelength);
    XYZColor {
        x: lo.xbar + t * (hi.xbar - lo.xbar),
        y: lo.ybar + t * (hi.ybar - lo.ybar),
        z: lo.zbar + t * (hi.zbar - lo.zbar),
    }
}

/// Color-matching functions aligned to a spectral shape, plus the normalization that comes with
/// them.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorMatchingFunctions {
    shape: SpectralShape,
    // (x̄, ȳ, z̄) per sample
    values: Vec<XYZColor>,
    normalization: f64,
}

impl ColorMatchingFunctions {
    /// The bundled CIE 1931 2° standard observer, aligned to `shape`.
    /// # Errors
    /// Fails if the bundled data is unreadable, which would be a packaging bug, or if `shape` lies
    /// entirely outside of 360-830 nm.
    /// # Example
    /// ```
    /// # use complementarity::observer::ColorMatchingFunctions;
    /// # use complementarity::spectrum::SpectralShape;
    /// let cmfs = ColorMatchingFunctions::cie_1931_2_degree(&SpectralShape::VISIBLE).unwrap();
    /// let peak = cmfs.at(35).unwrap(); // 555 nm
    /// assert_eq!(peak.y, 1.);
    /// ```
    pub fn cie_1931_2_degree(shape: &SpectralShape) -> Result<ColorMatchingFunctions> {
        match *CIE_1931_2_DEGREE {
            Ok(ref records) => ColorMatchingFunctions::from_records(records, shape),
            Err(ref msg) => Err(ComplementError::BundledData(msg.clone())),
        }
    }

    /// Reads a CSV dataset with the columns `wavelength`, `xbar`, `ybar` and `zbar` (wavelengths in
    /// whole nanometers, in any order) and aligns it to `shape`.
    /// # Errors
    /// `ComplementError::Csv` for malformed CSV, `ComplementError::NoColorMatchingData` if no
    /// row contributes to `shape`.
    pub fn from_reader<R: io::Read>(
        reader: R,
        shape: &SpectralShape,
    ) -> Result<ColorMatchingFunctions> {
        let records = read_records(reader)?;
        ColorMatchingFunctions::from_records(&records, shape)
    }

    fn from_records(records: &[Record], shape: &SpectralShape) -> Result<ColorMatchingFunctions> {
        let values: Vec<XYZColor> = shape
            .wavelengths()
            .into_iter()
            .map(|w| sample(records, w))
            .collect();
        let luminance: f64 = values.iter().map(|c| c.y).sum::<f64>() * f64::from(shape.interval());
        if luminance <= 0. || luminance.is_nan() {
            return Err(ComplementError::NoColorMatchingData(*shape));
        }
        debug!(
            rows = records.len(),
            shape = %shape,
            "aligned color-matching functions"
        );
        Ok(ColorMatchingFunctions {
            shape: *shape,
            values,
            normalization: 100. / luminance,
        })
    }

    /// The shape this table is aligned to.
    pub fn shape(&self) -> &SpectralShape {
        &self.shape
    }

    /// The raw (x̄, ȳ, z̄) weights of the sample at `index`, packed as an XYZ triple.
    pub fn at(&self, index: usize) -> Option<XYZColor> {
        self.values.get(index).cloned()
    }

    /// The factor every integrated XYZ value is multiplied by: 100 over the integral of ȳ.
    pub fn normalization(&self) -> f64 {
        self.normalization
    }

    /// Integrates a spectral power distribution against the color-matching functions.
    /// # Errors
    /// Returns `ComplementError::ShapeMismatch` if the distribution was sampled on a different shape.
    pub fn spectral_to_xyz(&self, spd: &SpectralDistribution) -> Result<XYZColor> {
        if *spd.shape() != self.shape {
            return Err(ComplementError::ShapeMismatch {
                expected: self.shape,
                found: *spd.shape(),
            });
        }
        let total: XYZColor = self
            .values
            .iter()
            .zip(spd.values())
            .map(|(cmf, &s)| *cmf * s)
            .sum();
        Ok(total * (self.normalization * f64::from(self.shape.interval())))
    }

    /// XYZ of monochromatic light of unit intensity at the sample `index`.
    /// # Errors
    /// Returns `ComplementError::WavelengthOutOfRange` if there is no such sample.
    pub fn wavelength_to_xyz(&self, index: usize) -> Result<XYZColor> {
        let impulse = SpectralDistribution::impulse(self.shape, index)?;
        let xyz = self.spectral_to_xyz(&impulse)?;
        trace!(index, x = xyz.x, y = xyz.y, z = xyz.z, "monochromatic tristimulus");
        Ok(xyz)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    fn visible() -> ColorMatchingFunctions {
        ColorMatchingFunctions::cie_1931_2_degree(&SpectralShape::VISIBLE).unwrap()
    }

    #[test]
    fn test_bundled_data() {
        let records = CIE_1931_2_DEGREE.as_ref().unwrap();
        assert_eq!(records.len(), 95);
        assert_eq!(records[0].wavelength, 360);
        assert_eq!(records[94].wavelength, 830);
        assert!(records.iter().all(|r| r.xbar >= 0. && r.ybar >= 0. && r.zbar >= 0.));
    }

    #[test]
    fn test_alignment_restricts() {
        let cmfs = visible();
        assert_eq!(cmfs.shape(), &SpectralShape::VISIBLE);
        let first = cmfs.at(0).unwrap();
        assert_eq!(first, XYZColor { x: 0.001368, y: 0.000039, z: 0.006450001 });
        let last = cmfs.at(80).unwrap();
        assert_eq!(last, XYZColor { x: 0.00004150994, y: 0.00001499, z: 0. });
        assert_eq!(cmfs.at(81), None);
    }

    #[test]
    fn test_alignment_interpolates() {
        // 362 nm sits 2/5 of the way from 360 nm to 365 nm; 350 nm is before the data starts
        let shape = SpectralShape::new(350, 372, 2).unwrap();
        let cmfs = ColorMatchingFunctions::cie_1931_2_degree(&shape).unwrap();
        assert_eq!(cmfs.at(0).unwrap(), XYZColor::default());
        let at_362 = cmfs.at(6).unwrap();
        assert!(approx_eq!(f64, at_362.x, 0.0001299 + 0.4 * (0.0002321 - 0.0001299), epsilon = 1e-15));
        assert!(approx_eq!(f64, at_362.z, 0.0006061 + 0.4 * (0.001086 - 0.0006061), epsilon = 1e-15));
    }

    #[test]
    fn test_no_overlap() {
        let shape = SpectralShape::new(900, 1000, 10).unwrap();
        match ColorMatchingFunctions::cie_1931_2_degree(&shape) {
            Err(ComplementError::NoColorMatchingData(s)) => assert_eq!(s, shape),
            other => panic!("expected missing data, got {:?}", other),
        }
    }

    #[test]
    fn test_equal_energy_is_normalized() {
        let cmfs = visible();
        let flat = SpectralDistribution::constant(SpectralShape::VISIBLE, 1.);
        let xyz = cmfs.spectral_to_xyz(&flat).unwrap();
        assert!(approx_eq!(f64, xyz.y, 100., epsilon = 1e-9));
        let xy = xyz.chromaticity().unwrap();
        assert!((xy.x - 1. / 3.).abs() < 1e-4);
        assert!((xy.y - 1. / 3.).abs() < 1e-4);
    }

    #[test]
    fn test_monochromatic() {
        let cmfs = visible();
        let green = cmfs.wavelength_to_xyz(35).unwrap();
        // ȳ(555 nm) is exactly 1
        assert!(approx_eq!(f64, green.y, 5. * cmfs.normalization(), epsilon = 1e-12));
        let xy = green.chromaticity().unwrap();
        assert!((xy.x - 0.3374).abs() < 1e-3);
        assert!((xy.y - 0.6589).abs() < 1e-3);
        assert!(cmfs.wavelength_to_xyz(81).is_err());
    }

    #[test]
    fn test_shape_mismatch() {
        let cmfs = visible();
        let other = SpectralShape::new(400, 700, 10).unwrap();
        let spd = SpectralDistribution::constant(other, 1.);
        assert!(cmfs.spectral_to_xyz(&spd).is_err());
    }

    #[test]
    fn test_custom_reader() {
        let data = "wavelength,xbar,ybar,zbar\n510,0.5,1.0,0.0\n500,0.25,0.5,1.0\n";
        let shape = SpectralShape::new(500, 510, 5).unwrap();
        let cmfs = ColorMatchingFunctions::from_reader(data.as_bytes(), &shape).unwrap();
        assert_eq!(cmfs.at(1).unwrap(), XYZColor { x: 0.375, y: 0.75, z: 0.5 });
        assert!(approx_eq!(f64, cmfs.normalization(), 100. / (2.25 * 5.), ulps = 2));
        let broken = "wavelength,xbar,ybar,zbar\n500,oops,0.5,1.0\n";
        match ColorMatchingFunctions::from_reader(broken.as_bytes(), &shape) {
            Err(ComplementError::Csv(_)) => {}
            other => panic!("expected a CSV error, got {:?}", other),
        }
    }
}
