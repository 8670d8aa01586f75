//! This module packages a [`ComplementMap`] for whoever draws it. Drawing itself (color bars, axis
//! ticks, hover text) is the renderer's business; what it gets from here is the matrix, the two
//! wavelength axes, the name of a color scale, and the labels and title to put around them.
//!
//! The same data is also available in long form, one record per cell, which is the shape most
//! plotting and dataframe libraries want, and can be written straight to CSV.
//!
//! [`ComplementMap`]: ../complement/struct.ComplementMap.html

use std::fmt;
use std::io;
use std::str::FromStr;

use crate::complement::ComplementMap;
use crate::error::{ComplementError, Result};

/// The continuous color scales a complementarity heatmap can be drawn with. These are the
/// perceptually uniform scales from `matplotlib`, which every plotting library knows by name.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorScale {
    /// Blue-green-yellow, the usual default.
    Viridis,
    /// Black-purple-orange-white.
    Magma,
    /// Black-purple-red-yellow, like magma with a shift toward red.
    Inferno,
    /// Blue-purple-orange-yellow, without the very dark end.
    Plasma,
    /// Blue-yellow, designed to read the same under color vision deficiency.
    Cividis,
}

/// An array of color scales, in the order of the enum definition.
pub static COLOR_SCALES: [ColorScale; 5] = [
    ColorScale::Viridis,
    ColorScale::Magma,
    ColorScale::Inferno,
    ColorScale::Plasma,
    ColorScale::Cividis,
];

impl Default for ColorScale {
    fn default() -> ColorScale {
        ColorScale::Viridis
    }
}

impl ColorScale {
    /// The name renderers know the scale by.
    pub fn name(&self) -> &'static str {
        match *self {
            ColorScale::Viridis => "Viridis",
            ColorScale::Magma => "Magma",
            ColorScale::Inferno => "Inferno",
            ColorScale::Plasma => "Plasma",
            ColorScale::Cividis => "Cividis",
        }
    }
}

impl fmt::Display for ColorScale {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColorScale {
    type Err = ComplementError;
    /// Case-insensitive, so `"viridis"` works as well as `"Viridis"`.
    fn from_str(s: &str) -> Result<ColorScale> {
        COLOR_SCALES
            .iter()
            .find(|scale| scale.name().eq_ignore_ascii_case(s.trim()))
            .cloned()
            .ok_or_else(|| ComplementError::InvalidConfig(format!("unknown color scale {:?}", s)))
    }
}

/// One cell of the map in long form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LongFormRecord {
    /// The row's wavelength.
    #[serde(rename = "Wavelength 1 (nm)")]
    pub wavelength_1: u32,
    /// The column's wavelength.
    #[serde(rename = "Wavelength 2 (nm)")]
    pub wavelength_2: u32,
    /// The distance of their mixture from white.
    #[serde(rename = "Distance")]
    pub distance: f64,
}

/// Everything a heatmap renderer needs, and nothing it doesn't. Row `i`, column `j` of `z` is the
/// distance for the wavelengths `x[i]` and `x[j]`; `y` holds the same wavelengths in descending
/// order for renderers that draw rows bottom-up, and flipping is left to them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Heatmap {
    /// The plot title.
    pub title: String,
    /// The label of the horizontal axis.
    pub x_label: String,
    /// The label of the vertical axis.
    pub y_label: String,
    /// The label of the color bar.
    pub color_label: String,
    /// The color scale to draw values with.
    pub color_scale: ColorScale,
    /// Wavelengths along the horizontal axis, ascending.
    pub x: Vec<u32>,
    /// Wavelengths along the vertical axis, descending.
    pub y: Vec<u32>,
    /// The distances, row by row.
    pub z: Vec<Vec<f64>>,
}

impl Heatmap {
    /// Packages `map` for drawing with `color_scale`.
    /// # Example
    /// ```
    /// # use complementarity::prelude::*;
    /// let cmfs = ColorMatchingFunctions::cie_1931_2_degree(&SpectralShape::VISIBLE).unwrap();
    /// let map = compute_complement_map(6500., &cmfs).unwrap();
    /// let heatmap = Heatmap::from_map(&map, ColorScale::default());
    /// assert_eq!(heatmap.title, "Complementarity Map at 6500K");
    /// assert_eq!(heatmap.color_scale.name(), "Viridis");
    /// assert_eq!((heatmap.x[0], heatmap.y[0]), (380, 780));
    /// ```
    pub fn from_map(map: &ComplementMap, color_scale: ColorScale) -> Heatmap {
        let x = map.wavelengths();
        let y = x.iter().rev().cloned().collect();
        Heatmap {
            title: format!("Complementarity Map at {}K", map.temperature()),
            x_label: "Wavelength 1 (nm)".to_string(),
            y_label: "Wavelength 2 (nm)".to_string(),
            color_label: "Distance from White".to_string(),
            color_scale,
            x,
            y,
            z: map.rows().map(|r| r.iter().cloned().collect()).collect(),
        }
    }

    /// Every cell as a record, column by column: all rows of the first column, then all rows of the
    /// second, and so on.
    pub fn long_form(&self) -> Vec<LongFormRecord> {
        let mut records = Vec::with_capacity(self.x.len() * self.x.len());
        for (j, &wavelength_2) in self.x.iter().enumerate() {
            for (i, &wavelength_1) in self.x.iter().enumerate() {
                records.push(LongFormRecord {
                    wavelength_1,
                    wavelength_2,
                    distance: self.z[i][j],
                });
            }
        }
        records
    }

    /// Writes the long form as CSV, with a header row.
    /// # Errors
    /// Returns `ComplementError::Csv` if writing fails.
    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<()> {
        let mut writer = csv::Writer::from_writer(writer);
        for record in self.long_form() {
            writer.serialize(record)?;
        }
        writer.flush().map_err(csv::Error::from)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Chromaticity;
    use crate::complement::{ComplementMap, MonochromaticTable};
    use crate::observer::ColorMatchingFunctions;
    use crate::spectrum::SpectralShape;

    fn small_map() -> ComplementMap {
        let shape = SpectralShape::new(450, 600, 50).unwrap();
        let cmfs = ColorMatchingFunctions::cie_1931_2_degree(&shape).unwrap();
        let table = MonochromaticTable::new(&cmfs).unwrap();
        ComplementMap::from_table(5000., Chromaticity { x: 0.3451, y: 0.3516 }, &table).unwrap()
    }

    #[test]
    fn test_axes() {
        let map = small_map();
        let heatmap = Heatmap::from_map(&map, ColorScale::Magma);
        assert_eq!(heatmap.x, vec![450, 500, 550, 600]);
        assert_eq!(heatmap.y, vec![600, 550, 500, 450]);
        assert_eq!(heatmap.z.len(), 4);
        assert_eq!(heatmap.z[1][3], map[(1, 3)]);
        assert_eq!(heatmap.title, "Complementarity Map at 5000K");
        assert_eq!(heatmap.color_label, "Distance from White");
        assert_eq!(heatmap.color_scale.to_string(), "Magma");
    }

    #[test]
    fn test_long_form_order() {
        let map = small_map();
        let records = Heatmap::from_map(&map, ColorScale::Viridis).long_form();
        assert_eq!(records.len(), 16);
        assert_eq!((records[0].wavelength_1, records[0].wavelength_2), (450, 450));
        assert_eq!((records[1].wavelength_1, records[1].wavelength_2), (500, 450));
        assert_eq!((records[4].wavelength_1, records[4].wavelength_2), (450, 500));
        assert_eq!(records[4].distance, map[(0, 1)]);
    }

    #[test]
    fn test_csv() {
        let map = small_map();
        let mut out = vec![];
        Heatmap::from_map(&map, ColorScale::Viridis).write_csv(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("Wavelength 1 (nm),Wavelength 2 (nm),Distance"));
        assert_eq!(lines.clone().count(), 16);
        let first = lines.next().unwrap();
        assert!(first.starts_with("450,450,"));
        // and it reads back
        let mut reader = csv::Reader::from_reader(text.as_bytes());
        let back: Vec<LongFormRecord> = reader.deserialize().collect::<std::result::Result<_, _>>().unwrap();
        assert_eq!(back[5].distance, map[(1, 1)]);
    }

    #[test]
    fn test_color_scale_names() {
        for scale in COLOR_SCALES.iter() {
            assert_eq!(scale.name().parse::<ColorScale>().unwrap(), *scale);
        }
        assert_eq!(" plasma ".parse::<ColorScale>().unwrap(), ColorScale::Plasma);
        assert!("jet".parse::<ColorScale>().is_err());
        assert_eq!(ColorScale::default(), ColorScale::Viridis);
    }
}
