//! Units, paper sizes and card presets.
//!
//! Everything downstream works in PDF points (1/72 inch).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SheetError;

pub const POINTS_PER_INCH: f64 = 72.0;
pub const MM_PER_INCH: f64 = 25.4;

/// Inches to points.
#[inline]
pub fn inch(v: f64) -> f64 {
    v * POINTS_PER_INCH
}

/// Millimeters to points.
#[inline]
pub fn mm(v: f64) -> f64 {
    v * POINTS_PER_INCH / MM_PER_INCH
}

/// Points to inches.
#[inline]
pub fn to_inches(pt: f64) -> f64 {
    pt / POINTS_PER_INCH
}

/// A length in points, parsed from `0.5in`, `12.7mm`, `36pt` or a bare
/// number (points).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Length(pub f64);

impl Length {
    pub fn points(self) -> f64 {
        self.0
    }
}

impl FromStr for Length {
    type Err = SheetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (number, scale) = if let Some(n) = trimmed.strip_suffix("in") {
            (n, POINTS_PER_INCH)
        } else if let Some(n) = trimmed.strip_suffix("mm") {
            (n, POINTS_PER_INCH / MM_PER_INCH)
        } else if let Some(n) = trimmed.strip_suffix("pt") {
            (n, 1.0)
        } else {
            (trimmed, 1.0)
        };

        let value: f64 = number
            .trim()
            .parse()
            .map_err(|_| SheetError::invalid_length(s, "expected a number with in, mm or pt"))?;
        if !value.is_finite() {
            return Err(SheetError::invalid_length(s, "must be finite"));
        }
        Ok(Length(value * scale))
    }
}

/// Standard paper sizes, portrait.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaperSize {
    Letter,
    A4,
    Legal,
    Tabloid,
}

impl PaperSize {
    /// `(width, height)` in points.
    pub fn dimensions(self) -> (f64, f64) {
        match self {
            PaperSize::Letter => (inch(8.5), inch(11.0)),
            PaperSize::A4 => (mm(210.0), mm(297.0)),
            PaperSize::Legal => (inch(8.5), inch(14.0)),
            PaperSize::Tabloid => (inch(11.0), inch(17.0)),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PaperSize::Letter => "letter",
            PaperSize::A4 => "a4",
            PaperSize::Legal => "legal",
            PaperSize::Tabloid => "tabloid",
        }
    }
}

impl fmt::Display for PaperSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PaperSize {
    type Err = SheetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "letter" => Ok(PaperSize::Letter),
            "a4" => Ok(PaperSize::A4),
            "legal" => Ok(PaperSize::Legal),
            "tabloid" => Ok(PaperSize::Tabloid),
            other => Err(SheetError::config(format!(
                "unknown paper size {:?} (expected letter, a4, legal or tabloid)",
                other
            ))),
        }
    }
}

/// Common card formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardPreset {
    /// 3.5 × 2 in.
    UsBusiness,
    /// 85 × 55 mm.
    EuBusiness,
    /// 2.25 × 3.5 in.
    Bridge,
    /// 2.5 × 3.5 in.
    Poker,
}

impl CardPreset {
    /// `(width, height)` in points.
    pub fn dimensions(self) -> (f64, f64) {
        match self {
            CardPreset::UsBusiness => (inch(3.5), inch(2.0)),
            CardPreset::EuBusiness => (mm(85.0), mm(55.0)),
            CardPreset::Bridge => (inch(2.25), inch(3.5)),
            CardPreset::Poker => (inch(2.5), inch(3.5)),
        }
    }
}

impl FromStr for CardPreset {
    type Err = SheetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "us_business" | "business" => Ok(CardPreset::UsBusiness),
            "eu_business" => Ok(CardPreset::EuBusiness),
            "bridge" => Ok(CardPreset::Bridge),
            "poker" => Ok(CardPreset::Poker),
            other => Err(SheetError::config(format!(
                "unknown card preset {:?} (expected us-business, eu-business, bridge or poker)",
                other
            ))),
        }
    }
}

/// Margins that center a `rows × columns` grid on the page, as
/// `(top_margin, side_margin)`. Negative when the grid is too big.
pub fn centered_margins(
    page: (f64, f64),
    cell: (f64, f64),
    rows: u32,
    columns: u32,
) -> (f64, f64) {
    let (page_w, page_h) = page;
    let (cell_w, cell_h) = cell;
    let top = (page_h - rows as f64 * cell_h) / 2.0;
    let side = (page_w - columns as f64 * cell_w) / 2.0;
    (top, side)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn conversions() {
        assert_eq!(inch(0.5), 36.0);
        assert_eq!(inch(0.75), 54.0);
        assert!(close(mm(25.4), 72.0));
        assert_eq!(to_inches(252.0), 3.5);
    }

    #[test]
    fn parse_lengths() {
        assert_eq!("0.5in".parse::<Length>().unwrap(), Length(36.0));
        assert_eq!("36pt".parse::<Length>().unwrap(), Length(36.0));
        assert_eq!(" 54 ".parse::<Length>().unwrap(), Length(54.0));
        assert!(close("12.7mm".parse::<Length>().unwrap().points(), 36.0));
        assert!(close("3.5 in".parse::<Length>().unwrap().points(), 252.0));
    }

    #[test]
    fn reject_bad_lengths() {
        assert!(matches!(
            "abc".parse::<Length>(),
            Err(SheetError::InvalidLength { .. })
        ));
        assert!("in".parse::<Length>().is_err());
        assert!("infpt".parse::<Length>().is_err());
    }

    #[test]
    fn paper_sizes() {
        assert_eq!(PaperSize::Letter.dimensions(), (612.0, 792.0));
        assert_eq!(PaperSize::Tabloid.dimensions(), (792.0, 1224.0));
        let (w, h) = PaperSize::A4.dimensions();
        assert!(close(w, 595.275590551181));
        assert!(close(h, 841.8897637795276));
        assert_eq!("A4".parse::<PaperSize>().unwrap(), PaperSize::A4);
        assert!("folio".parse::<PaperSize>().is_err());
    }

    #[test]
    fn card_presets() {
        assert_eq!(CardPreset::UsBusiness.dimensions(), (252.0, 144.0));
        assert_eq!(CardPreset::Poker.dimensions(), (180.0, 252.0));
        assert_eq!("us-business".parse::<CardPreset>().unwrap(), CardPreset::UsBusiness);
        assert_eq!("EU_BUSINESS".parse::<CardPreset>().unwrap(), CardPreset::EuBusiness);
    }

    #[test]
    fn centered_margins_for_default_sheet() {
        let (top, side) = centered_margins((612.0, 792.0), (252.0, 144.0), 5, 2);
        assert_eq!(top, 36.0);
        assert_eq!(side, 54.0);
    }

    #[test]
    fn centered_margins_go_negative_on_overflow() {
        let (top, _) = centered_margins((612.0, 792.0), (252.0, 144.0), 6, 2);
        assert!(top < 0.0);
    }
}
