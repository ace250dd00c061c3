//! Default values and accepted ranges for configuration settings.

use std::ops::RangeInclusive;

/// Default PDF page margin in millimetres
pub const DEFAULT_PDF_MARGIN_MM: i32 = 20;

/// Default PDF body font size in points
pub const DEFAULT_PDF_FONT_SIZE: u8 = 10;

/// Accepted PDF page margins in millimetres
pub const PDF_MARGIN_RANGE: RangeInclusive<i32> = 0..=60;

/// Accepted PDF body font sizes in points
pub const PDF_FONT_SIZE_RANGE: RangeInclusive<u8> = 6..=24;
