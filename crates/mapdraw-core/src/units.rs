//! 距离单位与长度格式化

use crate::geometry::EARTH_RADIUS_METERS;
use serde::{Deserialize, Serialize};

const METERS_PER_KILOMETER: f64 = 1000.0;
const METERS_PER_MILE: f64 = 1609.344;

/// 显示长度时保留的最多小数位
const MAX_FRACTION_DIGITS: usize = 3;

/// 距离单位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DistanceUnits {
    #[default]
    Kilometers,
    Miles,
    /// 不计算长度
    None,
}

impl DistanceUnits {
    pub fn is_enabled(&self) -> bool {
        !matches!(self, DistanceUnits::None)
    }

    /// 单位缩写
    pub fn abbreviation(&self) -> Option<&'static str> {
        match self {
            DistanceUnits::Kilometers => Some("km"),
            DistanceUnits::Miles => Some("mi"),
            DistanceUnits::None => None,
        }
    }

    /// 以该单位表示的地球半径
    pub fn earth_radius(&self) -> f64 {
        match self {
            DistanceUnits::Kilometers => EARTH_RADIUS_METERS / METERS_PER_KILOMETER,
            DistanceUnits::Miles => EARTH_RADIUS_METERS / METERS_PER_MILE,
            DistanceUnits::None => 0.0,
        }
    }

    /// 格式化长度，如 `1,234.568 km`
    pub fn format_length(&self, value: f64) -> String {
        match self.abbreviation() {
            Some(abbr) => format!("{} {}", format_grouped(value), abbr),
            None => format_grouped(value),
        }
    }
}

/// 千位分组、最多三位小数、去掉末尾的零
pub fn format_grouped(value: f64) -> String {
    let fixed = format!("{:.*}", MAX_FRACTION_DIGITS, value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let negative = value < 0.0 && (int_part != "0" || !frac_part.is_empty());
    let sign = if negative { "-" } else { "" };
    if frac_part.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{frac_part}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_grouped() {
        assert_eq!(format_grouped(0.0), "0");
        assert_eq!(format_grouped(0.5), "0.5");
        assert_eq!(format_grouped(111.195_080_2), "111.195");
        assert_eq!(format_grouped(1234.5678), "1,234.568");
        assert_eq!(format_grouped(1_000_000.0), "1,000,000");
        assert_eq!(format_grouped(999.9999), "1,000");
        assert_eq!(format_grouped(-12.5), "-12.5");
    }

    #[test]
    fn test_format_length() {
        assert_eq!(DistanceUnits::Kilometers.format_length(1.2), "1.2 km");
        assert_eq!(DistanceUnits::Miles.format_length(2500.0), "2,500 mi");
        assert_eq!(DistanceUnits::None.format_length(3.0), "3");
    }

    #[test]
    fn test_units_from_config() {
        let units: DistanceUnits = serde_json::from_str("\"miles\"").unwrap();
        assert_eq!(units, DistanceUnits::Miles);
        let units: DistanceUnits = serde_json::from_str("\"none\"").unwrap();
        assert!(!units.is_enabled());
    }
}
