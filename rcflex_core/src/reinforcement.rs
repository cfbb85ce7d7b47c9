//! # Reinforcement
//!
//! A [`ReinforcementRecord`] is one bar group as the force evaluator sees
//! it: a depth measured from the compression-extreme fiber and a total
//! steel area. Several records may share a depth.
//!
//! Designers usually think in bars rather than areas, so [`RebarGroup`]
//! (depth, bar diameter, bar count) resolves into a record.
//!
//! ## Example
//!
//! ```rust
//! use rcflex_core::reinforcement::{resolve_rebar_groups, RebarGroup};
//!
//! let groups = vec![
//!     RebarGroup::new(58.0, 16.0, 2),
//!     RebarGroup::new(342.0, 16.0, 3),
//! ];
//! let records = resolve_rebar_groups(&groups).unwrap();
//! assert_eq!(records.len(), 2);
//! assert!((records[1].area - 603.19).abs() < 0.01);
//! ```

use std::f64::consts::PI;
use std::fmt::Write;

use serde::{Deserialize, Serialize};

use crate::errors::{require_positive, CalcError, CalcResult};

/// One group of reinforcement at a single depth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReinforcementRecord {
    /// Depth from the compression-extreme fiber (mm)
    pub depth: f64,

    /// Total steel area of the group (mm²)
    pub area: f64,
}

impl ReinforcementRecord {
    pub fn new(depth: f64, area: f64) -> Self {
        ReinforcementRecord { depth, area }
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("depth", self.depth)?;
        require_positive("area", self.area)?;
        Ok(())
    }
}

/// Validate a whole reinforcement layout. An empty layout is rejected.
pub fn validate_records(records: &[ReinforcementRecord]) -> CalcResult<()> {
    if records.is_empty() {
        return Err(CalcError::invalid_input(
            "reinforcement",
            "[]",
            "At least one reinforcement record is required",
        ));
    }
    for (i, record) in records.iter().enumerate() {
        record.validate().map_err(|e| match e {
            CalcError::InvalidInput { field, value, reason } => CalcError::InvalidInput {
                field: format!("reinforcement[{}].{}", i, field),
                value,
                reason,
            },
            other => other,
        })?;
    }
    Ok(())
}

/// Deepest reinforcement depth, i.e. the extreme tension layer.
pub fn deepest_depth(records: &[ReinforcementRecord]) -> Option<f64> {
    records.iter().map(|r| r.depth).reduce(f64::max)
}

/// Area of one round bar of the given diameter: π/4 · d²
pub fn bar_area(diameter: f64) -> CalcResult<f64> {
    require_positive("diameter", diameter)?;
    Ok(PI / 4.0 * diameter.powi(2))
}

/// A group of identical bars at one depth.
///
/// ## JSON Example
///
/// ```json
/// { "depth": 342.0, "diameter": 16.0, "count": 3 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RebarGroup {
    /// Depth from the compression-extreme fiber (mm)
    pub depth: f64,

    /// Bar diameter (mm)
    pub diameter: f64,

    /// Number of bars in the group
    pub count: u32,
}

impl RebarGroup {
    pub fn new(depth: f64, diameter: f64, count: u32) -> Self {
        RebarGroup {
            depth,
            diameter,
            count,
        }
    }

    /// Total group area: count × π/4 · d²
    pub fn area(&self) -> CalcResult<f64> {
        if self.count == 0 {
            return Err(CalcError::invalid_input(
                "count",
                "0",
                "Number of bars must be positive",
            ));
        }
        Ok(self.count as f64 * bar_area(self.diameter)?)
    }

    /// Resolve into the record consumed by the force evaluator.
    pub fn to_record(&self) -> CalcResult<ReinforcementRecord> {
        let record = ReinforcementRecord::new(self.depth, self.area()?);
        record.validate()?;
        Ok(record)
    }
}

/// Resolve every bar group, preserving order.
pub fn resolve_rebar_groups(groups: &[RebarGroup]) -> CalcResult<Vec<ReinforcementRecord>> {
    groups.iter().map(RebarGroup::to_record).collect()
}

/// One line per group: depth, diameter, count and resolved area.
pub fn rebar_summary(groups: &[RebarGroup]) -> CalcResult<String> {
    let mut out = String::from("rebar data (d, diam, num, as):");
    for group in groups {
        let area = group.area()?;
        // Writing to a String cannot fail
        let _ = write!(
            out,
            "\n  d={:7.2}, diam={:5.2}, num={:2}, as={:10.2}",
            group.depth, group.diameter, group.count, area
        );
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_area() {
        // 16 mm bar: π/4 · 256 = 201.06 mm²
        assert!((bar_area(16.0).unwrap() - 201.06).abs() < 0.01);
        assert!(bar_area(0.0).is_err());
    }

    #[test]
    fn test_group_area() {
        let group = RebarGroup::new(450.0, 20.0, 3);
        // 3 × 314.16 = 942.48 mm²
        assert!((group.area().unwrap() - 942.48).abs() < 0.01);
    }

    #[test]
    fn test_zero_count_rejected() {
        let group = RebarGroup::new(450.0, 20.0, 0);
        assert!(group.to_record().is_err());
    }

    #[test]
    fn test_validate_records() {
        assert!(validate_records(&[]).is_err());
        assert!(validate_records(&[ReinforcementRecord::new(50.0, 400.0)]).is_ok());

        let err = validate_records(&[
            ReinforcementRecord::new(50.0, 400.0),
            ReinforcementRecord::new(450.0, 0.0),
        ])
        .unwrap_err();
        match err {
            CalcError::InvalidInput { field, .. } => assert_eq!(field, "reinforcement[1].area"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_shared_depths_allowed() {
        let records = [
            ReinforcementRecord::new(450.0, 402.0),
            ReinforcementRecord::new(450.0, 402.0),
        ];
        assert!(validate_records(&records).is_ok());
    }

    #[test]
    fn test_deepest_depth() {
        let records = [
            ReinforcementRecord::new(50.0, 400.0),
            ReinforcementRecord::new(470.0, 804.0),
            ReinforcementRecord::new(450.0, 804.0),
        ];
        assert_eq!(deepest_depth(&records), Some(470.0));
        assert_eq!(deepest_depth(&[]), None);
    }

    #[test]
    fn test_rebar_summary() {
        let summary = rebar_summary(&[RebarGroup::new(58.0, 16.0, 2)]).unwrap();
        assert!(summary.starts_with("rebar data"));
        assert!(summary.contains("num= 2"));
    }
}
