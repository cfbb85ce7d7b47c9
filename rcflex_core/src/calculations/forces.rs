//! # Force Evaluator
//!
//! Internal forces of a rectangular section for an assumed neutral-axis
//! depth `x`, measured from the compression-extreme fiber.
//!
//! ## Model
//!
//! - Strain varies linearly with depth, reaching `ecu` at the extreme fiber
//!   and zero at `x`.
//! - Steel is elastic-perfectly-plastic: `stress = min(strain · Es, fy)`.
//! - Concrete uses the rectangular (Whitney) block: uniform `α₂ · f'c` over
//!   a depth `β₁ · x` and the full width.
//!
//! A bar with `depth < x` is in compression. A bar at or below `x` is in
//! tension, so a bar sitting exactly on the neutral axis is classified as
//! tension. Its strain is zero either way.
//!
//! ## Example
//!
//! ```rust
//! use rcflex_core::calculations::forces::evaluate;
//! use rcflex_core::reinforcement::ReinforcementRecord;
//! use rcflex_core::section::{MaterialParameters, SectionParameters};
//!
//! let section = SectionParameters::new(500.0, 300.0);
//! let material = MaterialParameters::from_code(28.0, 400.0, 200_000.0).unwrap();
//! let bars = [ReinforcementRecord::new(450.0, 1608.0)];
//!
//! let forces = evaluate(100.0, &bars, &section, &material).unwrap();
//! assert_eq!(forces.compression_steel_force, 0.0);
//! assert_eq!(forces.tension_steel_force, 1608.0 * 400.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{require_positive, CalcResult};
use crate::reinforcement::{validate_records, ReinforcementRecord};
use crate::section::{MaterialParameters, SectionParameters};

/// Force decomposition at one neutral-axis depth (N).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SectionForces {
    /// Concrete stress-block force
    pub concrete_force: f64,

    /// Sum of compression-zone steel forces
    pub compression_steel_force: f64,

    /// Sum of tension-zone steel forces
    pub tension_steel_force: f64,
}

impl SectionForces {
    /// Concrete plus compression steel.
    pub fn total_compression_force(&self) -> f64 {
        self.concrete_force + self.compression_steel_force
    }

    /// Compression over tension, `+∞` when there is no tension force.
    pub fn compression_to_tension_ratio(&self) -> f64 {
        if self.tension_steel_force == 0.0 {
            f64::INFINITY
        } else {
            self.total_compression_force() / self.tension_steel_force
        }
    }

    /// True once compression no longer strictly exceeds tension.
    pub fn is_crossing(&self) -> bool {
        self.total_compression_force() <= self.tension_steel_force
    }
}

/// Force magnitude in one bar, tagged with the zone it falls in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum BarForce {
    Compression(f64),
    Tension(f64),
}

pub(crate) fn bar_force(x: f64, bar: &ReinforcementRecord, material: &MaterialParameters) -> BarForce {
    if bar.depth < x {
        let strain = material.ecu * (x - bar.depth) / x;
        BarForce::Compression(bar.area * material.steel_stress(strain))
    } else {
        let strain = material.ecu * (bar.depth - x) / x;
        BarForce::Tension(bar.area * material.steel_stress(strain))
    }
}

/// Evaluate the section forces at `trial_depth`.
///
/// # Errors
///
/// Returns `CalcError::InvalidInput` if `trial_depth` is not positive, the
/// section or material is invalid, or the reinforcement layout is empty or
/// contains a non-positive depth or area.
pub fn evaluate(
    trial_depth: f64,
    records: &[ReinforcementRecord],
    section: &SectionParameters,
    material: &MaterialParameters,
) -> CalcResult<SectionForces> {
    require_positive("trial_depth", trial_depth)?;
    section.validate()?;
    material.validate()?;
    validate_records(records)?;
    Ok(forces_at(trial_depth, records, section, material))
}

/// Evaluation without input checks, for callers that validated once up front.
pub(crate) fn forces_at(
    x: f64,
    records: &[ReinforcementRecord],
    section: &SectionParameters,
    material: &MaterialParameters,
) -> SectionForces {
    let mut compression_steel_force = 0.0;
    let mut tension_steel_force = 0.0;

    for bar in records {
        match bar_force(x, bar, material) {
            BarForce::Compression(force) => compression_steel_force += force,
            BarForce::Tension(force) => tension_steel_force += force,
        }
    }

    let block_area = material.beta_one * x * section.width;
    let concrete_force = material.alpha_two * material.fc * block_area;

    SectionForces {
        concrete_force,
        compression_steel_force,
        tension_steel_force,
    }
}
