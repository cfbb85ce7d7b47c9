//! # Code Provisions (ACI 318 / NSCP 2015)
//!
//! Scalar coefficients consumed by the section calculations: the
//! stress-block depth factor β₁, the steel yield strain and the strength
//! reduction factor φ. Stresses are in MPa.
//!
//! ## Example
//!
//! ```rust
//! use rcflex_core::provisions::{beta_one, strength_reduction_factor, SectionType};
//!
//! assert_eq!(beta_one(28.0).unwrap(), 0.85);
//! let phi = strength_reduction_factor(0.008, 0.002, SectionType::Other).unwrap();
//! assert_eq!(phi, 0.90);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{require_positive, CalcError, CalcResult};

/// Lowest concrete strength covered by the β₁ provision (MPa)
pub const MIN_FC_MPA: f64 = 17.0;

/// Ultimate concrete compressive strain used by ACI 318
pub const ACI_ULTIMATE_STRAIN: f64 = 0.003;

/// Transverse reinforcement type, which sets the compression-controlled φ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SectionType {
    /// Spirally reinforced member
    Spiral,
    /// Tied columns and beams
    #[default]
    Other,
}

impl SectionType {
    fn compression_controlled_phi(self) -> f64 {
        match self {
            SectionType::Spiral => 0.75,
            SectionType::Other => 0.65,
        }
    }
}

/// Stress-block depth factor β₁ for a concrete strength `fc` (MPa).
///
/// - 17 ≤ fc ≤ 28: β₁ = 0.85
/// - 28 < fc < 55: β₁ = 0.85 − 0.05 (fc − 28) / 7
/// - fc ≥ 55: β₁ = 0.65
pub fn beta_one(fc: f64) -> CalcResult<f64> {
    if !fc.is_finite() || fc < MIN_FC_MPA {
        return Err(CalcError::invalid_input(
            "fc",
            fc.to_string(),
            "fc below 17 MPa is outside the beta_1 provision",
        ));
    }

    let beta = if fc <= 28.0 {
        0.85
    } else if fc < 55.0 {
        0.85 - 0.05 * (fc - 28.0) / 7.0
    } else {
        0.65
    };
    Ok(beta)
}

/// Steel yield strain εy = fy / Es.
pub fn steel_yield_strain(fy: f64, es: f64) -> CalcResult<f64> {
    require_positive("fy", fy)?;
    require_positive("es", es)?;
    Ok(fy / es)
}

/// Tension-controlled check: `epsilon_t >= epsilon_ty + 0.003`.
pub fn is_tension_controlled(epsilon_t: f64, epsilon_ty: f64) -> bool {
    epsilon_t >= epsilon_ty + ACI_ULTIMATE_STRAIN
}

/// Strength reduction factor φ from the net tensile strain in the extreme
/// tension steel.
///
/// Compression-controlled when `epsilon_t <= epsilon_ty`, tension-controlled
/// (φ = 0.90) once `epsilon_t >= epsilon_ty + 0.003`, linear in between.
pub fn strength_reduction_factor(
    epsilon_t: f64,
    epsilon_ty: f64,
    section_type: SectionType,
) -> CalcResult<f64> {
    if epsilon_t.is_nan() || epsilon_t < 0.0 {
        return Err(CalcError::invalid_input(
            "epsilon_t",
            epsilon_t.to_string(),
            "Tensile strain cannot be negative",
        ));
    }
    require_positive("epsilon_ty", epsilon_ty)?;

    let compression_phi = section_type.compression_controlled_phi();

    let phi = if epsilon_t <= epsilon_ty {
        compression_phi
    } else if !is_tension_controlled(epsilon_t, epsilon_ty) {
        let factor = (epsilon_t - epsilon_ty) / ACI_ULTIMATE_STRAIN;
        compression_phi + (0.90 - compression_phi) * factor
    } else {
        0.90
    };
    Ok(phi)
}
