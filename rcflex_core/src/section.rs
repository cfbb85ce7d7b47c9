//! # Section and Material Parameters
//!
//! Static inputs to the force evaluator and the equilibrium solver. Both
//! structs validate up front so the solver never starts on a bad section.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "section": { "overall_depth": 500.0, "width": 300.0 },
//!   "material": {
//!     "fc": 30.0,
//!     "fy": 400.0,
//!     "es": 200000.0,
//!     "ecu": 0.003,
//!     "beta_one": 0.85
//!   }
//! }
//! ```
//!
//! `alpha_two` is optional and defaults to 0.85.

use serde::{Deserialize, Serialize};

use crate::errors::{require_positive, require_unit_fraction, CalcResult};
use crate::provisions::{self, ACI_ULTIMATE_STRAIN};

/// Default stress-block intensity factor α₂
pub const DEFAULT_ALPHA_TWO: f64 = 0.85;

fn default_alpha_two() -> f64 {
    DEFAULT_ALPHA_TWO
}

/// Rectangular section geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionParameters {
    /// Overall section depth (mm). Also the largest trial neutral-axis depth.
    pub overall_depth: f64,

    /// Section width (mm)
    pub width: f64,
}

impl SectionParameters {
    pub fn new(overall_depth: f64, width: f64) -> Self {
        SectionParameters {
            overall_depth,
            width,
        }
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("overall_depth", self.overall_depth)?;
        require_positive("width", self.width)?;
        Ok(())
    }
}

/// Concrete and steel properties plus stress-block coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialParameters {
    /// Concrete compressive strength f'c (MPa)
    pub fc: f64,

    /// Steel yield strength fy (MPa)
    pub fy: f64,

    /// Steel modulus Es (MPa), the strain-to-stress slope
    pub es: f64,

    /// Ultimate concrete compressive strain εcu (typically 0.003)
    pub ecu: f64,

    /// Stress-block depth factor β₁, in (0, 1]
    pub beta_one: f64,

    /// Stress-block intensity factor α₂, in (0, 1]
    #[serde(default = "default_alpha_two")]
    pub alpha_two: f64,
}

impl MaterialParameters {
    /// Build parameters from strengths alone: εcu = 0.003, β₁ from the ACI
    /// provision and α₂ = 0.85.
    pub fn from_code(fc: f64, fy: f64, es: f64) -> CalcResult<Self> {
        let material = MaterialParameters {
            fc,
            fy,
            es,
            ecu: ACI_ULTIMATE_STRAIN,
            beta_one: provisions::beta_one(fc)?,
            alpha_two: DEFAULT_ALPHA_TWO,
        };
        material.validate()?;
        Ok(material)
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("fc", self.fc)?;
        require_positive("fy", self.fy)?;
        require_positive("es", self.es)?;
        require_positive("ecu", self.ecu)?;
        require_unit_fraction("beta_one", self.beta_one)?;
        require_unit_fraction("alpha_two", self.alpha_two)?;
        Ok(())
    }

    /// Steel stress for a strain magnitude: elastic up to yield, then flat.
    pub fn steel_stress(&self, strain: f64) -> f64 {
        (strain * self.es).min(self.fy)
    }

    /// Yield strain fy / Es
    pub fn yield_strain(&self) -> f64 {
        self.fy / self.es
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_material() -> MaterialParameters {
        MaterialParameters {
            fc: 30.0,
            fy: 400.0,
            es: 200_000.0,
            ecu: 0.003,
            beta_one: 0.85,
            alpha_two: 0.85,
        }
    }

    #[test]
    fn test_section_validation() {
        assert!(SectionParameters::new(500.0, 300.0).validate().is_ok());
        assert!(SectionParameters::new(0.0, 300.0).validate().is_err());
        assert!(SectionParameters::new(500.0, -1.0).validate().is_err());
    }

    #[test]
    fn test_material_validation() {
        assert!(test_material().validate().is_ok());

        let mut bad = test_material();
        bad.es = 0.0;
        assert!(bad.validate().is_err());

        let mut bad = test_material();
        bad.beta_one = 1.2;
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_steel_stress_caps_at_yield() {
        let mat = test_material();
        assert!((mat.steel_stress(0.001) - 200.0).abs() < 1e-9);
        assert_eq!(mat.steel_stress(0.01), 400.0);
        assert_eq!(mat.steel_stress(0.0), 0.0);
    }

    #[test]
    fn test_from_code() {
        let mat = MaterialParameters::from_code(35.0, 415.0, 200_000.0).unwrap();
        assert_eq!(mat.ecu, 0.003);
        assert_eq!(mat.alpha_two, 0.85);
        assert!((mat.beta_one - 0.80).abs() < 1e-12);
    }

    #[test]
    fn test_alpha_two_defaults_when_omitted() {
        let json = r#"{"fc": 30.0, "fy": 400.0, "es": 200000.0, "ecu": 0.003, "beta_one": 0.85}"#;
        let mat: MaterialParameters = serde_json::from_str(json).unwrap();
        assert_eq!(mat.alpha_two, DEFAULT_ALPHA_TWO);
    }
}
