//! # Flexural Section Analysis
//!
//! Runs the equilibrium search for a complete section description and, when
//! a neutral axis is found, derives the usual design checks: extreme
//! tension strain, strength reduction factor φ and moment capacity.
//!
//! ## Example (LLM-friendly)
//!
//! ```rust
//! use rcflex_core::calculations::flexure::{calculate, FlexureInput};
//! use rcflex_core::reinforcement::RebarGroup;
//! use rcflex_core::section::{MaterialParameters, SectionParameters};
//!
//! let input = FlexureInput::new(
//!     "B-1",
//!     SectionParameters::new(500.0, 300.0),
//!     MaterialParameters::from_code(28.0, 415.0, 200_000.0).unwrap(),
//! )
//! .with_rebar_group(RebarGroup::new(60.0, 16.0, 2))
//! .with_rebar_group(RebarGroup::new(440.0, 20.0, 4));
//!
//! let result = calculate(&input).unwrap();
//! let checks = result.checks.unwrap();
//! println!("c = {:.1} mm", result.solver.neutral_axis_depth.unwrap());
//! println!("phi Mn = {:.1} kN-m", checks.design_moment_knm());
//! assert!(checks.tension_controlled);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::equilibrium::{solve, SolverResult, SolverSettings};
use crate::calculations::forces::{bar_force, forces_at, BarForce};
use crate::errors::{require_positive, CalcError, CalcResult};
use crate::provisions::{is_tension_controlled, strength_reduction_factor, SectionType};
use crate::reinforcement::{deepest_depth, resolve_rebar_groups, RebarGroup, ReinforcementRecord};
use crate::section::{MaterialParameters, SectionParameters};
use crate::units::{KilonewtonM, NewtonMm};

/// Current input file schema version
pub const SCHEMA_VERSION: &str = "0.1.0";

fn default_schema_version() -> String {
    SCHEMA_VERSION.to_string()
}

/// Input parameters for one section analysis.
///
/// Reinforcement may be given as resolved records, as bar groups, or both;
/// bar groups are appended after the records.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "B-1",
///   "section": { "overall_depth": 500.0, "width": 300.0 },
///   "material": { "fc": 30.0, "fy": 400.0, "es": 200000.0, "ecu": 0.003, "beta_one": 0.85 },
///   "reinforcement": [ { "depth": 50.0, "area": 400.0 } ],
///   "rebar_groups": [ { "depth": 450.0, "diameter": 16.0, "count": 4 } ],
///   "settings": { "max_outer_iterations": 50 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlexureInput {
    /// Input schema version
    #[serde(default = "default_schema_version")]
    pub schema_version: String,

    /// User label for this section (e.g., "B-1", "Girder at Grid 3")
    pub label: String,

    pub section: SectionParameters,

    pub material: MaterialParameters,

    /// Resolved reinforcement records
    #[serde(default)]
    pub reinforcement: Vec<ReinforcementRecord>,

    /// Bar groups resolved to records at calculation time
    #[serde(default)]
    pub rebar_groups: Vec<RebarGroup>,

    /// Transverse reinforcement type, for φ
    #[serde(default)]
    pub section_type: SectionType,

    #[serde(default)]
    pub settings: SolverSettings,
}

impl FlexureInput {
    pub fn new(label: impl Into<String>, section: SectionParameters, material: MaterialParameters) -> Self {
        FlexureInput {
            schema_version: default_schema_version(),
            label: label.into(),
            section,
            material,
            reinforcement: Vec::new(),
            rebar_groups: Vec::new(),
            section_type: SectionType::default(),
            settings: SolverSettings::default(),
        }
    }

    /// Add a resolved reinforcement record (builder pattern)
    pub fn with_record(mut self, record: ReinforcementRecord) -> Self {
        self.reinforcement.push(record);
        self
    }

    /// Add a bar group (builder pattern)
    pub fn with_rebar_group(mut self, group: RebarGroup) -> Self {
        self.rebar_groups.push(group);
        self
    }

    /// Replace the solver settings (builder pattern)
    pub fn with_settings(mut self, settings: SolverSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if self.reinforcement.is_empty() && self.rebar_groups.is_empty() {
            return Err(CalcError::missing_field("reinforcement"));
        }
        self.section.validate()?;
        self.material.validate()?;
        self.settings.validate()?;
        self.reinforcement_records()?;
        Ok(())
    }

    /// All reinforcement as records: explicit records first, then bar groups.
    pub fn reinforcement_records(&self) -> CalcResult<Vec<ReinforcementRecord>> {
        let mut records = self.reinforcement.clone();
        records.extend(resolve_rebar_groups(&self.rebar_groups)?);
        Ok(records)
    }
}

/// Design checks at the equilibrium neutral axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionChecks {
    /// Depth of the extreme tension layer d_t (mm)
    pub extreme_tension_depth: f64,

    /// Net tensile strain in the extreme tension layer εt
    pub extreme_tension_strain: f64,

    /// Steel yield strain εy = fy / Es
    pub yield_strain: f64,

    /// Strength reduction factor φ
    pub phi: f64,

    /// Nominal moment capacity Mn (N·mm)
    pub nominal_moment: f64,

    /// Design moment capacity φMn (N·mm)
    pub design_moment: f64,

    /// εt ≥ εy + 0.003
    pub tension_controlled: bool,
}

impl SectionChecks {
    /// Nominal moment in kN·m
    pub fn nominal_moment_knm(&self) -> f64 {
        KilonewtonM::from(NewtonMm(self.nominal_moment)).value()
    }

    /// Design moment in kN·m
    pub fn design_moment_knm(&self) -> f64 {
        KilonewtonM::from(NewtonMm(self.design_moment)).value()
    }
}

/// Results from a section analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlexureResult {
    /// Label copied from the input
    pub label: String,

    /// Reinforcement the solver ran on
    pub reinforcement: Vec<ReinforcementRecord>,

    /// Full equilibrium search output
    pub solver: SolverResult,

    /// Design checks; `None` when no neutral axis was found
    pub checks: Option<SectionChecks>,
}

/// Analyze a section: equilibrium search followed by design checks.
///
/// # Errors
///
/// Returns a `CalcError` if the input is invalid. A section without a
/// crossing is returned as a result with `checks: None`.
pub fn calculate(input: &FlexureInput) -> CalcResult<FlexureResult> {
    input.validate()?;
    let records = input.reinforcement_records()?;

    let solver = solve(&records, &input.section, &input.material, &input.settings)?;
    let checks = match solver.neutral_axis_depth {
        Some(c) => Some(section_checks(
            c,
            &records,
            &input.section,
            &input.material,
            input.section_type,
        )?),
        None => None,
    };

    Ok(FlexureResult {
        label: input.label.clone(),
        reinforcement: records,
        solver,
        checks,
    })
}

/// Design checks for a neutral-axis depth `c`.
///
/// # Errors
///
/// Returns `CalcError::InvalidInput` if `c` is not a positive finite depth.
pub fn section_checks(
    c: f64,
    records: &[ReinforcementRecord],
    section: &SectionParameters,
    material: &MaterialParameters,
    section_type: SectionType,
) -> CalcResult<SectionChecks> {
    require_positive("c", c)?;
    let extreme_tension_depth =
        deepest_depth(records).ok_or_else(|| CalcError::missing_field("reinforcement"))?;
    let extreme_tension_strain = if extreme_tension_depth > c {
        material.ecu * (extreme_tension_depth - c) / c
    } else {
        0.0
    };
    let yield_strain = material.yield_strain();
    let phi = strength_reduction_factor(extreme_tension_strain, yield_strain, section_type)?;
    let nominal_moment = nominal_moment(c, records, section, material);

    Ok(SectionChecks {
        extreme_tension_depth,
        extreme_tension_strain,
        yield_strain,
        phi,
        nominal_moment,
        design_moment: phi * nominal_moment,
        tension_controlled: is_tension_controlled(extreme_tension_strain, yield_strain),
    })
}

/// Internal couple about the compression-extreme fiber, tension positive.
///
/// The concrete block resultant acts at β₁c/2; each bar force acts at its
/// depth.
fn nominal_moment(
    c: f64,
    records: &[ReinforcementRecord],
    section: &SectionParameters,
    material: &MaterialParameters,
) -> f64 {
    let concrete_force = forces_at(c, records, section, material).concrete_force;
    let mut moment = -concrete_force * material.beta_one * c / 2.0;
    for bar in records {
        match bar_force(c, bar, material) {
            BarForce::Tension(force) => moment += force * bar.depth,
            BarForce::Compression(force) => moment -= force * bar.depth,
        }
    }
    moment
}
