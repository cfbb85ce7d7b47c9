//! # Equilibrium Search
//!
//! Finds the neutral-axis depth at which internal compression (concrete
//! block plus compression steel) stops exceeding internal tension.
//!
//! ## Algorithm
//!
//! The search walks the trial depth down from the overall section depth.
//!
//! 1. **Scanning**: step `h / N`, where `N = max_outer_iterations`. The first
//!    depth with `C <= T` is the crossing. It is kept as the provisional
//!    answer, the cursor steps back to the previous depth (the last one with
//!    `C > T`) and the step shrinks by a factor of `N`.
//! 2. **Refining**: the same walk with the smaller step from the stepped-back
//!    depth. The first crossing ends the search, unless further refinement
//!    passes are configured, in which case it steps back and shrinks again.
//!
//! Each pass evaluates at most `N` depths. The tie-break is always the
//! *first* depth (large to small) with `C <= T`; there is no bisection, so
//! the answer lies at most one step below the true root.
//!
//! A section that never crosses inside the scanned range is not an error:
//! the result has no neutral-axis depth and carries the full trace.
//!
//! ## Example
//!
//! ```rust
//! use rcflex_core::calculations::equilibrium::{solve, SolverSettings};
//! use rcflex_core::reinforcement::ReinforcementRecord;
//! use rcflex_core::section::{MaterialParameters, SectionParameters};
//!
//! let section = SectionParameters::new(500.0, 300.0);
//! let material = MaterialParameters {
//!     fc: 30.0,
//!     fy: 400.0,
//!     es: 200_000.0,
//!     ecu: 0.003,
//!     beta_one: 0.85,
//!     alpha_two: 0.85,
//! };
//! let bars = vec![
//!     ReinforcementRecord::new(50.0, 400.0),
//!     ReinforcementRecord::new(450.0, 804.0),
//!     ReinforcementRecord::new(470.0, 804.0),
//! ];
//!
//! let result = solve(&bars, &section, &material, &SolverSettings::default()).unwrap();
//! let x = result.neutral_axis_depth.unwrap();
//! assert!((x - 84.0).abs() < 0.5);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::forces::{forces_at, SectionForces};
use crate::errors::{CalcError, CalcResult};
use crate::reinforcement::{validate_records, ReinforcementRecord};
use crate::section::{MaterialParameters, SectionParameters};

/// Default per-pass evaluation budget
pub const DEFAULT_MAX_OUTER_ITERATIONS: usize = 50;

/// Default number of refinement passes after the coarse scan
pub const DEFAULT_REFINEMENT_PASSES: usize = 1;

/// Trace capacity reserved up front; larger budgets grow the trace on demand.
const TRACE_CAPACITY_HINT: usize = 512;

/// Hard ceiling on refinement passes. Each pass shrinks the step by a
/// factor of `max_outer_iterations`, so a few passes reach f64 resolution.
pub const MAX_REFINEMENT_PASSES: usize = 8;

/// Solver configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverSettings {
    /// Evaluations per pass; also the step shrink factor between passes.
    pub max_outer_iterations: usize,

    /// Refinement passes run after the coarse scan finds a crossing.
    pub refinement_passes: usize,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            max_outer_iterations: DEFAULT_MAX_OUTER_ITERATIONS,
            refinement_passes: DEFAULT_REFINEMENT_PASSES,
        }
    }
}

impl SolverSettings {
    /// Settings with a custom per-pass budget and the default pass count.
    pub fn with_max_outer_iterations(max_outer_iterations: usize) -> Self {
        Self {
            max_outer_iterations,
            ..Self::default()
        }
    }

    /// Validate the settings.
    pub fn validate(&self) -> CalcResult<()> {
        if self.max_outer_iterations < 1 {
            return Err(CalcError::invalid_input(
                "max_outer_iterations",
                self.max_outer_iterations.to_string(),
                "At least one iteration per pass is required",
            ));
        }
        if self.refinement_passes > MAX_REFINEMENT_PASSES {
            return Err(CalcError::invalid_input(
                "refinement_passes",
                self.refinement_passes.to_string(),
                format!("At most {} refinement passes are allowed", MAX_REFINEMENT_PASSES),
            ));
        }
        Ok(())
    }

    /// Upper bound on force evaluations for one solve, saturating at
    /// `usize::MAX`.
    pub fn max_evaluations(&self) -> usize {
        self.max_outer_iterations
            .saturating_mul(self.refinement_passes.saturating_add(1))
    }
}

/// One evaluated trial depth.
///
/// Only the three force components are stored; the totals are derived, so
/// `total_compression_force` always equals concrete plus compression steel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IterationRecord {
    /// 1-based pass number (1 = coarse scan)
    pub pass_index: usize,

    /// 1-based evaluation number within the pass
    pub step_index: usize,

    /// Trial neutral-axis depth (mm)
    pub trial_depth: f64,

    /// Forces at this depth (N)
    #[serde(flatten)]
    pub forces: SectionForces,
}

impl IterationRecord {
    pub fn concrete_force(&self) -> f64 {
        self.forces.concrete_force
    }

    pub fn compression_steel_force(&self) -> f64 {
        self.forces.compression_steel_force
    }

    pub fn tension_steel_force(&self) -> f64 {
        self.forces.tension_steel_force
    }

    pub fn total_compression_force(&self) -> f64 {
        self.forces.total_compression_force()
    }

    /// Compression over tension; `+∞` when tension is zero.
    pub fn compression_to_tension_ratio(&self) -> f64 {
        self.forces.compression_to_tension_ratio()
    }
}

/// How the search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolveStatus {
    /// The final configured pass found a crossing.
    Converged,
    /// A refinement pass used its whole budget without crossing; the
    /// crossing from the previous pass is reported.
    RefinementExhausted,
    /// No depth in the coarse scan had compression at or below tension.
    NoCrossing,
}

/// Output of [`solve`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverResult {
    /// Every evaluation in order.
    pub iterations: Vec<IterationRecord>,

    /// Neutral-axis depth (mm); `None` when no crossing was found.
    pub neutral_axis_depth: Option<f64>,

    /// Forces at the reported depth; all zero without a crossing.
    #[serde(flatten)]
    pub forces: SectionForces,

    /// C/T at the reported depth. Finite whenever present, since a
    /// crossing implies non-zero tension.
    pub compression_to_tension_ratio: Option<f64>,

    /// How the search ended
    pub status: SolveStatus,
}

impl SolverResult {
    /// True when a neutral-axis depth was found.
    pub fn has_converged(&self) -> bool {
        self.neutral_axis_depth.is_some()
    }

    /// Number of passes that evaluated at least one depth.
    pub fn pass_count(&self) -> usize {
        self.iterations.last().map_or(0, |r| r.pass_index)
    }

    /// Iteration at the reported depth, if any.
    pub fn crossing_record(&self) -> Option<&IterationRecord> {
        let depth = self.neutral_axis_depth?;
        self.iterations.iter().rev().find(|r| r.trial_depth == depth)
    }
}

/// Depth cursor for one pass.
///
/// Depths are computed from the pass origin rather than by repeated
/// subtraction, so rounding does not accumulate along a pass.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PassCursor {
    pass_index: usize,
    origin: f64,
    step: f64,
    step_index: usize,
}

impl PassCursor {
    fn start(overall_depth: f64, divisions: usize) -> Self {
        PassCursor {
            pass_index: 1,
            origin: overall_depth,
            step: overall_depth / divisions as f64,
            step_index: 1,
        }
    }

    fn depth(&self) -> f64 {
        self.origin - (self.step_index - 1) as f64 * self.step
    }

    fn advance(self) -> Self {
        PassCursor {
            step_index: self.step_index + 1,
            ..self
        }
    }

    /// New pass from the previous (non-crossing) depth with a finer step.
    fn refine(self, divisions: usize) -> Self {
        PassCursor {
            pass_index: self.pass_index + 1,
            origin: self.depth() + self.step,
            step: self.step / divisions as f64,
            step_index: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum SearchState {
    Scanning(PassCursor),
    Refining {
        cursor: PassCursor,
        passes_left: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Transition {
    Next(SearchState),
    Finished(SolveStatus),
}

impl SearchState {
    fn cursor(&self) -> PassCursor {
        match *self {
            SearchState::Scanning(cursor) => cursor,
            SearchState::Refining { cursor, .. } => cursor,
        }
    }

    fn with_cursor(self, cursor: PassCursor) -> Self {
        match self {
            SearchState::Scanning(_) => SearchState::Scanning(cursor),
            SearchState::Refining { passes_left, .. } => SearchState::Refining {
                cursor,
                passes_left,
            },
        }
    }

    /// Transition after evaluating the cursor's current depth.
    fn transition(self, crossed: bool, settings: &SolverSettings) -> Transition {
        let cursor = self.cursor();
        let divisions = settings.max_outer_iterations;

        if !crossed {
            if cursor.step_index >= divisions {
                return Transition::Finished(match self {
                    SearchState::Scanning(_) => SolveStatus::NoCrossing,
                    SearchState::Refining { .. } => SolveStatus::RefinementExhausted,
                });
            }
            return Transition::Next(self.with_cursor(cursor.advance()));
        }

        // Crossing on the first depth of a pass leaves nothing to step back to.
        if cursor.step_index == 1 {
            return Transition::Finished(SolveStatus::Converged);
        }

        let passes_left = match self {
            SearchState::Scanning(_) => settings.refinement_passes,
            SearchState::Refining { passes_left, .. } => passes_left,
        };
        if passes_left == 0 {
            return Transition::Finished(SolveStatus::Converged);
        }

        Transition::Next(SearchState::Refining {
            cursor: cursor.refine(divisions),
            passes_left: passes_left - 1,
        })
    }
}

/// Find the neutral-axis depth of a rectangular reinforced-concrete section.
///
/// Units must be consistent; the reference system is mm, MPa and N.
///
/// # Errors
///
/// Returns `CalcError::InvalidInput` before any evaluation if the section,
/// material, reinforcement layout or settings are invalid. A section that
/// never reaches equilibrium is reported through `SolveStatus::NoCrossing`,
/// not as an error.
pub fn solve(
    records: &[ReinforcementRecord],
    section: &SectionParameters,
    material: &MaterialParameters,
    settings: &SolverSettings,
) -> CalcResult<SolverResult> {
    section.validate()?;
    material.validate()?;
    validate_records(records)?;
    settings.validate()?;

    let mut iterations = Vec::with_capacity(settings.max_evaluations().min(TRACE_CAPACITY_HINT));
    let mut crossing: Option<IterationRecord> = None;
    let mut state =
        SearchState::Scanning(PassCursor::start(section.overall_depth, settings.max_outer_iterations));

    let status = loop {
        let cursor = state.cursor();
        let trial_depth = cursor.depth();
        let forces = forces_at(trial_depth, records, section, material);
        let record = IterationRecord {
            pass_index: cursor.pass_index,
            step_index: cursor.step_index,
            trial_depth,
            forces,
        };
        iterations.push(record);

        let crossed = forces.is_crossing();
        if crossed {
            crossing = Some(record);
        }

        match state.transition(crossed, settings) {
            Transition::Next(next) => state = next,
            Transition::Finished(status) => break status,
        }
    };

    Ok(match crossing {
        Some(record) => SolverResult {
            iterations,
            neutral_axis_depth: Some(record.trial_depth),
            forces: record.forces,
            compression_to_tension_ratio: Some(record.compression_to_tension_ratio()),
            status,
        },
        None => SolverResult {
            iterations,
            neutral_axis_depth: None,
            forces: SectionForces::default(),
            compression_to_tension_ratio: None,
            status: SolveStatus::NoCrossing,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_section() -> SectionParameters {
        SectionParameters::new(500.0, 300.0)
    }

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

    fn doubly_reinforced() -> Vec<ReinforcementRecord> {
        vec![
            ReinforcementRecord::new(50.0, 400.0),
            ReinforcementRecord::new(450.0, 804.0),
            ReinforcementRecord::new(470.0, 804.0),
        ]
    }

    fn settings() -> SolverSettings {
        SolverSettings::default()
    }

    #[test]
    fn test_cursor_depths() {
        let cursor = PassCursor::start(500.0, 50);
        assert_eq!(cursor.depth(), 500.0);
        assert_eq!(cursor.advance().advance().depth(), 480.0);

        let refined = cursor.advance().advance().refine(50);
        assert_eq!(refined.pass_index, 2);
        assert_eq!(refined.step_index, 1);
        assert_eq!(refined.depth(), 490.0);
        assert!((refined.step - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_scanning_to_refining_transition() {
        let state = SearchState::Scanning(PassCursor::start(500.0, 50).advance());
        match state.transition(true, &settings()) {
            Transition::Next(SearchState::Refining { cursor, passes_left }) => {
                assert_eq!(passes_left, 0);
                assert_eq!(cursor.pass_index, 2);
                assert_eq!(cursor.depth(), 500.0);
            }
            other => panic!("unexpected transition: {other:?}"),
        }
    }

    #[test]
    fn test_refining_crossing_finishes() {
        let cursor = PassCursor::start(500.0, 50).advance().refine(50).advance();
        let state = SearchState::Refining {
            cursor,
            passes_left: 0,
        };
        assert_eq!(
            state.transition(true, &settings()),
            Transition::Finished(SolveStatus::Converged)
        );
    }

    #[test]
    fn test_budget_exhaustion() {
        let mut cursor = PassCursor::start(500.0, 3);
        cursor = cursor.advance().advance();
        let s = SolverSettings::with_max_outer_iterations(3);
        assert_eq!(
            SearchState::Scanning(cursor).transition(false, &s),
            Transition::Finished(SolveStatus::NoCrossing)
        );
        let refining = SearchState::Refining {
            cursor,
            passes_left: 0,
        };
        assert_eq!(
            refining.transition(false, &s),
            Transition::Finished(SolveStatus::RefinementExhausted)
        );
    }

    #[test]
    fn test_doubly_reinforced_section() {
        let result = solve(&doubly_reinforced(), &test_section(), &test_material(), &settings()).unwrap();
        assert_eq!(result.status, SolveStatus::Converged);
        assert_eq!(result.pass_count(), 2);

        // Exact root is near 83.98 mm; the reported depth is within one fine step
        let x = result.neutral_axis_depth.unwrap();
        assert!((x - 83.98).abs() < 0.5);
        assert!((x - 83.8).abs() < 1e-6);

        // Tension steel has yielded: 1608 mm² · 400 MPa
        assert!((result.forces.tension_steel_force - 643_200.0).abs() < 1e-6);
        assert!(result.forces.compression_steel_force > 0.0);
        let ratio = result.compression_to_tension_ratio.unwrap();
        assert!(ratio <= 1.0);
        assert!(ratio > 0.99);
    }

    #[test]
    fn test_coarse_pass_crossing_and_step_back() {
        let result = solve(&doubly_reinforced(), &test_section(), &test_material(), &settings()).unwrap();

        let coarse: Vec<_> = result.iterations.iter().filter(|r| r.pass_index == 1).collect();
        let last_coarse = coarse.last().unwrap();
        // 500, 490, ..., 80: the coarse scan crosses at 80 mm on step 43
        assert_eq!(last_coarse.step_index, 43);
        assert!((last_coarse.trial_depth - 80.0).abs() < 1e-9);

        // Pass 2 starts from the stepped-back depth
        let first_fine = result.iterations.iter().find(|r| r.pass_index == 2).unwrap();
        assert_eq!(first_fine.step_index, 1);
        assert!((first_fine.trial_depth - 90.0).abs() < 1e-9);
        assert!(!first_fine.forces.is_crossing());
    }

    #[test]
    fn test_no_crossing() {
        let bars = [ReinforcementRecord::new(10.0, 10_000.0)];
        let result = solve(&bars, &test_section(), &test_material(), &settings()).unwrap();
        assert_eq!(result.status, SolveStatus::NoCrossing);
        assert!(result.neutral_axis_depth.is_none());
        assert!(result.compression_to_tension_ratio.is_none());
        assert_eq!(result.forces, SectionForces::default());
        assert_eq!(result.iterations.len(), 50);
        assert!(result
            .iterations
            .iter()
            .all(|r| r.compression_to_tension_ratio() == f64::INFINITY));
    }

    #[test]
    fn test_crossing_at_first_depth_finishes() {
        // Nothing shallower than the overall depth exists to step back to
        let state = SearchState::Scanning(PassCursor::start(500.0, 50));
        assert_eq!(
            state.transition(true, &settings()),
            Transition::Finished(SolveStatus::Converged)
        );
    }

    #[test]
    fn test_extra_refinement_pass() {
        let s = SolverSettings {
            max_outer_iterations: 50,
            refinement_passes: 2,
        };
        let result = solve(&doubly_reinforced(), &test_section(), &test_material(), &s).unwrap();
        assert_eq!(result.status, SolveStatus::Converged);
        assert_eq!(result.pass_count(), 3);
        let x = result.neutral_axis_depth.unwrap();
        // Third-pass step is 0.004 mm
        assert!((x - 83.98).abs() < 0.02);
    }

    #[test]
    fn test_no_refinement() {
        let s = SolverSettings {
            max_outer_iterations: 50,
            refinement_passes: 0,
        };
        let result = solve(&doubly_reinforced(), &test_section(), &test_material(), &s).unwrap();
        assert_eq!(result.pass_count(), 1);
        assert!((result.neutral_axis_depth.unwrap() - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_settings() {
        let s = SolverSettings::with_max_outer_iterations(0);
        assert!(solve(&doubly_reinforced(), &test_section(), &test_material(), &s).is_err());

        let s = SolverSettings {
            max_outer_iterations: 50,
            refinement_passes: MAX_REFINEMENT_PASSES + 1,
        };
        assert!(solve(&doubly_reinforced(), &test_section(), &test_material(), &s).is_err());
    }

    #[test]
    fn test_large_budget_does_not_preallocate() {
        let s = SolverSettings {
            max_outer_iterations: 1 << 60,
            refinement_passes: 1,
        };
        assert_eq!(s.max_evaluations(), 1 << 61);

        let s = SolverSettings {
            max_outer_iterations: usize::MAX,
            refinement_passes: MAX_REFINEMENT_PASSES,
        };
        assert_eq!(s.max_evaluations(), usize::MAX);

        // Steel below the section is already in tension at x = h, so the
        // first trial depth crosses and the loop stops after one evaluation
        let bars = [ReinforcementRecord::new(600.0, 100_000.0)];
        let s = SolverSettings {
            max_outer_iterations: 1 << 60,
            refinement_passes: 1,
        };
        let result = solve(&bars, &test_section(), &test_material(), &s).unwrap();
        assert_eq!(result.status, SolveStatus::Converged);
        assert_eq!(result.iterations.len(), 1);
        assert_eq!(result.neutral_axis_depth, Some(500.0));
    }

    #[test]
    fn test_empty_reinforcement_rejected() {
        let err = solve(&[], &test_section(), &test_material(), &settings()).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_crossing_record_lookup() {
        let result = solve(&doubly_reinforced(), &test_section(), &test_material(), &settings()).unwrap();
        let record = result.crossing_record().unwrap();
        assert_eq!(record.pass_index, 2);
        assert_eq!(record.forces, result.forces);
    }

    #[test]
    fn test_result_serialization() {
        let result = solve(&doubly_reinforced(), &test_section(), &test_material(), &settings()).unwrap();
        let json = serde_json::to_string_pretty(&result).unwrap();
        assert!(json.contains("neutral_axis_depth"));
        assert!(json.contains("tension_steel_force"));
        assert!(json.contains("\"status\": \"Converged\""));

        let roundtrip: SolverResult = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.iterations.len(), result.iterations.len());
        let x = roundtrip.neutral_axis_depth.unwrap();
        assert!((x - result.neutral_axis_depth.unwrap()).abs() < 1e-9);
    }
}
