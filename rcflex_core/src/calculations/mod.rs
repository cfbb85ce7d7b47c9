//! # Section Calculations
//!
//! Each calculation follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate(input) -> Result<*Result, CalcError>` - Pure calculation function
//!
//! All functions are pure: no shared state, no I/O. Separate sections (or
//! load cases) can be solved on separate threads without coordination.
//!
//! ## Available Calculations
//!
//! - [`forces`] - Strain-compatibility force evaluator at one neutral-axis depth
//! - [`equilibrium`] - Coarse-to-fine neutral-axis search
//! - [`flexure`] - Full section analysis: equilibrium plus φ and moment checks

pub mod equilibrium;
pub mod flexure;
pub mod forces;

// Re-export commonly used types
pub use equilibrium::{solve, IterationRecord, SolveStatus, SolverResult, SolverSettings};
pub use flexure::{FlexureInput, FlexureResult, SectionChecks};
pub use forces::{evaluate, SectionForces};
