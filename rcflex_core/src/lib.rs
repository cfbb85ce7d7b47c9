//! # rcflex_core - Reinforced-Concrete Section Equilibrium Engine
//!
//! `rcflex_core` finds the neutral-axis depth of a rectangular
//! reinforced-concrete section under the strain-compatibility model and
//! reports the compression/tension force decomposition at that depth. All
//! inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Traceable**: Every solver evaluation is returned for inspection
//!
//! ## Units
//!
//! The solver is unit-agnostic but expects a consistent system. Everything
//! in this crate that converts or labels units assumes mm, mm², MPa and N.
//!
//! ## Quick Start
//!
//! ```rust
//! use rcflex_core::{solve, MaterialParameters, ReinforcementRecord, SectionParameters, SolverSettings};
//!
//! let section = SectionParameters::new(500.0, 300.0);
//! let material = MaterialParameters::from_code(30.0, 400.0, 200_000.0).unwrap();
//! let bars = [ReinforcementRecord::new(50.0, 400.0), ReinforcementRecord::new(450.0, 1608.0)];
//!
//! let result = solve(&bars, &section, &material, &SolverSettings::default()).unwrap();
//! if let Some(x) = result.neutral_axis_depth {
//!     println!("Neutral axis at {:.2} mm after {} evaluations", x, result.iterations.len());
//! }
//!
//! // Serialize to JSON for storage or transmission
//! let json = serde_json::to_string_pretty(&result).unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Force evaluator, equilibrium solver, section analysis
//! - [`section`] - Section geometry and material parameters
//! - [`reinforcement`] - Reinforcement records and bar groups
//! - [`provisions`] - Code coefficients (β₁, φ, yield strain)
//! - [`report`] - Plain-text reports
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types
//! - [`file_io`] - JSON input and result files

pub mod calculations;
pub mod errors;
pub mod file_io;
pub mod provisions;
pub mod reinforcement;
pub mod report;
pub mod section;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{solve, SolveStatus, SolverResult, SolverSettings};
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_input, save_result};
pub use reinforcement::{RebarGroup, ReinforcementRecord};
pub use section::{MaterialParameters, SectionParameters};
