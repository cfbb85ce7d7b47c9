//! # Text Reports
//!
//! Plain-text rendering of solver traces and section results, shared by
//! the CLI and anything else that wants a human-readable summary. Forces
//! are shown in kN and moments in kN·m.

use std::fmt::Write;

use crate::calculations::equilibrium::{IterationRecord, SolveStatus, SolverResult};
use crate::calculations::flexure::FlexureResult;
use crate::units::{Kilonewtons, Newtons};

fn kn(force: f64) -> f64 {
    Kilonewtons::from(Newtons(force)).value()
}

fn format_ratio(ratio: f64) -> String {
    if ratio.is_finite() {
        format!("{:.3}", ratio)
    } else {
        "inf".to_string()
    }
}

/// One trace line.
pub fn format_iteration(record: &IterationRecord) -> String {
    format!(
        "Pass {:2} | Iter {:2} | x={:.2} mm | Fconcrete={:.3} kN | FcompSteel={:.3} kN | FtensSteel={:.3} kN | Ratio={}",
        record.pass_index,
        record.step_index,
        record.trial_depth,
        kn(record.concrete_force()),
        kn(record.compression_steel_force()),
        kn(record.tension_steel_force()),
        format_ratio(record.compression_to_tension_ratio()),
    )
}

/// Trace table. `last` limits output to the final `n` rows.
pub fn format_iteration_table(result: &SolverResult, last: Option<usize>) -> String {
    let skip = last.map_or(0, |n| result.iterations.len().saturating_sub(n));
    result
        .iterations
        .iter()
        .skip(skip)
        .map(format_iteration)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Final state of the search.
pub fn format_solution(result: &SolverResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Status                      : {}", status_label(result.status));
    match result.neutral_axis_depth {
        Some(x) => {
            let _ = writeln!(out, "Neutral axis depth (x)      : {:.2} mm", x);
        }
        None => {
            let _ = writeln!(out, "Neutral axis depth (x)      : not found");
        }
    }
    let _ = writeln!(out, "Concrete compression        : {:.3} kN", kn(result.forces.concrete_force));
    let _ = writeln!(out, "Steel compression           : {:.3} kN", kn(result.forces.compression_steel_force));
    let _ = writeln!(out, "Steel tension               : {:.3} kN", kn(result.forces.tension_steel_force));
    let ratio = result
        .compression_to_tension_ratio
        .map_or_else(|| "n/a".to_string(), format_ratio);
    let _ = writeln!(out, "Ratio (C/T)                 : {}", ratio);
    let _ = write!(
        out,
        "Evaluations                 : {} over {} pass(es)",
        result.iterations.len(),
        result.pass_count()
    );
    out
}

/// Solution plus design checks for a section analysis.
pub fn format_flexure(result: &FlexureResult) -> String {
    let mut out = format!("Section: {}\n", result.label);
    out.push_str(&format_solution(&result.solver));

    if let Some(checks) = &result.checks {
        let _ = write!(
            out,
            "\nExtreme tension strain (et) : {:.5} at d_t = {:.1} mm\
             \nYield strain (ey)           : {:.5}\
             \nStrength reduction (phi)    : {:.3} ({})\
             \nNominal moment (Mn)         : {:.2} kN-m\
             \nDesign moment (phi Mn)      : {:.2} kN-m",
            checks.extreme_tension_strain,
            checks.extreme_tension_depth,
            checks.yield_strain,
            checks.phi,
            if checks.tension_controlled {
                "tension-controlled"
            } else {
                "not tension-controlled"
            },
            checks.nominal_moment_knm(),
            checks.design_moment_knm(),
        );
    }
    out
}

fn status_label(status: SolveStatus) -> &'static str {
    match status {
        SolveStatus::Converged => "converged",
        SolveStatus::RefinementExhausted => "refinement exhausted (coarse crossing reported)",
        SolveStatus::NoCrossing => "no crossing",
    }
}
