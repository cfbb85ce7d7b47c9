//! # RCFlex CLI Application
//!
//! Terminal front end for the section equilibrium engine.
//!
//! ```text
//! rcflex_cli                      # run the built-in demo section
//! rcflex_cli beam.json            # analyze a JSON input file
//! rcflex_cli beam.json out.json   # ...and save the result
//! ```

use std::env;
use std::path::Path;
use std::process;

use rcflex_core::calculations::flexure::{calculate, FlexureInput, FlexureResult};
use rcflex_core::errors::{CalcError, CalcResult};
use rcflex_core::file_io::{load_input, save_result};
use rcflex_core::report::{format_flexure, format_iteration_table};
use rcflex_core::{MaterialParameters, ReinforcementRecord, SectionParameters};

/// Trace rows shown in the terminal report
const TRACE_TAIL: usize = 5;

fn demo_input() -> FlexureInput {
    // 500 x 300 mm beam: compression bars near the top, two tension layers
    FlexureInput::new(
        "Demo",
        SectionParameters::new(500.0, 300.0),
        MaterialParameters {
            fc: 30.0,
            fy: 400.0,
            es: 200_000.0,
            ecu: 0.003,
            beta_one: 0.85,
            alpha_two: 0.85,
        },
    )
    .with_record(ReinforcementRecord::new(50.0, 400.0))
    .with_record(ReinforcementRecord::new(450.0, 804.0))
    .with_record(ReinforcementRecord::new(470.0, 804.0))
}

fn run(args: &[String]) -> CalcResult<FlexureResult> {
    let input = match args.first() {
        Some(path) => load_input(Path::new(path))?,
        None => {
            println!("No input file given. Running demo section...");
            println!();
            demo_input()
        }
    };

    let result = calculate(&input)?;

    if let Some(out) = args.get(1) {
        save_result(&result, Path::new(out))?;
    }
    Ok(result)
}

fn main() {
    println!("RCFlex CLI - Reinforced-Concrete Section Equilibrium");
    println!("====================================================");
    println!();

    let args: Vec<String> = env::args().skip(1).collect();

    match run(&args) {
        Ok(result) => {
            println!("═══════════════════════════════════════");
            println!("  FINAL SOLUTION");
            println!("═══════════════════════════════════════");
            println!("{}", format_flexure(&result));
            println!();
            println!("Iteration data (last {}):", TRACE_TAIL);
            println!("{}", format_iteration_table(&result.solver, Some(TRACE_TAIL)));
            println!("═══════════════════════════════════════");
            if !result.solver.has_converged() {
                println!("  No neutral axis found within the section depth");
                println!("═══════════════════════════════════════");
            }

            println!();
            println!("JSON Output (for LLM/API use):");
            if let Ok(json) = serde_json::to_string_pretty(&result) {
                println!("{}", json);
            }
        }
        Err(e) => {
            report_error(&e);
            process::exit(1);
        }
    }
}

fn report_error(e: &CalcError) {
    eprintln!("Error [{}]: {}", e.error_code(), e);
    if let Ok(json) = serde_json::to_string_pretty(e) {
        eprintln!();
        eprintln!("Error JSON:");
        eprintln!("{}", json);
    }
}
