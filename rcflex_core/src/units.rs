//! # Unit Types
//!
//! Newtype wrappers for the report units.
//!
//! The equilibrium solver works on raw `f64` values and performs no unit
//! conversion: any internally consistent system works. The reference system,
//! and the one assumed by the report layer and the code provisions, is mm,
//! mm², MPa (N/mm²) and N. Forces are reported in kN and moments in kN·m.
//!
//! ## Example
//!
//! ```rust
//! use rcflex_core::units::{Kilonewtons, Newtons};
//!
//! let tension = Newtons(643_200.0);
//! let kn: Kilonewtons = tension.into();
//! assert_eq!(kn.value(), 643.2);
//! ```

// ============================================================================
// Force
// ============================================================================

/// Force in newtons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Newtons(pub f64);

/// Force in kilonewtons (1 kN = 1000 N)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Kilonewtons(pub f64);

impl From<Newtons> for Kilonewtons {
    fn from(n: Newtons) -> Self {
        Kilonewtons(n.0 / 1000.0)
    }
}

// ============================================================================
// Moment
// ============================================================================

/// Moment in newton-millimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct NewtonMm(pub f64);

/// Moment in kilonewton-meters (1 kN·m = 10⁶ N·mm)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct KilonewtonM(pub f64);

impl From<NewtonMm> for KilonewtonM {
    fn from(nmm: NewtonMm) -> Self {
        KilonewtonM(nmm.0 / 1.0e6)
    }
}

macro_rules! impl_value {
    ($($type:ty),*) => {
        $(
            impl $type {
                /// Get the raw f64 value
                pub fn value(self) -> f64 {
                    self.0
                }
            }
        )*
    };
}

impl_value!(Newtons, Kilonewtons, NewtonMm, KilonewtonM);
