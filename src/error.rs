/*
 * Error Module
 *
 * Error types for the particle field. The simulation itself never fails:
 * numeric edge cases are guarded in place. The only fallible step is
 * accepting user supplied tunables.
 */

use std::fmt;

// Errors produced when validating SimulationParams
#[derive(Debug, Clone, PartialEq)]
pub enum ParamsError {
    // A value that must be finite and strictly positive was not
    NotPositive { name: &'static str, value: f32 },
    // A value fell outside its allowed interval
    OutOfRange {
        name: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
    // A sampling range has its upper bound below its lower bound
    EmptyRange { name: &'static str, min: f32, max: f32 },
}

impl fmt::Display for ParamsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamsError::NotPositive { name, value } => {
                write!(f, "{} must be a positive finite number, got {}", name, value)
            }
            ParamsError::OutOfRange { name, value, min, max } => {
                write!(f, "{} must be within ({}, {}], got {}", name, min, max, value)
            }
            ParamsError::EmptyRange { name, min, max } => {
                write!(f, "{} range is empty: max {} is below min {}", name, max, min)
            }
        }
    }
}

impl std::error::Error for ParamsError {}
