#![doc = include_str!("../README.md")]

// Re-export main structures
pub use crate::corrector::IntensityCorrector;
pub use crate::models::contribution::IsotopeContribution;
pub use crate::models::crosstalk::{
    CrosstalkMatrix,
    verify_catalog,
};
pub use crate::models::plex_mode::{
    FactorSource,
    PlexMode,
};
pub use crate::solver::{
    LinearSystemSolver,
    LuSolver,
};
pub use crate::trace::{
    CorrectionTrace,
    render_trace_table,
};

// Declare modules
pub mod corrector;
pub mod errors;
pub mod models;
pub mod solver;
pub mod trace;

// Re-export errors
pub use crate::errors::{
    CorrectionError,
    Result,
};
