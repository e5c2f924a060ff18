/// Typed evaluation errors.
pub mod error;
pub mod evaluator;
pub mod opportunity;
/// Spare-capacity viability checks.
pub mod viability;

// Re-export the main types for convenience
pub use error::EvalError;
pub use evaluator::{evaluate, waiver_percent};
pub use opportunity::{Evaluation, OpportunityKind, OpportunityResult};
pub use viability::{ExpansionCheck, check_expansions};
