pub mod diff;
pub mod store;

pub use diff::{load_comparison, parse_ids_param, CompareError, CompareMode, Comparison, DiffRow};
pub use store::{AddOutcome, CompareStore};
