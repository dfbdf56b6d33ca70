//! Case definitions, the built-in catalog and case-file loading

mod case;
pub mod catalog;
mod expectation;
mod id;
mod input_spec;
mod loader;

pub use case::{CaseGroup, TestCase};
pub use expectation::{Expectation, Verdict};
pub use id::{ID_MARKER, extract_id_from_description};
pub use input_spec::InputSpec;
pub use loader::{CaseLoader, load_cases_from_yaml, load_file};
