//! Search-as-you-type: debounced, cancel-previous catalog lookups.

mod controller;
mod debounce;

pub use controller::{DEFAULT_DEBOUNCE, SearchController, SearchResults};
pub use debounce::Debouncer;
