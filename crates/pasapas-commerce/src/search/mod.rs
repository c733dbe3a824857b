//! Search module.
//!
//! Filter options, the filter engine and pagination for the catalog view.

mod collate;
mod filter;
mod options;
mod query;
mod results;

pub use collate::{natural_cmp, normalize_options};
pub use filter::{FilterState, Selection, ALL};
pub use options::{FilterOptions, PriceRange};
pub use query::{normalize_term, SearchQuery};
pub use results::{Pagination, SearchResults, PAGE_SIZE};
