//! List view: what slice of a collection a page shows, and which rows are checked.

pub mod selection;
pub mod state;
pub mod transform;

pub use selection::Selection;
pub use state::{SortDirection, SortSpec, ViewAction, ViewState};
pub use transform::{filter_records, sort_records, transform, PageView};
