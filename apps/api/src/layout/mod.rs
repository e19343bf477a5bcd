// Page layout for PDF export.
// Implements: uniform scale-to-width of one bitmap and its slicing into page-height windows.
// Pure computation with no I/O and no document types.

pub mod page;
pub mod paginator;

pub use page::PageSize;
pub use paginator::{paginate, PaginationError};
