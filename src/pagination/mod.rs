//! Pagination module
//!
//! Baserow pages row listings with a server-supplied `next` URL. A
//! [`RowCursor`] owns only that URL; [`row_stream`] turns it into a lazy
//! stream of rows.

mod cursor;
mod types;

pub use cursor::{first_page_url, row_stream, RowCursor, RowStream};
pub use types::{NextPage, Page, PaginationState};
