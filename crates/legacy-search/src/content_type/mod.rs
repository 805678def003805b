//! Content type criterion translation.
//!
//! Expressions refer to `c` = `ezcontentclass`. The content type gateway
//! restricts `c` to defined types (`c.version = 0`).

mod converter;
mod handlers;

pub use converter::ContentTypeCriteriaConverter;
pub use handlers::ContentTypeCriterionHandler;
