//! Domain models for saved links.
//!
//! - [`LinkRecord`] is the normalized record held by the repository.
//! - [`RawLinkRecord`] is the lenient wire shape returned by the remote API
//!   and accepted by backup import.
//! - [`validate_url`] gates every create and update.

mod link;
mod raw;
mod validation;

pub use link::*;
pub use raw::*;
pub use validation::*;
