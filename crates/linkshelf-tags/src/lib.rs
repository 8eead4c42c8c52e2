//! linkshelf-tags: tag normalization, tag-list parsing, and tag chips.
//!
//! Tags are flat, lowercase labels attached to a saved link. On the wire they
//! travel as a single comma-joined string (`"rust,blog"`); in memory they are
//! an ordered list of normalized strings.

pub mod autocomplete;
pub mod config;
pub mod parse;
pub mod tag;

pub use autocomplete::{Suggestion, TagIndex};
pub use config::{default_tag_color, DEFAULT_TAG_COLORS};
pub use parse::{append_tag_input, format_tag_input, join_tags, normalize_tags, parse_tag_list};
pub use tag::{any_tag_contains, normalize_tag, TagChip, TagColor};
