//! Small helpers shared across the store primitives

mod is_plain_object;
mod warning;

pub use is_plain_object::is_plain_object;
pub use warning::warning;
