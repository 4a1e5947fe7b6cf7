//! HTML parsing and field extraction.

mod html;

// Re-export public API
pub use html::extract_fields;
