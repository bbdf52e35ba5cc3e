//! Attribute & tag mapping tables
//!
//!     HTML and JSX disagree on a handful of names. This module holds the static tables that
//!     bridge them:
//!
//!     | Table                | Used by    | Example                         |
//!     |----------------------|------------|---------------------------------|
//!     | [`AttributeMap`]     | transpile  | `class` → `className`           |
//!     | SVG presentation     | transpile  | `stroke-width` → `strokeWidth`  |
//!     | [`TAG_ALIASES`]      | sanitize   | `b` → `strong`                  |
//!     | [`ElementPolicy`]    | transpile  | `img` must self-close           |
//!
//!     Lookups are case-insensitive and total: unknown names come back unchanged.
//!
//!     The tables are process-wide and immutable. Stages receive them by reference
//!     (`AttributeMap::standard()`, `ElementPolicy::standard()`) instead of reaching for
//!     globals, so a test can build a reduced table and inject it.

pub mod attributes;
pub mod elements;

pub use attributes::{
    is_event_handler, is_script_url, map_attribute_name, AttributeMap, EventHandlerPolicy,
};
pub use elements::{
    canonical_tag_name, is_void_element, tag_alias, ElementKind, ElementPolicy, TAG_ALIASES,
};

/// Convert a kebab-case name to camelCase.
///
/// Every segment after the first gets its first letter uppercased, so a leading dash
/// (vendor prefixes) yields a capitalized result: `-webkit-box` → `WebkitBox`.
pub fn camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for (index, segment) in name.split('-').enumerate() {
        if index == 0 {
            out.push_str(segment);
            continue;
        }
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}
