// ABOUTME: Extraction passes that turn a parsed page into partial JobFields.
// ABOUTME: Structured data (meta tags, JSON-LD, title) first, then site-pattern and generic selectors.

//! Extraction passes.
//!
//! Every pass is a pure function from a [`Queryable`](crate::dom::Queryable)
//! document to [`JobFields`](crate::record::JobFields). The orchestrator folds
//! them together in precedence order.
//!
//! Submodules:
//! - `patterns`: the site pattern registry and its embedded data.
//! - `structured`: meta tags, JSON-LD and the title fallback.
//! - `json_ld`: schema.org JobPosting mapping.
//! - `selectors`: site-pattern and generic selector passes.

pub mod json_ld;
pub mod patterns;
pub mod selectors;
pub mod structured;
