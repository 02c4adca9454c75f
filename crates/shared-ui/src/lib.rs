//! Styled Dioxus components for the admin dashboard.
//!
//! Each component lives in its own directory with co-located styles and is
//! re-exported both from [`components`] and from the crate root.

pub mod components;

pub use components::*;
