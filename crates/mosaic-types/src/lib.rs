//! Foundation types for PLAYMOSAIC.
//!
//! This crate contains the plain data shared by the layout engine and its
//! callers: library items, the viewport, layout configuration, and error
//! types. It performs no layout work itself.

pub mod config;
pub mod error;
pub mod item;
