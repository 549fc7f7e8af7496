//! Headless slopegraph model: tables, segment construction, styling and
//! configuration, with no rendering or I/O.
//!
//! The crate is small and synchronous. A [`Table`] of named
//! observations over ordered periods goes in; [`build_segments`] turns it
//! into data-space [`Segment`]s, and [`SlopegraphConfig`] describes how a
//! renderer should draw them. Everything here is deterministic: the same
//! table and config always produce the same segments and resolved styles.

#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod geom;
pub mod segment;
pub mod style;
pub mod table;
pub mod theme;

pub use config::{MarginSpec, Margins, SlopegraphConfig};
pub use error::{Error, Result};
pub use segment::{Segment, build_segments};
pub use style::{FontSpec, LineType, ResolvedStyles, StyleSpec, TextAnchor};
pub use table::Table;
pub use theme::Theme;
