//! Model façade over the Track.
//!
//! # Responsibility
//! - Pair the Track with its filtered views, preferences and clock.
//! - Offer the derived queries used by commands and presentation.
//!
//! # See also
//! - `crate::logic` for the command-level policy built on top of this layer.

pub mod track_service;
