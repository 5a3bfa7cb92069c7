//! mep-splice-engine: network duplication and splice repair for MEP models
//!
//! This library copies a selected subset of connected pipe/duct segments and
//! fittings to a new position (a different elevation, a repeated offset, or
//! an arbitrary direction) and then repairs the connectivity the copy
//! breaks, so the original run stays continuous through the duplicated
//! geometry.
//!
//! # Architecture
//!
//! The engine works against an in-memory rendition of the host CAD
//! document. One pass per offset:
//!
//! - **Duplication**: translate-copy the batch via the document's copy
//!   primitive, which preserves topology inside the batch and severs links
//!   that leave it
//! - **Split-point detection**: open end connectors of the duplicates that
//!   land on the interior of an existing segment with a matching profile
//! - **Pair finding**: per host segment, the minimum-distance pair of
//!   mutually opposing split points
//! - **Splice repair**: trim the host segment, synthesise a bridging
//!   segment, and reconnect all four ends
//!
//! All of this happens synchronously inside one document transaction per
//! command; cancellation or an unexpected error rolls the whole
//! transaction back.
//!
//! # Modules
//!
//! - [`config`] — persisted command defaults (step, count, directions)
//! - [`duplicate`] — offset policies and the command entry points
//! - [`error`] — engine and configuration error types
//! - [`geometry`] — points, vectors, bounded lines, bounding boxes
//! - [`host`] — document, elements, connectors, transactions
//! - [`network`] — endpoint/segment wrappers and the working inventory
//! - [`splice`] — split-point detection, pairing, and repair

pub mod config;
pub mod duplicate;
pub mod error;
pub mod geometry;
pub mod host;
pub mod network;
pub mod splice;
