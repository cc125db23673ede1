//! # House model
//!
//! The parametric house itself: the object graph ([`graph`]), the pure
//! construction logic ([`builder`]), the incremental parameter updates
//! ([`update`]), and the per-frame animation math ([`animate`]).
//!
//! Construction and mutation are CPU-only; GPU buffers for each part are
//! created lazily by the renderer the first time the part is drawn. That
//! keeps the whole module unit-testable without a device.

pub mod animate;
pub mod builder;
pub mod graph;
pub mod update;

pub use builder::build;
pub use graph::{HouseGraph, HouseStyle, Marker, Part, Window};
pub use update::apply;
