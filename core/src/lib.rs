//! # ptrmap core
//!
//! The mapping pipeline: summarize a CIDR range, reverse-resolve every
//! address in it, keep the subnets that answered and render them.
//!
//! * [`resolver`]: the [`resolver::ReverseLookup`] seam and its DNS server and
//!   system implementations.
//! * [`graph`]: subnet/host graph construction.
//! * [`pipeline`]: the single linear pass tying the stages together.
//! * [`render`]: interactive HTML and per-subnet PNG output.

pub mod error;
pub mod graph;
pub mod pipeline;
pub mod render;
pub mod resolver;

pub use error::MapError;
pub use graph::SubnetGraph;
