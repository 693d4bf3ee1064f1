//! # ptrmap common
//!
//! Types shared by every crate in the workspace: the run [`config::Config`],
//! IPv4 range handling and CIDR summarization ([`network`]), display colors and
//! the error types surfaced when user input is rejected.

pub mod color;
pub mod config;
pub mod error;
pub mod network;
pub mod utils;
