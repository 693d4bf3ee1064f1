//! Integration tests for the mapping pipeline, run against a loopback DNS
//! server.

mod mapping;
