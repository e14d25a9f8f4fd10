//! Testing helpers for [Peermap](https://docs.rs/peermap).
pub mod configuration;
pub mod fixtures;
pub mod random;
