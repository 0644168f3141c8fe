//! Core domain types and traits for the resourcery service.
//!
//! This crate is free of I/O: it defines the `Resource` entity, the cache
//! key scheme and byte codec, the storage and cache trait boundaries, and
//! the event types published on mutations. Concrete backends live in the
//! server crate.

pub mod cache;
pub mod resource;
pub mod storage;
