//! Registry implementations for fetching Go release versions

pub mod tags;

pub use tags::GoTagRegistry;
