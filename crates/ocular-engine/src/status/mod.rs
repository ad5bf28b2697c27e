//! Per-eye status fan-out.
//!
//! Observers receive the raw head position, orientation and projection once
//! per eye per frame, synchronously, in render order.

mod registry;

pub use registry::{ListenerId, StatusListener, StatusListenerRegistry};
