//! FISH Probe Designer - Probe Design Tool
//!
//! Scans a DNA sequence with a sliding window and keeps the windows whose
//! GC content and melting temperature fall inside the requested ranges.

pub mod design;

pub use design::*;
