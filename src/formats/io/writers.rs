//! Embroidery file format writers
//!
//! Each writer module exposes a `write()` function that encodes an
//! `EmbPattern` into the target format's byte layout.

pub mod dst;
pub mod exp;
pub mod jef;
/// Brother PEC section writer (embedded by PES, not exposed on the wire)
pub mod pec;
pub mod pes;
