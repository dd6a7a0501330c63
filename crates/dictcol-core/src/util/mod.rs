//! Utility module for common helper functions and macros.
//!
//! This module provides:
//! - Safe type conversion macros (`checked_u32`)
//! - Checksum utilities (CRC32)
//! - Atomic file replacement

pub mod atomic;
pub mod checksum;
pub mod convert;

pub use atomic::write_atomic;
pub use checksum::crc32;
pub use convert::checked_u32;
