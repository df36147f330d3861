//! # wellwork-types
//!
//! Plain data types shared by the WellWork crates: the compressed virtual
//! clock reading, sensor samples, break kinds, averaged telemetry points and
//! the per-cycle report.
//!
//! ## Features
//!
//! - `std` (default): Standard library support
//! - `serde`: Serialization of every type via serde
//!
//! ## Example
//!
//! ```rust
//! use wellwork_types::{BreakKind, VirtualTime};
//!
//! let time = VirtualTime::new(9, 5);
//! assert_eq!(time.to_string(), "9:05");
//! assert!(BreakKind::Coffee.is_due(time));
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod breaks;
mod report;
mod sample;
mod time;

pub use breaks::*;
pub use report::*;
pub use sample::*;
pub use time::*;
