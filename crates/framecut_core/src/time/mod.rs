//! Exact frame-to-time conversion.
//!
//! # Features
//!
//! - **Rates**: frame rates are exact ratios (`24000/1001`), never floats
//! - **VFR**: piecewise timelines of fixed-rate segments
//! - **Rendering**: `HH:MM:SS[.fff]` at 0, 3, 6, 9… sub-second digits
//!
//! # Usage
//!
//! ```
//! use framecut_core::time::{to_timestamp, FrameRate};
//!
//! let rate = FrameRate::new(5, 1).unwrap();
//! assert_eq!(to_timestamp(rate, 69, 3).unwrap(), "00:00:13.800");
//! ```

mod clock;
mod rate;
mod timeline;
mod timestamp;

pub use clock::{Clock, FrameClock, ResolvedClock};
pub use rate::{FrameRate, Seconds};
pub use timeline::{RateSegment, RateTimeline};
pub use timestamp::{format_seconds, to_timestamp, to_timestamp_vfr, Precision, Timestamper};
