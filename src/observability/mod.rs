//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Every inbound request:
//!     → tracing.rs (segment span, trace header in/out)
//!     → logging.rs (structured log events inside the span)
//!     → metrics.rs (counters, histograms)
//!
//! Outbound lookup:
//!     → tracing.rs (subsegment header sent upstream)
//! ```

pub mod logging;
pub mod metrics;
pub mod tracing;

pub use self::tracing::{SegmentContext, SegmentNamer, TraceHeader, TRACE_HEADER};
