//! HTTP middleware.

pub mod trace;

pub use self::trace::{Trace, TraceId, TRACE_ID_HEADER};
