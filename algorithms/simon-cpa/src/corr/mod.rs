//! Pearson correlation engine (component C4), batch and streaming.

pub mod batch;
pub mod stream;

pub use batch::correlate;
pub use stream::StreamingCorrelator;
