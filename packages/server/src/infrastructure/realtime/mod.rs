//! Realtime delivery: the set of live sessions and the inbound message pipeline.

pub mod pipeline;
pub mod registry;

pub use pipeline::{BroadcastPipeline, PipelineConsumer};
pub use registry::{ConnectionRegistry, FanOutReport, SessionHandle, SessionId};
