pub mod controller;
pub mod loop_worker;
pub mod pipeline;

pub use controller::CaptureController;
pub use pipeline::ContextPipeline;
