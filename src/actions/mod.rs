pub mod history;
pub mod recorder;
pub mod tracker;

pub use history::ActionLog;
pub use recorder::ActionRecorder;
pub use tracker::InputTracker;
