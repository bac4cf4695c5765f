pub mod action;
pub mod region;
pub mod snapshot;

pub use action::{ActionKind, InputEvent, MouseButton, UserAction};
pub use region::{ContentType, Region};
pub use snapshot::{ContextSnapshot, OrganizedWindowText};
