pub mod input;
pub mod physics;
pub mod state;

pub use input::{handle_input, poll_input, Control, InputEvent, KeyTracker, ReleaseMode};
pub use physics::{update, FrameEvents};
pub use state::{GameState, Side};
