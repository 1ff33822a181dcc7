// App module for the leaderboard dashboard
// Holds screen state and routes key presses

pub mod input;
pub mod state;

pub use input::handle_input;
pub use state::{App, AppEvent, AppScreen};
