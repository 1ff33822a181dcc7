// Export our modules for use in binaries and tests
pub mod config;
pub mod domain;
pub mod loader;
pub mod render;
pub mod roster;
pub mod tabs;

pub use domain::{Entity, Subsystem, LEADERBOARD};
pub use loader::{FleetCache, LoadOrchestrator, LoadState};
pub use render::{CardRenderer, FleetFragment, FleetRenderer};
pub use tabs::{Switch, SwitchTicket, TabController, TabView};
