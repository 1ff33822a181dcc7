pub mod chrome;
pub mod fleet;
pub mod help;
pub mod overview;
