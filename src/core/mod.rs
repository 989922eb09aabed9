pub mod client;
pub mod state;
