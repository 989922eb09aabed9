pub mod task;

pub use task::refresh_stale_references;
