// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod alert;
pub mod app_dirs;
pub mod cache;
pub mod exercises;
pub mod runtime;
pub mod session;
pub mod store;
pub mod util;
