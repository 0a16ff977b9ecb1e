pub mod scheduler;
pub mod time_source;

#[cfg(feature = "runtime")]
pub mod app_dirs;
#[cfg(feature = "runtime")]
pub mod terminal_modes;
#[cfg(feature = "runtime")]
pub mod tracing_setup;
