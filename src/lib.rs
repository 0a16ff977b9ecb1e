// Site console library - exposes the interpreter core and the terminal host

pub mod config;
pub mod console;
pub mod content;
pub mod services;

#[cfg(feature = "runtime")]
pub mod app;
#[cfg(feature = "runtime")]
pub mod view;
