//! Real-time chat server library.
//!
//! Layers, innermost first: `domain` → `usecase` → `infrastructure` / `ui`.

pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub use config::ServerConfig;
pub use ui::run;
