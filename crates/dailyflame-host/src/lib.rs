pub mod command;
pub mod config;
pub mod error;
pub mod registry;
pub mod render;
pub mod session;
pub mod store;
pub mod surface;
