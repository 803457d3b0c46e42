pub mod config;
pub mod controllers;
pub mod dto;
pub mod error;
pub mod flash;
pub mod middleware;
pub mod server;
pub mod session;
pub mod views;

pub use config::ServerConfig;
pub use server::AppState;
pub use session::{Session, SessionStore};
