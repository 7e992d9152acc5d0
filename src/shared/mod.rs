pub mod config;
pub mod entities;
pub mod error;
pub mod ports;

pub use config::DashboardConfig;
