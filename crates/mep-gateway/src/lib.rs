//! HTTP gateway serving the MEP Digital Ecosystem dashboard.
pub mod dashboard_server;

pub use dashboard_server::*;
