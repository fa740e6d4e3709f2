//! Middleware components for the admin console

pub mod cors;
pub mod logging;
