//! HTTP handlers for the admin console

pub mod admin;
pub mod dashboard;
pub mod health;
pub mod routes;
