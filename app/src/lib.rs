//! Task list web application
//!
//! A browser page and a JSON endpoint for creating, listing, toggling,
//! editing and deleting todos.

pub mod config;
pub mod controllers;
pub mod middleware;
pub mod migrations;
pub mod models;
pub mod routes;
pub mod store;
pub mod views;
