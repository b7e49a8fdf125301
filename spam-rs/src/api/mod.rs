//! HTTP surface for spam-rs
//!
//! Serves the single-page classification form and a JSON API

pub mod handlers;
pub mod server;
pub mod web;

pub use server::ApiServer;
