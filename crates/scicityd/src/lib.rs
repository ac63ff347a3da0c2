//! Scicity Daemon - web-served guide for Science City Kolkata
//!
//! Routes free-text questions by keyword topic (venue / science /
//! off-topic), drives the multi-turn visit-planning dialogue, and fronts
//! the Gemini completion API behind a credential-rotating gateway.

pub mod classifier;
pub mod config;
pub mod conversation;
pub mod gateway;
pub mod routes;
pub mod server;
pub mod sessions;
