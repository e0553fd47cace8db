//! HTTP surface of the painting catalog service.
//!
//! Public gallery reads plus an admin area gated on a Bearer token with the
//! `admin` role. Multi-step persistence (blob uploads, compensating
//! actions) lives in [`catalog::service`]; the optimistic admin-list cache
//! in [`catalog::cache`].

pub mod auth;
pub mod catalog;
pub mod config;
pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
