//! HTTP surface of the GLPI to Slack notification relay.
//!
//! [`config::RelayConfig`] describes the bindings, [`binder::RouteBinder`]
//! registers one POST route per valid binding, and [`api::router`] adds the
//! health probe and request tracing around them.

pub mod api;
pub mod binder;
pub mod config;
pub mod error;
pub mod handler;
pub mod telemetry;
