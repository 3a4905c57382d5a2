// Library root for the bundler RPC gate

pub mod api;
pub mod auth;
pub mod config;
pub mod core;
pub mod gate;
pub mod metrics;
pub mod proxy;
