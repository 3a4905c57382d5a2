// Upstream dispatch

pub mod client;

pub use client::UpstreamDispatcher;
