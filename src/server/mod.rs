//! HTTP API over the sync client

pub mod api;
