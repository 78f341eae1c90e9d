//! HTTP client for the hosted chat backend.
//!
//! Implements [`ChatApi`](crate::ChatApi) over the backend's JSON REST
//! endpoints, plus the two read-only calls the host uses directly:
//! conversation history and tenant widget settings.

mod api;
mod client;
mod config;


pub use client::HttpChatApi;
pub use config::HttpApiConfig;
