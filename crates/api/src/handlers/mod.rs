//! HTTP request handlers.

pub mod entries;
