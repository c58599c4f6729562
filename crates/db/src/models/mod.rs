//! Entity structs and query DTOs.

pub mod entry;
