// Adapters layer: concrete implementations for external systems (object stores, HTTP).

pub mod http;
pub mod storage;
