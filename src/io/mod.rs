//! File exports (decision JSON, batch CSV).

pub mod export;
