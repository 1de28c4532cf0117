//! Browser adapters for the chatty-core ports.

pub mod api;
pub mod storage;

#[cfg(test)]
mod tests;
