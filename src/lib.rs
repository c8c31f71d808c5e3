pub mod api;
pub mod config;
pub mod entities;
pub mod migration;
pub mod service;
pub mod store;

#[cfg(test)]
mod test_support;
