pub mod aggregator;
pub mod api;
pub mod config;
pub mod error;
pub mod format;
pub mod models;
pub mod resolver;
pub mod web;
#[cfg(test)]
mod test;

pub const NAME: &str = "regview";
