pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod generation;
pub mod server;
pub mod services;
pub mod sources;
