pub mod config;
pub mod driver;
pub mod error;
pub mod fetch;
pub mod grouper;
pub mod infra;
pub mod keys;
pub mod locations;
pub mod output;
pub mod parser;
pub mod quota;
pub mod request;
pub mod services;
pub mod stats;
