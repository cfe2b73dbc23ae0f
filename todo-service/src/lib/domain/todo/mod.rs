pub mod errors;
pub mod models;
pub mod ports;
pub mod rules;
pub mod service;
