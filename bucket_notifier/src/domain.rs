pub mod email;
pub mod models;
pub mod ports;
pub mod scratch;
pub mod services;
