pub mod domain;
pub mod errors;
pub mod ports;
pub mod services;
pub mod validation;

pub use errors::CoreError;
