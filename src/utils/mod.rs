pub mod data_url;
pub mod error;
pub mod logger;
pub mod validation;
