pub mod client;
pub mod endpoint;
pub mod proxy_protocol;
pub mod services;
