mod database;
mod errors;
mod logging;
mod root;
mod server;
mod upstream;
mod zone;

pub use database::DatabaseConfig;
pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
pub use upstream::{TransportProtocol, UpstreamConfig, UpstreamEndpoint};
pub use zone::ZoneConfig;
