pub mod forwarding;
pub mod server;

pub use forwarding::{FailoverForwarder, ForwardedResponse};
pub use server::DnsServerHandler;
