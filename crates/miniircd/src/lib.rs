pub mod channel;
pub mod client;
pub mod config;
pub mod connection;
pub mod constants;
pub mod dispatch;
pub mod errors;
pub mod framer;
pub mod handlers;
pub mod message;
pub mod registry;
pub mod replies;
pub mod server;
