// Server module entry point
// Listener construction, per-connection serving, graceful shutdown.

mod connection;
mod listener;
mod shutdown;

pub use connection::spawn_connection;
pub use listener::create_listener;
pub use shutdown::{drain_connections, shutdown_signal};
