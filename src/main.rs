use std::sync::atomic::AtomicUsize;
use std::sync::Arc;
use std::time::Duration;

mod config;
mod handler;
mod http;
mod logger;
mod server;

const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::Config::load()?;
    logger::init(&cfg)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.socket_addr()?;

    // Bind failure is fatal; ? carries the cause out of main
    let listener = server::create_listener(addr).map_err(|e| {
        logger::log_error(&format!("Failed to bind {addr}: {e}"));
        e
    })?;

    handler::catalog::preflight(&cfg.store.catalog_file).await;
    logger::log_server_start(&addr, &cfg);

    let cfg = Arc::new(cfg);
    let active_connections = Arc::new(AtomicUsize::new(0));

    let shutdown = server::shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            accepted = listener.accept() => {
                match accepted {
                    Ok((stream, peer_addr)) => server::spawn_connection(
                        stream,
                        peer_addr,
                        Arc::clone(&cfg),
                        Arc::clone(&active_connections),
                    ),
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = &mut shutdown => {
                logger::log_shutdown_started();
                break;
            }
        }
    }

    // Stop accepting, then let in-flight requests finish
    drop(listener);
    server::drain_connections(&active_connections, SHUTDOWN_GRACE).await;
    logger::log_shutdown_complete();

    Ok(())
}
