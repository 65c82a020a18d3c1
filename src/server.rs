use std::cell::{Cell, RefCell};
use std::net::SocketAddr;
use std::rc::Rc;

use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, error, info, instrument};

use crate::commands::executable::Executable;
use crate::commands::Command;
use crate::connection::{Connection, Drained};
use crate::frame::Frame;
use crate::store::Store;
use crate::Error;

#[derive(Debug, Clone)]
pub struct Config {
    pub address: String,
    pub port: u16,
    pub read_buffer_size: usize,
    /// Run an active expiration pass every this many commands.
    pub sweep_interval: u64,
    /// Entries examined per active expiration pass.
    pub sweep_max_checks: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            address: "127.0.0.1".to_string(),
            port: 6379,
            read_buffer_size: 8 * 1024,
            sweep_interval: 1024,
            sweep_max_checks: 20,
        }
    }
}

/// State shared by every connection task. The whole server runs on one
/// thread (current-thread runtime driven through a LocalSet), so plain
/// Rc/RefCell stand in for any synchronization; store borrows never span
/// an await point.
struct Shared {
    store: RefCell<Store>,
    commands_since_sweep: Cell<u64>,
    config: Config,
}

impl Shared {
    /// Accounts a batch of executed commands, running an active expiration
    /// pass whenever the counter crosses the configured interval.
    fn note_processed(&self, count: u64) {
        let total = self.commands_since_sweep.get() + count;
        if total >= self.config.sweep_interval {
            self.store.borrow_mut().sweep(self.config.sweep_max_checks);
            self.commands_since_sweep.set(0);
        } else {
            self.commands_since_sweep.set(total);
        }
    }
}

/// Binds the listener and serves connections until the task is dropped.
/// Must run inside a `tokio::task::LocalSet` on a current-thread runtime;
/// setup failures (bind) are the only errors that propagate out.
pub async fn run(config: Config) -> Result<(), Error> {
    let _ = tracing_subscriber::fmt()
        .try_init()
        .map_err(|e| debug!("Failed to initialize global tracing: {}", e));

    let listener = TcpListener::bind((config.address.as_str(), config.port)).await?;
    info!("Listening on {}", listener.local_addr()?);

    let shared = Rc::new(Shared {
        store: RefCell::new(Store::new()),
        commands_since_sweep: Cell::new(0),
        config,
    });

    loop {
        let (socket, client_address) = listener.accept().await?;
        debug!("Accepted connection from {:?}", client_address);

        let shared = Rc::clone(&shared);
        tokio::task::spawn_local(async move {
            if let Err(e) = handle_connection(socket, client_address, shared).await {
                // Transport errors are confined to this client.
                error!("Connection error: {}", e);
            }
        });
    }
}

#[instrument(name = "connection", skip(stream, shared))]
async fn handle_connection(
    stream: TcpStream,
    client_address: SocketAddr,
    shared: Rc<Shared>,
) -> Result<(), Error> {
    let mut conn = Connection::new(stream, shared.config.read_buffer_size);

    loop {
        if conn.read().await? == 0 {
            debug!("Connection closed by peer");
            return Ok(());
        }

        let mut processed = 0;
        let mut poisoned = false;
        loop {
            match conn.drain_frame() {
                Drained::Frame(frame) => {
                    debug!("Received frame: {:?}", frame);
                    let reply = dispatch(&shared, frame);
                    conn.queue_reply(&reply);
                    processed += 1;
                }
                Drained::Idle => break,
                Drained::ProtocolError => {
                    // The rest of the batch is ambiguous once framing is
                    // lost; answer once and hang up.
                    conn.queue_reply(&Frame::Error("ERR protocol error".to_string()));
                    poisoned = true;
                    break;
                }
            }
        }

        shared.note_processed(processed);
        conn.flush().await?;

        if poisoned {
            debug!("Closing connection after protocol error");
            return Ok(());
        }
        conn.reclaim();
    }
}

fn dispatch(shared: &Shared, frame: Frame) -> Frame {
    match Command::from_frame(frame) {
        Ok(command) => {
            let mut store = shared.store.borrow_mut();
            command.exec(&mut store)
        }
        Err(err) => err.into(),
    }
}
