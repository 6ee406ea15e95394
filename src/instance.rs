use std::io::{self, BufRead, BufReader, Write};
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4, TcpListener, TcpStream};
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};

pub const INSTANCE_PORT: u16 = 47813;
const CONNECT_TIMEOUT: Duration = Duration::from_secs(2);
const READ_TIMEOUT: Duration = Duration::from_millis(500);

pub fn instance_addr() -> SocketAddr {
    SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::LOCALHOST, INSTANCE_PORT))
}

/// Outcome of the startup handshake between viewer processes.
pub enum Instance {
    /// This process owns the port. `None` when the port could not be bound
    /// for another reason; the viewer then runs standalone.
    Primary(Option<TcpListener>),
    /// An earlier process took the paths; this one should exit.
    Forwarded,
}

pub fn acquire(addr: SocketAddr, paths: &[PathBuf]) -> Instance {
    match TcpListener::bind(addr) {
        Ok(listener) => {
            log::debug!("Listening for forwarded paths on {addr}");
            Instance::Primary(Some(listener))
        }
        Err(err) if err.kind() == io::ErrorKind::AddrInUse => match forward(addr, paths) {
            Ok(()) => {
                log::info!("Forwarded {} path(s) to running viewer", paths.len());
                Instance::Forwarded
            }
            Err(err) => {
                log::warn!("Could not reach running viewer: {err:#}");
                Instance::Primary(None)
            }
        },
        Err(err) => {
            log::warn!("Single-instance port {addr} unavailable: {err}");
            Instance::Primary(None)
        }
    }
}

/// Sends one UTF-8 path per line, then closes the connection.
pub fn forward(addr: SocketAddr, paths: &[PathBuf]) -> Result<()> {
    let mut stream = TcpStream::connect_timeout(&addr, CONNECT_TIMEOUT)
        .with_context(|| format!("Cannot connect to {addr}"))?;
    for path in paths {
        let absolute = std::path::absolute(path).unwrap_or_else(|_| path.clone());
        writeln!(stream, "{}", absolute.to_string_lossy()).context("Cannot send path")?;
    }
    stream.flush().context("Cannot flush forwarded paths")?;
    Ok(())
}

/// Accepts connections on a background thread. Each connection yields one
/// batch, possibly empty, and `notify` runs after every batch so the UI can
/// wake up, drain the receiver and raise its window.
pub fn listen<F>(listener: TcpListener, notify: F) -> Receiver<Vec<PathBuf>>
where
    F: Fn() + Send + 'static,
{
    let (sender, receiver) = mpsc::channel();
    let spawned = thread::Builder::new()
        .name("instance-listener".to_string())
        .spawn(move || {
            for stream in listener.incoming() {
                let stream = match stream {
                    Ok(stream) => stream,
                    Err(err) => {
                        log::warn!("Instance connection failed: {err}");
                        continue;
                    }
                };
                if sender.send(read_batch(stream)).is_err() {
                    return;
                }
                notify();
            }
        });
    if let Err(err) = spawned {
        log::warn!("Could not start instance listener: {err}");
    }
    receiver
}

/// Reads paths until the peer closes or stays silent past `READ_TIMEOUT`.
fn read_batch(stream: TcpStream) -> Vec<PathBuf> {
    if let Err(err) = stream.set_read_timeout(Some(READ_TIMEOUT)) {
        log::warn!("Cannot bound read on forwarded connection: {err}");
        return Vec::new();
    }
    BufReader::new(stream)
        .lines()
        .map_while(|line| line.ok())
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .map(PathBuf::from)
        .collect()
}
