use crate::mac::{MacAddress, ParseError};
use log::{info, warn};
use rand::Rng;
use std::io;
use std::net::UdpSocket;
use std::thread;
use std::time::Duration;
use thiserror::Error;

const SYNCHRONIZATION_SCHEME: [u8; 6] = [0xff; 6];
const MAC_REPETITIONS: usize = 16;

/// 6 sync bytes plus 16 repetitions of the 6-octet address.
pub const MAGIC_PACKET_LEN: usize = 6 + MAC_REPETITIONS * 6;

#[derive(Error, Debug)]
pub enum SendError {
    #[error("{0}")]
    BadAddress(#[from] ParseError),
    #[error("network send failed: {0}")]
    Io(#[from] io::Error),
}

/// The 102-byte wake payload for one device.
pub struct MagicPacket {
    payload: [u8; MAGIC_PACKET_LEN],
}

impl MagicPacket {
    pub fn new(mac: &MacAddress) -> MagicPacket {
        let mut payload = [0u8; MAGIC_PACKET_LEN];
        payload[..6].copy_from_slice(&SYNCHRONIZATION_SCHEME);
        for repetition in payload[6..].chunks_exact_mut(6) {
            repetition.copy_from_slice(&mac.octets());
        }
        MagicPacket { payload }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.payload
    }

    /// Sends the payload as a single broadcast datagram to
    /// `(broadcast, port)`. The socket lives for exactly one send.
    pub fn broadcast(&self, broadcast: &str, port: u16) -> io::Result<()> {
        let socket = UdpSocket::bind("0.0.0.0:0")?;
        socket.set_broadcast(true)?;
        socket.send_to(&self.payload, (broadcast, port))?;
        Ok(())
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum InvalidDelayRange {
    #[error("delay bound {0}s is not a valid non-negative duration")]
    BadBound(f64),
    #[error("delay minimum {0:?} exceeds maximum {1:?}")]
    Inverted(Duration, Duration),
}

/// Bounds for the random pause between consecutive sends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DelayRange {
    min: Duration,
    max: Duration,
}

impl DelayRange {
    pub const NONE: DelayRange = DelayRange {
        min: Duration::ZERO,
        max: Duration::ZERO,
    };

    pub fn new(min: Duration, max: Duration) -> Result<DelayRange, InvalidDelayRange> {
        if min > max {
            return Err(InvalidDelayRange::Inverted(min, max));
        }
        Ok(DelayRange { min, max })
    }

    pub fn from_secs(min: f64, max: f64) -> Result<DelayRange, InvalidDelayRange> {
        let min_d =
            Duration::try_from_secs_f64(min).map_err(|_| InvalidDelayRange::BadBound(min))?;
        let max_d =
            Duration::try_from_secs_f64(max).map_err(|_| InvalidDelayRange::BadBound(max))?;
        DelayRange::new(min_d, max_d)
    }

    /// Draws a uniform pause from `[min, max]`, or `None` when the
    /// maximum is zero and pacing is disabled.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Option<Duration> {
        if self.max.is_zero() {
            return None;
        }
        Some(rng.gen_range(self.min..=self.max))
    }
}

/// Per-run parameters for a batch send. Defaults live with the caller,
/// not here.
#[derive(Clone, Debug)]
pub struct SendOptions {
    pub broadcast: String,
    pub port: u16,
    pub delay: DelayRange,
}

/// Outcome of one batch: original inputs partitioned by result, each
/// list in input order.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub successes: Vec<String>,
    pub failures: Vec<(String, String)>,
}

impl BatchReport {
    pub fn all_succeeded(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Normalizes `raw`, builds the magic packet and broadcasts it. Returns
/// the normalized address so callers can display it.
pub fn send_one(raw: &str, broadcast: &str, port: u16) -> Result<MacAddress, SendError> {
    let mac = MacAddress::normalize(raw)?;
    MagicPacket::new(&mac).broadcast(broadcast, port)?;
    Ok(mac)
}

/// Sends a wake packet to every address in `raws`, in order, pausing for
/// a random duration between items. A bad entry is recorded and skipped;
/// it never aborts the rest of the batch.
pub fn send_batch(raws: &[String], opts: &SendOptions) -> BatchReport {
    let mut report = BatchReport::default();
    let mut rng = rand::thread_rng();
    for (i, raw) in raws.iter().enumerate() {
        match send_one(raw, &opts.broadcast, opts.port) {
            Ok(mac) => {
                info!("sent wake packet to {}", mac);
                report.successes.push(raw.clone());
            }
            Err(err) => {
                warn!("could not wake {:?}: {}", raw, err);
                report.failures.push((raw.clone(), err.to_string()));
            }
        }
        if i + 1 < raws.len() {
            if let Some(pause) = opts.delay.sample(&mut rng) {
                thread::sleep(pause);
            }
        }
    }
    report
}
