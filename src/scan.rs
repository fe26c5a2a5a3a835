use std::{
    fmt::Debug,
    net::{Ipv4Addr, SocketAddrV4},
    panic::{self, AssertUnwindSafe},
    sync::{mpsc, Arc},
    time::{Duration, Instant},
};

use rayon::ThreadPoolBuilder;

use crate::{error::ScanError, port::PortRange};

pub use self::{cancel::CancelToken, tcp::TcpConnect, tcp::DEFAULT_TIMEOUT};

mod cancel;
mod tcp;

pub const DEFAULT_WORKERS: usize = 100;

/// Outcome of a single probe.
///
/// Closed covers refused, filtered and unreachable alike: a probe only tells
/// whether the port accepted a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeResult {
    Open(u16),
    Closed,
}

/// Checks a single port. Implementations must not fail: any fault is `Closed`.
pub trait Prober: Debug + Send + Sync + 'static {
    fn probe(&self, addr: SocketAddrV4) -> ProbeResult;
}

/// Receives `(completed, total)` after every finished probe, always from the
/// thread that called [`Scanner::start`].
pub trait Progress {
    fn on_progress(&self, completed: usize, total: usize);
}

impl<F: Fn(usize, usize)> Progress for F {
    fn on_progress(&self, completed: usize, total: usize) {
        self(completed, total)
    }
}

#[derive(Debug)]
pub struct ScanResult {
    pub elapsed: Duration,
    /// Open ports, strictly ascending.
    pub ports: Vec<u16>,
}

impl ScanResult {
    #[inline]
    fn new(elapsed: Duration, ports: Vec<u16>) -> Self {
        Self { elapsed, ports }
    }
}

pub struct Scanner<P> {
    ip: Ipv4Addr,
    range: PortRange,
    workers: usize,
    prober: Arc<P>,
    cancel: CancelToken,
}

impl<P: Prober> Scanner<P> {
    pub fn new(ip: Ipv4Addr, range: PortRange, workers: usize, prober: P) -> Self {
        Self {
            ip,
            range,
            workers,
            prober: Arc::new(prober),
            cancel: CancelToken::new(),
        }
    }

    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Probes every port of the range exactly once with at most `workers` probes
    /// in flight, and returns the open ones in ascending order.
    ///
    /// Results are drained on the calling thread in completion order, which is
    /// the only place the open ports are written to. If the cancel token fires,
    /// queued probes are skipped and the partial result is dropped.
    pub fn start(&self, progress: &dyn Progress) -> Result<ScanResult, ScanError> {
        if self.workers == 0 {
            return Err(ScanError::InvalidWorkerCount);
        }

        let pool = ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .thread_name(|i| format!("probe-{}", i))
            .build()
            .map_err(ScanError::WorkerPoolFailed)?;

        log::debug!(
            "Scanning `{}` ports {} with {} workers",
            self.ip,
            self.range,
            self.workers
        );

        let now = Instant::now();
        let (tx, rx) = mpsc::channel();

        for port in self.range.iter() {
            let tx = tx.clone();
            let prober = Arc::clone(&self.prober);
            let cancel = self.cancel.clone();
            let addr = SocketAddrV4::new(self.ip, port);

            pool.spawn(move || {
                let result = if cancel.is_cancelled() {
                    ProbeResult::Closed
                } else {
                    guarded_probe(&*prober, addr)
                };
                // The receiver outlives every job.
                let _ = tx.send(result);
            });
        }
        // Only the jobs hold senders now, so the loop below ends with the last one.
        drop(tx);

        let total = self.range.len();
        let mut open = Vec::new();

        for (done, result) in rx.iter().enumerate() {
            if let ProbeResult::Open(port) = result {
                if self.range.contains(port) {
                    open.push(port);
                }
            }
            progress.on_progress(done + 1, total);
        }

        if self.cancel.is_cancelled() {
            log::debug!("Scan cancelled, discarding {} open ports", open.len());
            return Err(ScanError::Interrupted);
        }

        open.sort_unstable();
        open.dedup();

        Ok(ScanResult::new(now.elapsed(), open))
    }
}

fn guarded_probe<P: Prober>(prober: &P, addr: SocketAddrV4) -> ProbeResult {
    panic::catch_unwind(AssertUnwindSafe(|| prober.probe(addr))).unwrap_or_else(|_| {
        log::debug!("Probe of `{}` panicked, marking it closed", addr);
        ProbeResult::Closed
    })
}
