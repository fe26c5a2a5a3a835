use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("port `{0}` is invalid (use ports between 1 and 65535)")]
    InvalidPort(String),
    #[error("invalid port range `{0}-{1}` (use ports between 1 and 65535)")]
    InvalidRange(u32, u32),
    #[error("worker count must be greater than zero")]
    InvalidWorkerCount,
    #[error("connect timeout must be greater than zero")]
    InvalidTimeout,
    #[error("failed to check target kind (ensure it's a domain or IPv4)")]
    HostParseFailed(#[source] url::ParseError),
    #[error("failed to resolve the given target: {0}")]
    ResolverFailed(#[source] std::io::Error),
    #[error("resolver didn't find any IPv4 address mapped by `{0}`")]
    DomainLookupFailed(String),
    #[error("only supports IPv4 addresses or domains that map addresses with this IP version")]
    OnlyIpv4TargetSupported,
    #[error("failed to start worker pool: {0}")]
    WorkerPoolFailed(#[source] rayon::ThreadPoolBuildError),
    #[error("failed to install signal handler: {0}")]
    SignalHandlerFailed(#[source] std::io::Error),
    #[error("scan interrupted by user")]
    Interrupted,
}
