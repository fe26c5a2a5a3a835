use std::net::{IpAddr, Ipv4Addr, ToSocketAddrs};

use url::Host;

use crate::error::ScanError;

/// Resolves a hostname or IPv4 literal into the address that will be scanned.
///
/// Domains resolve to their first IPv4 address, IPv6 targets are refused.
pub fn lookup(target: &str) -> Result<Ipv4Addr, ScanError> {
    match Host::parse(target).map_err(ScanError::HostParseFailed)? {
        Host::Domain(domain) => resolve_domain(&domain),
        Host::Ipv4(ip) => {
            log::debug!("Target `{}` is already an IPv4 address", ip);
            Ok(ip)
        }
        Host::Ipv6(_) => Err(ScanError::OnlyIpv4TargetSupported),
    }
}

fn resolve_domain(domain: &str) -> Result<Ipv4Addr, ScanError> {
    // The port is irrelevant, resolution only needs a socket address shape.
    let mut addrs = (domain, 0)
        .to_socket_addrs()
        .map_err(ScanError::ResolverFailed)?;

    let ip = addrs
        .find_map(|addr| match addr.ip() {
            IpAddr::V4(ip) => Some(ip),
            IpAddr::V6(_) => None,
        })
        .ok_or_else(|| ScanError::DomainLookupFailed(domain.into()))?;

    log::debug!("Domain `{}` resolved to IPv4 `{}`", domain, ip);

    Ok(ip)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ipv4_literal_is_taken_as_is() {
        assert_eq!(lookup("127.0.0.1").unwrap(), Ipv4Addr::LOCALHOST);
        assert_eq!(lookup("10.1.2.3").unwrap(), Ipv4Addr::new(10, 1, 2, 3));
    }

    #[test]
    fn ipv6_literal_is_rejected() {
        assert!(matches!(
            lookup("[::1]"),
            Err(ScanError::OnlyIpv4TargetSupported)
        ));
    }

    #[test]
    fn empty_target_fails_to_parse() {
        assert!(matches!(lookup(""), Err(ScanError::HostParseFailed(_))));
    }

    #[test]
    fn malformed_target_fails_to_parse() {
        assert!(matches!(
            lookup("exa mple.com"),
            Err(ScanError::HostParseFailed(_))
        ));
    }
}
