use std::net::{Ipv4Addr, TcpListener};

use portfinder::{
    port::PortRange,
    report,
    scan::{Scanner, TcpConnect},
};

fn silent(_: usize, _: usize) {}

#[test]
fn finds_loopback_listener() {
    let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).unwrap();
    let port = listener.local_addr().unwrap().port();
    let range = PortRange::new(port.saturating_sub(50).max(1).into(), port.into()).unwrap();

    let result = Scanner::new(Ipv4Addr::LOCALHOST, range, 16, TcpConnect::default())
        .start(&silent)
        .unwrap();

    assert!(result.ports.contains(&port));
    assert!(result.ports.windows(2).all(|w| w[0] < w[1]));
    assert!(result.ports.iter().all(|&p| range.contains(p)));
}

#[test]
fn listener_is_reported_as_unknown_service() {
    let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).unwrap();
    let port = listener.local_addr().unwrap().port();
    let range = PortRange::new(port.into(), port.into()).unwrap();

    let result = Scanner::new(Ipv4Addr::LOCALHOST, range, 1, TcpConnect::default())
        .start(&silent)
        .unwrap();
    assert_eq!(result.ports, vec![port]);

    colored::control::set_override(false);
    let mut out = Vec::new();
    report::results(&mut out, &result.ports).unwrap();
    let out = String::from_utf8(out).unwrap();

    assert_eq!(out.matches("Port ").count(), 1);
    assert!(out.contains(&format!("Port {} - Unknown", port)));
    assert!(out.contains("Investigate non-standard service"));
}

#[test]
fn released_port_stays_closed_across_scans() {
    let port = {
        let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).unwrap();
        listener.local_addr().unwrap().port()
    };
    let range = PortRange::new(port.into(), port.into()).unwrap();

    for _ in 0..2 {
        let result = Scanner::new(Ipv4Addr::LOCALHOST, range, 4, TcpConnect::default())
            .start(&silent)
            .unwrap();
        assert!(result.ports.is_empty());
    }
}
