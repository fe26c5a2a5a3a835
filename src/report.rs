use std::{
    io::{self, Write},
    net::Ipv4Addr,
    time::Duration,
};

use chrono::{DateTime, Local};
use colored::Colorize;
use pad::PadStr;

use crate::{port::PortRange, service};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const RULE_WIDTH: usize = 60;
const LABEL_WIDTH: usize = 14;

fn header<W: Write>(out: &mut W, text: &str) -> io::Result<()> {
    writeln!(out, "\n{}", text.bright_cyan().bold())?;
    writeln!(out, "{}", "-".repeat(RULE_WIDTH).bright_cyan())
}

fn info<W: Write>(out: &mut W, label: &str, value: impl std::fmt::Display) -> io::Result<()> {
    let label = format!("{}:", label).pad_to_width(LABEL_WIDTH);
    writeln!(out, "{}{}", label.bright_cyan().bold(), value)
}

pub fn banner<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(
        out,
        "{} {}",
        "PORTFINDER".bright_cyan().bold(),
        format!("v{}", env!("CARGO_PKG_VERSION")).bright_cyan()
    )?;
    writeln!(out, "{}", "TCP connect scanner".bright_cyan())
}

pub fn scan_info<W: Write>(
    out: &mut W,
    target: Ipv4Addr,
    range: PortRange,
    workers: usize,
    started: DateTime<Local>,
) -> io::Result<()> {
    header(out, "Scan Information")?;
    info(out, "Target", target)?;
    info(out, "Port Range", range)?;
    info(out, "Workers", workers)?;
    info(out, "Scan Started", started.format(TIMESTAMP_FORMAT))
}

/// Writes one block per open port, or a single notice when there is none.
///
/// `ports` must already be in ascending order.
pub fn results<W: Write>(out: &mut W, ports: &[u16]) -> io::Result<()> {
    if ports.is_empty() {
        return header(out, "No Open Ports Found");
    }

    header(out, "Scan Results")?;
    for &port in ports {
        let record = service::lookup(port);
        writeln!(
            out,
            "\n{}",
            format!("Port {} - {}", port, record.name).red().bold()
        )?;
        writeln!(
            out,
            "{} {}",
            "Potential Vulnerability:".bright_cyan(),
            record.vulnerability
        )?;
    }

    Ok(())
}

pub fn completed<W: Write>(
    out: &mut W,
    finished: DateTime<Local>,
    elapsed: Duration,
) -> io::Result<()> {
    writeln!(
        out,
        "\n{} {} ({:.4}s)",
        "Scan Completed:".bright_cyan(),
        finished.format(TIMESTAMP_FORMAT),
        elapsed.as_secs_f32()
    )
}

pub fn interrupted<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "\n{}", "Scan interrupted by user.".red())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn rendered(write: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        colored::control::set_override(false);
        let mut out = Vec::new();
        write(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn no_open_ports_notice() {
        let out = rendered(|out| results(out, &[]));

        assert!(out.contains("No Open Ports Found"));
        assert!(!out.contains("Port "));
    }

    #[test]
    fn one_block_per_port_in_order() {
        let out = rendered(|out| results(out, &[22, 80, 8080]));

        let ssh = out.find("Port 22 - SSH").unwrap();
        let http = out.find("Port 80 - HTTP").unwrap();
        let unknown = out.find("Port 8080 - Unknown").unwrap();
        assert!(ssh < http && http < unknown);
        assert_eq!(out.matches("Potential Vulnerability:").count(), 3);
        assert!(out.contains("Potential Vulnerability: Brute-force attacks, outdated SSH exploits"));
        assert!(out.contains("Potential Vulnerability: Investigate non-standard service"));
    }

    #[test]
    fn scan_info_block() {
        let started = Local.with_ymd_and_hms(2024, 5, 1, 13, 4, 5).unwrap();
        let range = PortRange::new(20, 25).unwrap();

        let out = rendered(|out| scan_info(out, Ipv4Addr::LOCALHOST, range, 100, started));

        assert!(out.contains("Scan Information"));
        assert!(out.contains("127.0.0.1"));
        assert!(out.contains("20-25"));
        assert!(out.contains("2024-05-01 13:04:05"));
    }

    #[test]
    fn completion_line() {
        let finished = Local.with_ymd_and_hms(2024, 5, 1, 13, 4, 7).unwrap();

        let out = rendered(|out| completed(out, finished, Duration::from_millis(1500)));

        assert!(out.contains("Scan Completed: 2024-05-01 13:04:07 (1.5000s)"));
    }

    #[test]
    fn interrupted_notice() {
        let out = rendered(|out| interrupted(out));

        assert_eq!(out, "\nScan interrupted by user.\n");
    }
}
