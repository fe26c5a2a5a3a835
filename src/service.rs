/// Service name and the usual weaknesses of a well-known port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceRecord {
    pub name: &'static str,
    pub vulnerability: &'static str,
}

impl ServiceRecord {
    const fn new(name: &'static str, vulnerability: &'static str) -> Self {
        Self {
            name,
            vulnerability,
        }
    }
}

pub const UNKNOWN: ServiceRecord =
    ServiceRecord::new("Unknown", "Investigate non-standard service");

pub fn lookup(port: u16) -> ServiceRecord {
    match port {
        20 => ServiceRecord::new("FTP Data", "Unauthorized access, data theft"),
        21 => ServiceRecord::new("FTP Control", "Brute-force attacks, anonymous access"),
        22 => ServiceRecord::new("SSH", "Brute-force attacks, outdated SSH exploits"),
        23 => ServiceRecord::new("Telnet", "Clear-text transmission, MITM attacks"),
        25 => ServiceRecord::new("SMTP", "Open relay, email spoofing, spamming"),
        53 => ServiceRecord::new("DNS", "DNS amplification, cache poisoning"),
        80 => ServiceRecord::new("HTTP", "Web app vulnerabilities, XSS, SQL injection"),
        110 => ServiceRecord::new("POP3", "Clear-text emails, credential attacks"),
        143 => ServiceRecord::new("IMAP", "Clear-text emails, IMAP vulnerabilities"),
        443 => ServiceRecord::new("HTTPS", "SSL/TLS misconfigurations, outdated ciphers"),
        3306 => ServiceRecord::new("MySQL", "SQL injection, unauthorized db access"),
        3389 => ServiceRecord::new("RDP", "BlueKeep, brute-force, session hijacking"),
        _ => UNKNOWN,
    }
}
