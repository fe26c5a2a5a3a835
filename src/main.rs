use std::{io, process, time::Duration};

use anyhow::Result;
use chrono::Local;
use clap::{arg, crate_authors, crate_name, crate_version, ArgAction, ArgMatches, Command};
use portfinder::{
    error::ScanError,
    interrupt, logger,
    port::{self, PortRange, DEFAULT_END_PORT, DEFAULT_START_PORT},
    progress::TerminalProgress,
    report, resolver,
    scan::{Scanner, TcpConnect, DEFAULT_TIMEOUT, DEFAULT_WORKERS},
};

#[derive(Debug)]
struct ParsedArgs {
    debug: bool,
    range: PortRange,
    workers: usize,
    timeout: Duration,
    target: String,
}

fn parse_args(matches: ArgMatches) -> Result<ParsedArgs, ScanError> {
    let debug = matches.get_flag("debug");

    let start = match matches.get_one::<String>("start_port") {
        Some(raw) => port::parse(raw)?,
        None => DEFAULT_START_PORT.into(),
    };
    let end = match matches.get_one::<String>("end_port") {
        Some(raw) => port::parse(raw)?,
        None => DEFAULT_END_PORT.into(),
    };
    let range = PortRange::new(start, end)?;

    let workers = *matches.get_one::<usize>("workers").unwrap_or(&DEFAULT_WORKERS);
    if workers == 0 {
        return Err(ScanError::InvalidWorkerCount);
    }

    let timeout = matches
        .get_one::<u64>("timeout")
        .map_or(DEFAULT_TIMEOUT, |&ms| Duration::from_millis(ms));
    if timeout.is_zero() {
        return Err(ScanError::InvalidTimeout);
    }

    let target = matches
        .get_one::<String>("target")
        .cloned()
        .unwrap_or_default();

    Ok(ParsedArgs {
        debug,
        range,
        workers,
        timeout,
        target,
    })
}

fn command() -> Command {
    Command::new(crate_name!())
        .about(
            "TCP connect scanner that reports open ports along with the\n\
            service and common weaknesses of well-known ones.",
        )
        .version(crate_version!())
        .arg_required_else_help(true)
        .author(crate_authors!())
        .args([
            arg!(-d --debug "Turns on debugging information").action(ArgAction::SetTrue),
            arg!(-w --workers <N> "Maximum number of probes running at once (default: 100)")
                .value_parser(clap::value_parser!(usize)),
            arg!(-t --timeout <MS> "Connect timeout of each probe in milliseconds (default: 1000)")
                .value_parser(clap::value_parser!(u64)),
        ])
        .args([
            arg!(<target> "Address or hostname to scan"),
            arg!([start_port] "First port of the range (default: 1)"),
            arg!([end_port] "Last port of the range (default: 1024)"),
        ])
}

// Usage errors share the exit code of invalid ports; help and version don't fail.
fn usage_exit_code(error: &clap::Error) -> i32 {
    if error.use_stderr() {
        1
    } else {
        0
    }
}

fn main() -> Result<()> {
    let arg_matches = command().try_get_matches().unwrap_or_else(|e| {
        let _ = e.print();
        process::exit(usage_exit_code(&e));
    });

    // Extract arguments.
    let parsed = parse_args(arg_matches)?;

    // Set debug if desired.
    if parsed.debug {
        logger::init();
    }

    // Parse target.
    let ip = resolver::lookup(&parsed.target)?;

    let cancel = interrupt::install()?;

    let mut stdout = io::stdout().lock();
    let started = Local::now();
    let shown = report::banner(&mut stdout).and_then(|_| {
        report::scan_info(&mut stdout, ip, parsed.range, parsed.workers, started)
    });
    if let Err(e) = shown {
        log::debug!("Failed to write scan information: {}", e);
    }

    // Start scanner.
    let progress = TerminalProgress::new(parsed.range.len());
    let result = Scanner::new(
        ip,
        parsed.range,
        parsed.workers,
        TcpConnect::new(parsed.timeout)?,
    )
    .with_cancel(cancel)
    .start(&progress);

    // Show result.
    let shown = match result {
        Ok(result) => report::results(&mut stdout, &result.ports)
            .and_then(|_| report::completed(&mut stdout, Local::now(), result.elapsed)),
        Err(ScanError::Interrupted) => report::interrupted(&mut stdout),
        Err(e) => return Err(e.into()),
    };
    if let Err(e) = shown {
        log::debug!("Failed to write scan results: {}", e);
    }

    Ok(())
}
