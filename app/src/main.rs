#[macro_use]
extern crate clap;
#[macro_use]
extern crate log;

use std::io::{self, BufRead, Write};

use anyhow::Result;
use log::LevelFilter;

use gswdump_api as api;
use api::config::Config;
use gswdump_utils::dissectors::link::gsw1xx;
use gswdump_utils::dissectors::Printer;

mod commands;
mod config;
mod frames;

fn log_level(cfg: &Config) -> LevelFilter {
    if cfg.verbose_mode {
        LevelFilter::Debug
    } else if cfg.quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    }
}

/// Start logging at info level, `RUST_LOG` takes precedence over every later level change
fn init_logger() -> Result<()> {
    let mut builder = pretty_env_logger::formatted_builder();
    builder.filter_level(LevelFilter::Debug);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
        builder.try_init()?;
        return Ok(());
    }
    builder.try_init()?;
    log::set_max_level(LevelFilter::Info);
    Ok(())
}

fn set_log_level(level: LevelFilter) {
    if std::env::var_os("RUST_LOG").is_none() {
        log::set_max_level(level);
    }
}

fn print_frames(cfg: &Config, reader: Box<dyn BufRead>, out: &mut dyn Write) -> Result<u64> {
    let mut printer = Printer::new(cfg.verbosity);
    let mut count = 0;

    for (lineno, line) in reader.lines().enumerate() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!("Skipping line {}: {}", lineno + 1, e);
                continue;
            }
        };
        let frame = match frames::parse_line(&line, cfg.snaplen) {
            Ok(Some(frame)) => frame,
            Ok(None) => continue,
            Err(e) => {
                warn!("Skipping line {}: {}", lineno + 1, e);
                continue;
            }
        };
        count += 1;

        match gsw1xx::if_print(&mut printer, &frame) {
            Ok(hdr_len) => debug!("Frame {}: {} bytes of link layer header", count, hdr_len),
            Err(e) => debug!("Frame {}: {}", count, e),
        };

        let line = printer.take_line();
        let line = line.trim_end();
        if line.is_empty() {
            writeln!(out, "{}: length {}", count, frame.len)?;
        } else {
            writeln!(out, "{}: {}", count, line)?;
        }
    }

    Ok(count)
}

fn main() -> Result<()> {
    let matches = commands::new_root_command().get_matches();
    init_logger()?;

    let cfg = config::parse_args(&matches)?;
    set_log_level(log_level(&cfg));
    debug!(
        "verbosity {}, snaplen {}, input {}",
        cfg.verbosity, cfg.snaplen, cfg.input_file
    );

    let reader = frames::open(&cfg.input_file)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let count = print_frames(&cfg, reader, &mut out)?;
    info!("{} frames printed", count);

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use gswdump_api::config::Verbosity;

    use super::*;

    const INPUT: &str = "\
# ingress, then egress
0180c200000e cc040d5cf000 88c3 051234000000 0800 4500
0180c200000e cc040d5cf000 88c3 00000000000a 0800 4500

0180c200000e cc040d5cf000 88c3 05
";

    fn run_input(input: &'static [u8], verbosity: u8) -> (u64, Vec<String>) {
        let mut cfg = Config::default();
        cfg.verbosity = Verbosity(verbosity);
        let mut out = vec![];
        let count = print_frames(&cfg, Box::new(Cursor::new(input)), &mut out).unwrap();
        let lines = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(String::from)
            .collect();
        (count, lines)
    }

    fn run(verbosity: u8) -> Vec<String> {
        let (count, lines) = run_input(INPUT.as_bytes(), verbosity);
        assert_eq!(count, 3);
        lines
    }

    #[test]
    fn summary_lines() {
        let lines = run(1);
        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with(
            "GSW1XX Ingress Port 5,MAP 13330, ethertype IPv4 (0x0800), length 24:"
        ));
        assert!(lines[1].contains("GSW1XX Egress Port 0, ethertype IPv4"));
        assert!(lines[2].ends_with("[|gsw1xx]"));
    }

    #[test]
    fn quiet_lines() {
        let lines = run(0);
        assert_eq!(lines[0], "1: length 24");
        assert!(lines[2].ends_with("[|gsw1xx]"));
    }

    #[test]
    fn truncated_after_tag() {
        let input = b"0180c200000e cc040d5cf000 88c3 051234000000 08\n";
        let (count, lines) = run_input(input, 1);
        assert_eq!(count, 1);
        assert!(lines[0].ends_with("GSW1XX Ingress Port 5,MAP 13330, [|gsw1xx]"));
        assert!(!lines[0].contains("  "));
    }

    #[test]
    fn invalid_utf8_line_is_skipped() {
        let input = b"\xff\xfe\n0180c200000e cc040d5cf000 88c3 051234000000 0800 4500\n";
        let (count, lines) = run_input(input, 1);
        assert_eq!(count, 1);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("1: "));
        assert!(lines[0].contains("ethertype IPv4 (0x0800), length 24:"));
    }

    #[test]
    fn sample_frames() {
        let input = include_str!("../../etc/frames.txt");
        let (count, lines) = run_input(input.as_bytes(), 2);
        assert_eq!(count, 4);
        assert!(lines[0].ends_with("irq 0, ethertype IPv4 (0x0800), length 26:"));
        assert!(lines[1].contains("TC 10,EPN 3,POE 1,Len 256, ethertype IPv4 (0x0800), length 26:"));
        assert!(lines[2].contains("IV4 1,IPO 14,Len 16383, ethertype IPv6 (0x86dd), length 24:"));
        assert!(lines[3].contains("GSW1XX Unknown 0x1234, Ingress Port 5,MAP 13330,"));
    }

    #[test]
    fn log_levels() {
        let mut cfg = Config::default();
        assert_eq!(log_level(&cfg), LevelFilter::Info);
        cfg.quiet = true;
        assert_eq!(log_level(&cfg), LevelFilter::Warn);
        cfg.quiet = false;
        cfg.verbose_mode = true;
        assert_eq!(log_level(&cfg), LevelFilter::Debug);
    }
}
