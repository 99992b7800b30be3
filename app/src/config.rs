use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{anyhow, Result};
use yaml_rust::YamlLoader;

use gswdump_api as api;
use api::config::{Config, Verbosity, MAX_SNAPLEN};

use super::commands::CliArg;

/// Smallest snapshot length still holding both MAC addresses and a length/type field
const MIN_SNAPLEN: u32 = 14;

/// Parse command line arguments and set configuration
pub fn parse_args(matches: &clap::ArgMatches) -> Result<Config> {
    let mut config = Config::default();

    if let Some(config_file) = matches.value_of(CliArg::Config.as_str()) {
        parse_config_file(config_file, &mut config)?;
    }

    set_config_by_cli_args(&mut config, matches)?;

    Ok(config)
}

fn parse_config_file(config_file: &str, config: &mut Config) -> Result<()> {
    let cfg_path = Path::new(config_file);
    if !cfg_path.exists() {
        return Err(anyhow!("Config file \"{}\" does not exist", config_file));
    }

    let mut s = String::new();
    File::open(cfg_path)?.read_to_string(&mut s)?;
    parse_config_str(&s, config)
}

fn parse_config_str(s: &str, config: &mut Config) -> Result<()> {
    let docs = YamlLoader::load_from_str(s)?;
    let doc = docs
        .first()
        .ok_or_else(|| anyhow!("Empty configuration document"))?;
    config.doc = api::config::Yaml(doc.clone());

    config.verbosity = Verbosity(
        config.get_integer("print.verbosity", 0, 0, Verbosity::MAX.0 as i64) as u8,
    );
    config.snaplen = config.get_integer(
        "input.snaplen",
        MAX_SNAPLEN as i64,
        MIN_SNAPLEN as i64,
        MAX_SNAPLEN as i64,
    ) as u32;
    config.input_file = config.get_str("input.file", "-");
    config.quiet = config.get_boolean("log.quiet", false);

    Ok(())
}

/// Use command arguments overrides config file settings
fn set_config_by_cli_args(config: &mut Config, matches: &clap::ArgMatches) -> Result<()> {
    config.quiet = config.quiet || matches.is_present(CliArg::Quiet.as_str());
    config.verbose_mode = matches.is_present(CliArg::Verbose.as_str());

    let levels = matches.occurrences_of(CliArg::EtherHeader.as_str());
    if levels > 0 {
        config.verbosity = Verbosity(levels.min(u8::MAX as u64) as u8);
    }

    if let Some(file) = matches.value_of(CliArg::ReadFile.as_str()) {
        config.input_file = String::from(file);
    }

    if let Some(snaplen) = matches.value_of(CliArg::Snaplen.as_str()) {
        let snaplen = snaplen
            .parse::<u32>()
            .map_err(|e| anyhow!("Invalid snaplen {}: {}", snaplen, e))?;
        if snaplen < MIN_SNAPLEN || snaplen > MAX_SNAPLEN {
            return Err(anyhow!(
                "Snaplen {} out of range {}..={}",
                snaplen,
                MIN_SNAPLEN,
                MAX_SNAPLEN
            ));
        }
        config.snaplen = snaplen;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::new_root_command;

    fn parse(args: &[&str]) -> Result<Config> {
        let matches = new_root_command().get_matches_from_safe(args)?;
        parse_args(&matches)
    }

    #[test]
    fn defaults() {
        let cfg = parse(&["gswdump"]).unwrap();
        assert_eq!(cfg.verbosity, Verbosity(0));
        assert_eq!(cfg.snaplen, MAX_SNAPLEN);
        assert_eq!(cfg.input_file, "-");
        assert!(!cfg.quiet);
    }

    #[test]
    fn repeated_e_raises_verbosity() {
        let cfg = parse(&["gswdump", "-eee", "-r", "frames.txt"]).unwrap();
        assert_eq!(cfg.verbosity, Verbosity(3));
        assert_eq!(cfg.input_file, "frames.txt");
    }

    #[test]
    fn snaplen_range() {
        let cfg = parse(&["gswdump", "-s", "20"]).unwrap();
        assert_eq!(cfg.snaplen, 20);
        assert!(parse(&["gswdump", "-s", "10"]).is_err());
        assert!(parse(&["gswdump", "-s", "many"]).is_err());
    }

    #[test]
    fn log_switches() {
        let cfg = parse(&["gswdump", "-v"]).unwrap();
        assert!(cfg.verbose_mode);
        assert!(!cfg.quiet);
        let cfg = parse(&["gswdump", "--quiet"]).unwrap();
        assert!(!cfg.verbose_mode);
        assert!(cfg.quiet);
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        assert!(parse(&["gswdump", "-q", "-v"]).is_err());
    }

    #[test]
    fn missing_config_file() {
        assert!(parse(&["gswdump", "-c", "/nonexistent/gswdump.yaml"]).is_err());
    }

    #[test]
    fn config_document() {
        let mut cfg = Config::default();
        let doc = "print.verbosity: 2\ninput.snaplen: 64\ninput.file: tags.txt\nlog.quiet: true\n";
        parse_config_str(doc, &mut cfg).unwrap();
        assert_eq!(cfg.verbosity, Verbosity(2));
        assert_eq!(cfg.snaplen, 64);
        assert_eq!(cfg.input_file, "tags.txt");
        assert!(cfg.quiet);
    }

    #[test]
    fn config_document_out_of_range() {
        let mut cfg = Config::default();
        parse_config_str("print.verbosity: 7\ninput.snaplen: 4\n", &mut cfg).unwrap();
        assert_eq!(cfg.verbosity, Verbosity(0));
        assert_eq!(cfg.snaplen, MAX_SNAPLEN);
    }
}
