use std::fmt;

/// Largest snapshot length accepted, same as most capture tools
pub const MAX_SNAPLEN: u32 = 262144;

/// How much of every link layer header is printed.
///
/// Level 0 prints nothing of the header, 1 prints a summary, 2 prints every
/// field and 3 also prints raw ether types with their names.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Verbosity(pub u8);

impl Verbosity {
    pub const MAX: Verbosity = Verbosity(3);

    /// Link layer headers are printed at all
    #[inline]
    pub fn enabled(&self) -> bool {
        self.0 > 0
    }

    /// Every field of a header is printed, not only the summary
    #[inline]
    pub fn detailed(&self) -> bool {
        self.0 > 1
    }

    /// Ether types are printed as numbers together with their names
    #[inline]
    pub fn symbolic(&self) -> bool {
        self.0 > 2
    }
}

impl From<u8> for Verbosity {
    fn from(level: u8) -> Self {
        Verbosity(level)
    }
}

impl fmt::Display for Verbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    /// Frame file, "-" reads from stdin
    pub input_file: String,
    /// Only log warnings and errors
    pub quiet: bool,
    pub snaplen: u32,
    /// Log debug messages
    pub verbose_mode: bool,
    pub verbosity: Verbosity,
    pub doc: Yaml,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_file: String::from("-"),
            quiet: false,
            snaplen: MAX_SNAPLEN,
            verbose_mode: false,
            verbosity: Verbosity::default(),
            doc: Yaml::default(),
        }
    }
}

impl Config {
    pub fn get_integer(&self, key: &str, default: i64, min: i64, max: i64) -> i64 {
        get_integer(&self.doc.as_ref(), key, default, min, max)
    }

    pub fn get_str(&self, key: &str, default: &str) -> String {
        get_str(&self.doc.as_ref(), key, default)
    }

    pub fn get_boolean(&self, key: &str, default: bool) -> bool {
        get_boolean(&self.doc.as_ref(), key, default)
    }
}

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
/// Simple wrapper struct to implement Default trait for yaml_rust::Yaml
pub struct Yaml(pub yaml_rust::Yaml);

impl Default for Yaml {
    fn default() -> Self {
        Self(yaml_rust::Yaml::Null)
    }
}

impl AsRef<yaml_rust::Yaml> for Yaml {
    fn as_ref(&self) -> &yaml_rust::Yaml {
        &self.0
    }
}

impl AsMut<yaml_rust::Yaml> for Yaml {
    fn as_mut(&mut self) -> &mut yaml_rust::Yaml {
        &mut self.0
    }
}

fn get_str(doc: &yaml_rust::Yaml, key: &str, default: &str) -> String {
    match &doc[key] {
        yaml_rust::Yaml::String(s) => s.clone(),
        yaml_rust::Yaml::BadValue => {
            debug!(
                "Option {} not found or bad string value, set {} to {}",
                key, key, default
            );
            default.to_string()
        }
        _ => {
            warn!(
                "Wrong value type for {}, expecting string, set {} to {}",
                key, key, default
            );
            default.to_string()
        }
    }
}

fn get_boolean(doc: &yaml_rust::Yaml, key: &str, default: bool) -> bool {
    match doc[key] {
        yaml_rust::Yaml::Boolean(b) => b,
        yaml_rust::Yaml::BadValue => {
            debug!(
                "Option {} not found or bad boolean value, set {} to {}",
                key, key, default
            );
            default
        }
        _ => {
            warn!(
                "Wrong value type for {}, expecting boolean, set {} to {}",
                key, key, default
            );
            default
        }
    }
}

fn get_integer(doc: &yaml_rust::Yaml, key: &str, default: i64, min: i64, max: i64) -> i64 {
    match doc[key] {
        yaml_rust::Yaml::Integer(i) => {
            if i < min || i > max {
                warn!(
                    "Option {} is less/greater than min/max value {}/{}, set {} to {}",
                    key, min, max, key, default
                );
                default
            } else {
                i
            }
        }
        yaml_rust::Yaml::BadValue => {
            debug!(
                "Option {} not found or bad integer value, set {} to {}",
                key, key, default
            );
            default
        }
        _ => {
            warn!(
                "Wrong value type for {}, expecting integer, set {} to {}",
                key, key, default
            );
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use yaml_rust::YamlLoader;

    use super::*;

    fn config(s: &str) -> Config {
        let docs = YamlLoader::load_from_str(s).unwrap();
        let mut cfg = Config::default();
        cfg.doc = Yaml(docs[0].clone());
        cfg
    }

    #[test]
    fn verbosity_levels() {
        assert!(!Verbosity(0).enabled());
        assert!(Verbosity(1).enabled());
        assert!(!Verbosity(1).detailed());
        assert!(Verbosity(2).detailed());
        assert!(!Verbosity(2).symbolic());
        assert!(Verbosity(3).symbolic());
        assert!(Verbosity(4).symbolic());
    }

    #[test]
    fn integer_in_range() {
        let cfg = config("print.verbosity: 2");
        assert_eq!(cfg.get_integer("print.verbosity", 0, 0, 3), 2);
    }

    #[test]
    fn integer_out_of_range_falls_back() {
        let cfg = config("print.verbosity: 9");
        assert_eq!(cfg.get_integer("print.verbosity", 1, 0, 3), 1);
    }

    #[test]
    fn integer_wrong_type_falls_back() {
        let cfg = config("print.verbosity: loud");
        assert_eq!(cfg.get_integer("print.verbosity", 1, 0, 3), 1);
    }

    #[test]
    fn missing_keys() {
        let cfg = config("other: 1");
        assert_eq!(cfg.get_str("input.file", "-"), "-");
        assert!(cfg.get_boolean("print.quiet", true));
    }
}
