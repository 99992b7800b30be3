use std::fmt::{Display, Formatter, Write};

use nom::error::{ErrorKind, ParseError};

use gswdump_api as api;
use api::config::Verbosity;

mod etype;
pub mod link;

pub use etype::{ether_type_name, EtherType};

/// Print a switch tag found right after the MAC addresses
///
/// # Arguments
///
/// * `printer` - Output line of the current frame
///
/// * `data` - Captured data starting at the switch tag
pub type TagCallback = fn(printer: &mut Printer, data: &[u8]) -> Result<(), Error>;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// Less bytes were captured than the header needs
    Truncated {
        protocol: &'static str,
        needed: usize,
        available: usize,
    },
    CorruptPacket(&'static str),
    Nom(ErrorKind),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Truncated {
                protocol,
                needed,
                available,
            } => write!(
                f,
                "Truncated {} header, need {} bytes but only {} captured",
                protocol, needed, available
            ),
            Error::CorruptPacket(s) => write!(f, "{}", s),
            Error::Nom(_) => write!(f, "Nom parse error"),
        }
    }
}

impl<I> ParseError<I> for Error {
    fn from_error_kind(_: I, kind: ErrorKind) -> Self {
        Error::Nom(kind)
    }

    fn append(_: I, _: ErrorKind, other: Self) -> Self {
        other
    }
}

impl std::error::Error for Error {}

/// Summary line of a single frame
///
/// Link layer printers append their text to it, the caller takes the finished
/// line once the frame is done.
#[derive(Clone, Debug, Default)]
pub struct Printer {
    verbosity: Verbosity,
    /// Protocol being printed, used to report truncated frames
    protocol: &'static str,
    line: String,
}

impl Printer {
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            protocol: "",
            line: String::new(),
        }
    }

    #[inline]
    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    #[inline]
    pub fn protocol(&self) -> &'static str {
        self.protocol
    }

    pub fn set_protocol(&mut self, protocol: &'static str) {
        self.protocol = protocol;
    }

    pub fn print<T: Display>(&mut self, text: T) {
        // writing into a String never fails
        let _ = write!(self.line, "{}", text);
    }

    /// Mark the line as cut short by the capture length
    pub fn print_trunc(&mut self) {
        let protocol = self.protocol;
        self.print(format_args!(" [|{}]", protocol));
    }

    pub fn line(&self) -> &str {
        &self.line
    }

    /// Take the finished line, leaving the printer ready for the next frame
    pub fn take_line(&mut self) -> String {
        std::mem::take(&mut self.line)
    }
}
