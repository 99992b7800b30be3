//! MaxLinear GSW1XX special tag, an ether typed Distributed Switch Architecture tag.
//!
//! The 8-byte tag sits between the source MAC address and the frame's own
//! length/type field. Its first two bytes are the programmable ether type that
//! announces the tag. The remaining six bytes have two layouts:
//!
//! ```text
//!          7   6   5   4   3   2   1   0        7   6   5   4   3   2   1   0
//!        +---+---+---+---+---+---+---+---+    +---+---+---+---+---+---+---+---+
//!  0..1  |      Prog. DSA Ether Type     |    |      Prog. DSA Ether Type     |
//!        +---+---+---+---+---+---+---+---+    +---+---+---+---+---+---+---+---+
//!     2  |PME|TCE|TSE|FNL|TTC|  (IPN)    |    |   TC [3:0]    |   EPN [3:0]   |
//!        +---+---+---+---+---+---+---+---+    +---+---+---+---+---+---+---+---+
//!     3  |        Port Map [7:0]         |    |       |      IPO [5:0]        |
//!        +---+---+---+---+---+---+---+---+    +---+---+---+---+---+---+---+---+
//!     4  |        Port Map [15:8]        |    |                               |
//!        +---+---+---+---+---+---+---+---+    +---+---+---+---+---+---+---+---+
//!     5  |           | IE|               |    |                               |
//!        +---+---+---+---+---+---+---+---+    +---+---+---+---+---+---+---+---+
//!  6..7  |       |   Length [13:0] = 0   |    |       |   Length [13:0] != 0  |
//!        +---+---+---+---+---+---+---+---+    +---+---+---+---+---+---+---+---+
//!                   Ingress                               Egress
//! ```
//!
//! The ingress port number spans bits 3..0, sharing bit 3 with TTC. On egress the
//! top two bits of TC double as the POE and IV4 flags.
//!
//! Frames going into the switch carry a zero length, frames leaving it carry
//! the length of the packet, so the length decides which layout applies.

use std::convert::TryInto;
use std::fmt::{self, Display, Formatter};

use nom::bytes::complete::take;
use nom::IResult;

use gswdump_api as api;
use api::config::Verbosity;
use api::packet::Packet;

use super::ethernet;
use crate::dissectors::{ether_type_name, Error, Printer};

pub const PROTOCOL: &str = "gsw1xx";

/// Tag length, ether type included
pub const TAG_LEN: usize = 8;

/// Well known ether type announcing the tag
pub const ETHERTYPE_GSW1XX: u16 = 0x88C3;

/// A field living inside a single byte of the tag
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Field {
    byte: usize,
    mask: u8,
    shift: u32,
}

impl Field {
    /// Fields outside of the tag or without any bit fail to compile
    pub const fn new(byte: usize, mask: u8) -> Self {
        assert!(byte < TAG_LEN, "field outside of the tag");
        assert!(mask != 0, "field without any bit");
        Self {
            byte,
            mask,
            shift: mask.trailing_zeros(),
        }
    }

    #[inline]
    pub const fn byte(&self) -> usize {
        self.byte
    }

    #[inline]
    pub const fn mask(&self) -> u8 {
        self.mask
    }

    #[inline]
    pub const fn shift(&self) -> u32 {
        self.shift
    }

    /// Number of bits the extracted value spans
    #[inline]
    pub const fn width(&self) -> u32 {
        self.mask.count_ones()
    }
}

pub mod fields {
    use super::Field;

    pub const ET1: Field = Field::new(0, 0xFF);
    pub const ET2: Field = Field::new(1, 0xFF);
    /// port map enable
    pub const PME: Field = Field::new(2, 0x80);
    /// traffic class enable
    pub const TCE: Field = Field::new(2, 0x40);
    /// time stamp enable
    pub const TSE: Field = Field::new(2, 0x20);
    /// force no learning
    pub const FNL: Field = Field::new(2, 0x10);
    /// target traffic class
    pub const TTC: Field = Field::new(2, 0x08);
    /// ingress port number
    pub const IPN: Field = Field::new(2, 0x0F);
    pub const MAP_LOW: Field = Field::new(3, 0xFF);
    pub const MAP_HIGH: Field = Field::new(4, 0xFF);
    /// interrupt enable
    pub const IE: Field = Field::new(5, 0x10);
    pub const LEN_HIGH: Field = Field::new(6, 0x3F);
    pub const LEN_LOW: Field = Field::new(7, 0xFF);
    pub const EG_TC: Field = Field::new(2, 0xF0);
    pub const EG_EPN: Field = Field::new(2, 0x0F);
    pub const EG_POE: Field = Field::new(2, 0x80);
    pub const EG_IV4: Field = Field::new(2, 0x40);
    pub const EG_IPO: Field = Field::new(3, 0x3F);

    pub const ALL: [Field; 18] = [
        ET1, ET2, PME, TCE, TSE, FNL, TTC, IPN, MAP_LOW, MAP_HIGH, IE, LEN_HIGH, LEN_LOW, EG_TC,
        EG_EPN, EG_POE, EG_IV4, EG_IPO,
    ];
}

/// The 8 captured bytes of a tag
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TagWindow<'a>(&'a [u8; TAG_LEN]);

impl<'a> TagWindow<'a> {
    /// Take the tag from the start of `data`, failing when less than 8 bytes were captured
    pub fn parse(data: &'a [u8]) -> Result<Self, Error> {
        let result: IResult<&[u8], &[u8], Error> = take(TAG_LEN)(data);
        let (_, tag) = result.map_err(|_| Error::Truncated {
            protocol: PROTOCOL,
            needed: TAG_LEN,
            available: data.len(),
        })?;
        let tag = tag
            .try_into()
            .map_err(|_| Error::CorruptPacket("GSW1XX tag is not 8 bytes long"))?;
        Ok(Self(tag))
    }

    #[inline]
    pub fn extract(&self, field: Field) -> u8 {
        (self.0[field.byte] & field.mask) >> field.shift
    }

    pub fn ether_type(&self) -> u16 {
        (self.extract(fields::ET1) as u16) << 8 | self.extract(fields::ET2) as u16
    }

    pub fn port_map(&self) -> u16 {
        (self.extract(fields::MAP_HIGH) as u16) << 8 | self.extract(fields::MAP_LOW) as u16
    }

    /// 14 bits packet length, zero on ingress
    pub fn length(&self) -> u16 {
        (self.extract(fields::LEN_HIGH) as u16) << 8 | self.extract(fields::LEN_LOW) as u16
    }
}

/// Frames leaving the switch carry a non zero length
#[inline]
pub fn is_egress(window: &TagWindow) -> bool {
    window.length() != 0
}

/// Tag of a frame sent into the switch by the CPU
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct IngressTag {
    pub port: u8,
    pub port_map: u16,
    pub port_map_enable: u8,
    pub traffic_class_enable: u8,
    pub timestamp_enable: u8,
    pub force_no_learning: u8,
    pub target_traffic_class: u8,
    pub irq_enable: u8,
}

/// Present on egress tags whose IP offset is set
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct EgressIp {
    pub ipv4: u8,
    pub offset: u8,
}

/// Tag of a frame handed by the switch to the CPU
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct EgressTag {
    pub port: u8,
    pub target_traffic_class: u8,
    pub traffic_class_enable: u8,
    pub traffic_class: u8,
    pub port_on_ethernet: u8,
    pub ip: Option<EgressIp>,
    pub length: u16,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Tag {
    Ingress(IngressTag),
    Egress(EgressTag),
}

impl Tag {
    pub fn decode(window: &TagWindow) -> Self {
        use fields::*;

        if is_egress(window) {
            let ip = match window.extract(EG_IPO) {
                0 => None,
                offset => Some(EgressIp {
                    ipv4: window.extract(EG_IV4),
                    offset,
                }),
            };
            Tag::Egress(EgressTag {
                port: window.extract(EG_EPN),
                target_traffic_class: window.extract(TTC),
                traffic_class_enable: window.extract(TCE),
                traffic_class: window.extract(EG_TC),
                port_on_ethernet: window.extract(EG_POE),
                ip,
                length: window.length(),
            })
        } else {
            Tag::Ingress(IngressTag {
                port: window.extract(IPN),
                port_map: window.port_map(),
                port_map_enable: window.extract(PME),
                traffic_class_enable: window.extract(TCE),
                timestamp_enable: window.extract(TSE),
                force_no_learning: window.extract(FNL),
                target_traffic_class: window.extract(TTC),
                irq_enable: window.extract(IE),
            })
        }
    }

    /// Field tokens in print order, the detailed ones only past verbosity 1
    pub fn tokens(&self, verbosity: Verbosity) -> Vec<Token> {
        let mut tokens = vec![];
        match self {
            Tag::Egress(tag) => {
                tokens.push(Token::new("Egress Port", tag.port));
                if verbosity.detailed() {
                    tokens.push(Token::new("TTC", tag.target_traffic_class));
                    tokens.push(Token::new("TCE", tag.traffic_class_enable));
                    tokens.push(Token::new("TC", tag.traffic_class));
                    tokens.push(Token::new("EPN", tag.port));
                    tokens.push(Token::new("POE", tag.port_on_ethernet));
                    if let Some(ip) = tag.ip {
                        tokens.push(Token::new("IV4", ip.ipv4));
                        tokens.push(Token::new("IPO", ip.offset));
                    }
                    tokens.push(Token::new("Len", tag.length));
                }
            }
            Tag::Ingress(tag) => {
                tokens.push(Token::new("Ingress Port", tag.port));
                tokens.push(Token::new("MAP", tag.port_map));
                if verbosity.detailed() {
                    tokens.push(Token::new("PME", tag.port_map_enable));
                    tokens.push(Token::new("TCE", tag.traffic_class_enable));
                    tokens.push(Token::new("TTC", tag.target_traffic_class));
                    tokens.push(Token::new("FNL", tag.force_no_learning));
                    tokens.push(Token::new("irq", tag.irq_enable));
                }
            }
        };
        tokens
    }
}

/// A labeled decimal value, printed as `<label> <value>,`
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Token {
    pub label: &'static str,
    pub value: u16,
}

impl Token {
    fn new<V: Into<u16>>(label: &'static str, value: V) -> Self {
        Self {
            label,
            value: value.into(),
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {},", self.label, self.value)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TagSummary {
    pub identification: String,
    pub fields: Vec<Token>,
}

impl Display for TagSummary {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.identification)?;
        if !self.fields.is_empty() {
            write!(f, " ")?;
            for token in &self.fields {
                write!(f, "{}", token)?;
            }
        }
        Ok(())
    }
}

fn identify(etype: u16, verbosity: Verbosity) -> String {
    if verbosity.symbolic() {
        format!(
            "MaxLinear ethertype 0x{:04x} ({}),",
            etype,
            ether_type_name(etype)
        )
    } else if etype == ETHERTYPE_GSW1XX {
        String::from("GSW1XX")
    } else {
        format!("GSW1XX Unknown 0x{:04x},", etype)
    }
}

/// Decode the tag at the start of `data` into printable tokens
pub fn format(data: &[u8], verbosity: Verbosity) -> Result<TagSummary, Error> {
    let window = TagWindow::parse(data)?;
    let identification = identify(window.ether_type(), verbosity);
    let fields = if verbosity.enabled() {
        Tag::decode(&window).tokens(verbosity)
    } else {
        vec![]
    };
    Ok(TagSummary {
        identification,
        fields,
    })
}

fn tag_print(printer: &mut Printer, data: &[u8]) -> Result<(), Error> {
    let summary = format(data, printer.verbosity())?;
    printer.print(summary);
    Ok(())
}

/// Print an Ethernet frame carrying a GSW1XX tag, returns the link layer header length
pub fn if_print(printer: &mut Printer, pkt: &dyn Packet) -> Result<usize, Error> {
    printer.set_protocol(PROTOCOL);
    ethernet::switch_tag_print(printer, pkt, tag_print, TAG_LEN)
}
