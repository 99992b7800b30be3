use mac_address::MacAddress;
use nom::bytes::complete::take;
use nom::number::complete::be_u16;
use nom::IResult;

use gswdump_api as api;
use api::packet::Packet;

use crate::dissectors::{ether_type_name, Error, Printer, TagCallback};

/// Destination and source MAC addresses
pub const MAC_ADDRS_LEN: usize = 12;
pub const LENGTH_TYPE_LEN: usize = 2;
/// Length/type values up to this one are 802.3 lengths, not ether types
pub const MAX_ETHERNET_LENGTH_VAL: u16 = 1500;

fn mac(data: &[u8]) -> MacAddress {
    let mut addr = [0u8; 6];
    addr.copy_from_slice(data);
    MacAddress::new(addr)
}

/// Split the destination and source MAC addresses off the frame
fn addresses(data: &[u8]) -> IResult<&[u8], (MacAddress, MacAddress), Error> {
    let (remain, dst) = take(6usize)(data)?;
    let (remain, src) = take(6usize)(remain)?;
    Ok((remain, (mac(dst), mac(src))))
}

fn truncated(printer: &mut Printer, needed: usize, available: usize) -> Error {
    debug!(
        "{} frame truncated, {} bytes needed but {} captured",
        printer.protocol(),
        needed,
        available
    );
    printer.print_trunc();
    Error::Truncated {
        protocol: printer.protocol(),
        needed,
        available,
    }
}

/// Print an Ethernet frame whose MAC addresses are followed by a switch tag
///
/// The tag is printed by `print_tag`, the encapsulated payload is left to the
/// next layer. Returns the length of the link layer header: MAC addresses,
/// tag and the frame's own length/type field.
///
/// # Arguments
///
/// * `printer` - Output line of the current frame
///
/// * `pkt` - The captured frame
///
/// * `print_tag` - Printer of the switch tag
///
/// * `tag_len` - Length of the switch tag
pub fn switch_tag_print(
    printer: &mut Printer,
    pkt: &dyn Packet,
    print_tag: TagCallback,
    tag_len: usize,
) -> Result<usize, Error> {
    let caplen = (pkt.caplen() as usize).min(pkt.raw().len());
    let data = &pkt.raw()[..caplen];
    let verbosity = printer.verbosity();

    let (remain, (dst, src)) = match addresses(data) {
        Ok(r) => r,
        Err(_) => return Err(truncated(printer, MAC_ADDRS_LEN, caplen)),
    };

    if verbosity.enabled() {
        printer.print(format_args!("{} > {}, ", src, dst));
        if let Err(e) = print_tag(printer, remain) {
            printer.print_trunc();
            return Err(e);
        }
    }

    let hdr_len = MAC_ADDRS_LEN + tag_len + LENGTH_TYPE_LEN;
    if remain.len() < tag_len {
        return Err(truncated(printer, hdr_len, caplen));
    }
    let length_type: IResult<&[u8], u16, Error> = be_u16(&remain[tag_len..]);
    let length_type = match length_type {
        Ok((_, length_type)) => length_type,
        Err(_) => return Err(truncated(printer, hdr_len, caplen)),
    };

    if verbosity.enabled() {
        if length_type <= MAX_ETHERNET_LENGTH_VAL {
            printer.print(format_args!(" 802.3, length {}: ", pkt.len()));
        } else {
            printer.print(format_args!(
                " ethertype {} (0x{:04x}), length {}: ",
                ether_type_name(length_type),
                length_type,
                pkt.len()
            ));
        }
    }

    Ok(hdr_len)
}
