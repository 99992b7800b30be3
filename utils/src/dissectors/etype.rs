use num_traits::FromPrimitive;
use strum::IntoStaticStr;

/// ETHER TYPES
///
/// Names follow the ones tcpdump prints.
#[allow(non_camel_case_types)]
#[derive(Primitive, IntoStaticStr, Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[repr(u16)]
pub enum EtherType {
    #[strum(serialize = "IPv4")]
    IPV4 = 0x0800,
    #[strum(serialize = "ARP")]
    ARP = 0x0806,
    #[strum(serialize = "Reverse ARP")]
    REVARP = 0x8035,
    #[strum(serialize = "802.1Q")]
    VLAN = 0x8100,
    #[strum(serialize = "IPv6")]
    IPV6 = 0x86DD,
    /// Link Aggregation Control Protocol and friends
    #[strum(serialize = "Slow Protocols")]
    SLOW_PROTOCOLS = 0x8809,
    #[strum(serialize = "PPP")]
    PPP = 0x880B,
    #[strum(serialize = "MPLS unicast")]
    MPLSUC = 0x8847,
    #[strum(serialize = "MPLS multicast")]
    MPLSMC = 0x8848,
    #[strum(serialize = "PPPoE D")]
    PPPOED = 0x8863,
    #[strum(serialize = "PPPoE S")]
    PPPOES = 0x8864,
    /// 802.1x Authentication
    #[strum(serialize = "EAPOL")]
    EAPOL = 0x888E,
    /// IEEE 802.1ad Provider Bridge; Q-in-Q
    #[strum(serialize = "802.1Q-QinQ")]
    IEEE_802_1AD = 0x88A8,
    /// Link Layer Discovery Protocol
    #[strum(serialize = "LLDP")]
    LLDP = 0x88CC,
    /// IEEE 802.1ae Media access control security
    #[strum(serialize = "MACsec")]
    MACSEC = 0x88E5,
    /// Precision Time Protocol over Ethernet (IEEE 1588)
    #[strum(serialize = "PTP")]
    PTP = 0x88F7,
    /// IEEE 802.1ag Connectivity Fault Management
    #[strum(serialize = "CFM")]
    CFM = 0x8902,
}

/// Name of an ether type, "Unknown" for the ones not in the table
pub fn ether_type_name(etype: u16) -> &'static str {
    match EtherType::from_u16(etype) {
        Some(etype) => etype.into(),
        None => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known() {
        assert_eq!(ether_type_name(0x0800), "IPv4");
        assert_eq!(ether_type_name(0x8100), "802.1Q");
        assert_eq!(ether_type_name(0x88cc), "LLDP");
    }

    #[test]
    fn unknown() {
        assert_eq!(ether_type_name(0x88c3), "Unknown");
        assert_eq!(ether_type_name(0x0000), "Unknown");
    }

    #[test]
    fn from_primitive() {
        assert!(matches!(EtherType::from_u16(0x86dd), Some(EtherType::IPV6)));
        assert!(EtherType::from_u16(0x1234).is_none());
    }
}
