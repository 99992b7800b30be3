//! Frames handed to the link layer printers.
//!
//! A frame source only has to tell how many bytes it captured and how long the
//! frame was on the wire, everything else is worked out by the dissectors.

pub trait Packet {
    /// Get raw packet data, at most `caplen` bytes
    fn raw(&self) -> &[u8];

    /// Get packet capture length
    fn caplen(&self) -> u32;

    /// Get packet length on the wire
    fn len(&self) -> u32;
}

#[cfg(any(test, feature = "test-packet"))]
pub mod test {
    use super::Packet as PacketTrait;

    /// Packet structure only for test use
    #[derive(Clone, Debug, Default)]
    pub struct Packet {
        /// capture length
        pub caplen: u32,
        /// wire length
        pub len: u32,
        /// raw packet data
        pub raw: Vec<u8>,
    }

    impl Packet {
        /// Build a fully captured packet
        pub fn new(raw: &[u8]) -> Self {
            Self {
                caplen: raw.len() as u32,
                len: raw.len() as u32,
                raw: raw.to_vec(),
            }
        }

        /// Build a packet whose capture stopped after `caplen` bytes
        pub fn truncated(raw: &[u8], caplen: usize) -> Self {
            let caplen = caplen.min(raw.len());
            Self {
                caplen: caplen as u32,
                len: raw.len() as u32,
                raw: raw[..caplen].to_vec(),
            }
        }
    }

    impl PacketTrait for Packet {
        fn raw(&self) -> &[u8] {
            self.raw.as_slice()
        }

        fn caplen(&self) -> u32 {
            self.caplen
        }

        fn len(&self) -> u32 {
            self.len
        }
    }
}
