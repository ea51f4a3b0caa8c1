//! Conversion of route and address text into prefixes of a single address family.

use std::net::IpAddr;

use ipnet::IpNet;

use crate::error::{Error, Result};

/// The addressing domain of a table. Each family has its own tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AddressFamily {
    /// 32 bit addresses.
    #[default]
    Ipv4,
    /// 128 bit addresses.
    Ipv6,
}

impl AddressFamily {
    /// Number of address bits, which is also the longest possible prefix.
    pub fn width(self) -> u8 {
        match self {
            AddressFamily::Ipv4 => 32,
            AddressFamily::Ipv6 => 128,
        }
    }

    /// Family of a network.
    pub fn of(net: &IpNet) -> Self {
        match net {
            IpNet::V4(_) => AddressFamily::Ipv4,
            IpNet::V6(_) => AddressFamily::Ipv6,
        }
    }

    fn of_addr(addr: &IpAddr) -> Self {
        match addr {
            IpAddr::V4(_) => AddressFamily::Ipv4,
            IpAddr::V6(_) => AddressFamily::Ipv6,
        }
    }
}

/// Parse `address/length` (or a bare address, meaning a host route) without touching the host
/// bits.
///
/// ```
/// # use route_trie::*;
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let net = parse_network("192.168.1.0/8", AddressFamily::Ipv4)?;
/// assert_eq!(net.to_string(), "192.168.1.0/8");
/// assert_eq!(parse_network("8.8.8.8", AddressFamily::Ipv4)?.to_string(), "8.8.8.8/32");
/// # Ok(())
/// # }
/// ```
pub fn parse_network(text: &str, family: AddressFamily) -> Result<IpNet> {
    let malformed = || Error::MalformedPrefix(text.to_string());
    let net = if text.contains('/') {
        text.parse::<IpNet>().map_err(|_| malformed())?
    } else {
        let addr = text.parse::<IpAddr>().map_err(|_| malformed())?;
        if AddressFamily::of_addr(&addr) != family {
            return Err(malformed());
        }
        IpNet::new(addr, family.width()).map_err(|_| malformed())?
    };
    if AddressFamily::of(&net) != family {
        return Err(malformed());
    }
    Ok(net)
}

/// Parse a route into its canonical prefix: every bit beyond the prefix length is zeroed, so
/// `192.168.1.0/8` and `192.0.0.0/8` denote the same route.
///
/// ```
/// # use route_trie::*;
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let net = parse_prefix("192.168.1.0/8", AddressFamily::Ipv4)?;
/// assert_eq!(net.to_string(), "192.0.0.0/8");
/// assert!(parse_prefix("2001:db8::/32", AddressFamily::Ipv4).is_err());
/// # Ok(())
/// # }
/// ```
pub fn parse_prefix(text: &str, family: AddressFamily) -> Result<IpNet> {
    parse_network(text, family).map(|net| net.trunc())
}

/// Parse a bare address used for lookups. A length suffix is rejected.
pub fn parse_address(text: &str, family: AddressFamily) -> Result<IpAddr> {
    let addr = text
        .parse::<IpAddr>()
        .map_err(|_| Error::MalformedAddress(text.to_string()))?;
    if AddressFamily::of_addr(&addr) != family {
        return Err(Error::MalformedAddress(text.to_string()));
    }
    Ok(addr)
}
