/*
 copyright: (c) 2013-2018 by Blockstack PBC, a public benefit corporation.

 This file is part of Blockstack.

 Blockstack is free software. You may redistribute or modify
 it under the terms of the GNU General Public License as published by
 the Free Software Foundation, either version 3 of the License or
 (at your option) any later version.

 Blockstack is distributed in the hope that it will be useful,
 but WITHOUT ANY WARRANTY, including without the implied warranty of
 MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 GNU General Public License for more details.

 You should have received a copy of the GNU General Public License
 along with Blockstack. If not, see <http://www.gnu.org/licenses/>.
*/

use std::net::{IpAddr, Ipv4Addr};

use serde_derive::{Deserialize, Serialize};

/// Opaque base58-like wallet address. The core never decodes it; it is
/// compared and hashed as an address of record.
pub type WalletAddress = String;

pub type BlockHeight = u64;
pub type BlockHash = [u8; 32];

/// A peer as seen on the wire: network address, port, and the wallet
/// address it last advertised for incentive purposes.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PeerEndpoint {
    pub addr: Ipv4Addr,
    pub port: u16,
    pub wallet_address: WalletAddress,
}

impl PeerEndpoint {
    pub fn new(addr: Ipv4Addr, port: u16, wallet_address: WalletAddress) -> PeerEndpoint {
        PeerEndpoint {
            addr,
            port,
            wallet_address,
        }
    }

    /// Loopback, multicast, and unspecified addresses are never usable
    /// ranking candidates.
    pub fn is_usable(&self) -> bool {
        let ip = IpAddr::V4(self.addr);
        !(ip.is_loopback() || ip.is_multicast() || ip.is_unspecified())
    }
}

impl std::fmt::Display for PeerEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.addr, self.port)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn loopback_is_unusable() {
        let ep = PeerEndpoint::new(Ipv4Addr::new(127, 0, 0, 1), 8333, "addr1".into());
        assert!(!ep.is_usable());
    }

    #[test]
    fn multicast_is_unusable() {
        let ep = PeerEndpoint::new(Ipv4Addr::new(224, 0, 0, 1), 8333, "addr1".into());
        assert!(!ep.is_usable());
    }

    #[test]
    fn unspecified_is_unusable() {
        let ep = PeerEndpoint::new(Ipv4Addr::new(0, 0, 0, 0), 8333, "addr1".into());
        assert!(!ep.is_usable());
    }

    #[test]
    fn ordinary_address_is_usable() {
        let ep = PeerEndpoint::new(Ipv4Addr::new(10, 0, 0, 5), 8333, "addr1".into());
        assert!(ep.is_usable());
    }
}
