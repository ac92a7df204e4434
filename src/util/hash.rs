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

use byteorder::{BigEndian, ByteOrder};
use sha2::{Digest, Sha256};

use crate::types::PeerEndpoint;

/// Fixed, deterministic 32-bit derivation of a peer endpoint used as the
/// target of the XOR-distance ranking. Two honest nodes computing this
/// over the same endpoint always agree.
pub fn endpoint_score(endpoint: &PeerEndpoint) -> u32 {
    let mut buf = Vec::with_capacity(6);
    buf.extend_from_slice(&endpoint.addr.octets());
    buf.extend_from_slice(&endpoint.port.to_be_bytes());
    let digest = Sha256::digest(&buf);
    BigEndian::read_u32(&digest[0..4])
}

/// XOR distance between a target height and a peer's endpoint score.
pub fn xor_distance(target_height: u64, score: u32) -> u64 {
    target_height ^ u64::from(score)
}

/// Deterministic score for a voter's public key. A value of -1 flags the
/// voter as ineligible to cast or receive a vote; this mirrors a reserved
/// high bit in the underlying hash rather than any particular identity
/// blocklist.
pub fn voter_score(pubkey: &[u8]) -> i64 {
    let digest = Sha256::digest(pubkey);
    let v = BigEndian::read_u64(&digest[0..8]);
    if v & 0x8000_0000_0000_0000 != 0 {
        -1
    } else {
        (v >> 1) as i64 % 1_000_000
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::net::Ipv4Addr;

    #[test]
    fn endpoint_score_is_deterministic() {
        let ep = PeerEndpoint::new(Ipv4Addr::new(10, 0, 0, 1), 8333, "addrA".into());
        assert_eq!(endpoint_score(&ep), endpoint_score(&ep));
    }

    #[test]
    fn different_ports_usually_score_differently() {
        let ep1 = PeerEndpoint::new(Ipv4Addr::new(10, 0, 0, 1), 8333, "addrA".into());
        let ep2 = PeerEndpoint::new(Ipv4Addr::new(10, 0, 0, 1), 8334, "addrA".into());
        assert_ne!(endpoint_score(&ep1), endpoint_score(&ep2));
    }

    #[test]
    fn xor_distance_is_symmetric_under_reapplication() {
        let d = xor_distance(104, 57);
        assert_eq!(d ^ 57, 104);
    }

    #[test]
    fn voter_score_is_deterministic() {
        let key = b"some-public-key-bytes";
        assert_eq!(voter_score(key), voter_score(key));
    }
}
