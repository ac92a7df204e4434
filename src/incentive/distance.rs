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

use crate::types::{BlockHeight, PeerEndpoint};
use crate::util::hash::{endpoint_score, xor_distance};

/// The K peers whose endpoint score lies closest, by XOR distance, to a
/// target block height. Loopback/multicast/unspecified peers are never
/// candidates. Ties in distance keep whichever peer came first in the
/// input, so the result is stable for a given input ordering.
pub fn k_closest(peers: &[PeerEndpoint], target_height: BlockHeight, k: usize) -> Vec<PeerEndpoint> {
    let mut ranked: Vec<(u64, usize, &PeerEndpoint)> = peers
        .iter()
        .enumerate()
        .filter(|(_, p)| p.is_usable())
        .map(|(i, p)| (xor_distance(target_height, endpoint_score(p)), i, p))
        .collect();

    ranked.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.cmp(&b.1)));

    ranked
        .into_iter()
        .take(k)
        .map(|(_, _, p)| p.clone())
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use std::net::Ipv4Addr;

    fn peer(octet: u8, port: u16, addr: &str) -> PeerEndpoint {
        PeerEndpoint::new(Ipv4Addr::new(10, 0, 0, octet), port, addr.into())
    }

    #[test]
    fn excludes_unusable_addresses() {
        let peers = vec![
            PeerEndpoint::new(Ipv4Addr::new(127, 0, 0, 1), 8333, "loop".into()),
            PeerEndpoint::new(Ipv4Addr::new(224, 0, 0, 1), 8333, "mcast".into()),
            peer(5, 8333, "good"),
        ];
        let closest = k_closest(&peers, 100, 2);
        assert_eq!(closest.len(), 1);
        assert_eq!(closest[0].wallet_address, "good");
    }

    #[test]
    fn never_returns_more_than_k() {
        let peers: Vec<_> = (1..10u8).map(|i| peer(i, 8333, "addr")).collect();
        let closest = k_closest(&peers, 42, 2);
        assert!(closest.len() <= 2);
    }

    #[test]
    fn results_are_sorted_by_ascending_distance() {
        let peers: Vec<_> = (1..20u8).map(|i| peer(i, 8333 + i as u16, "addr")).collect();
        let closest = k_closest(&peers, 555, 5);
        let distances: Vec<u64> = closest
            .iter()
            .map(|p| xor_distance(555, endpoint_score(p)))
            .collect();
        let mut sorted = distances.clone();
        sorted.sort();
        assert_eq!(distances, sorted);
    }

    #[test]
    fn stable_for_repeated_calls_on_same_input() {
        let peers: Vec<_> = (1..6u8).map(|i| peer(i, 8333, "addr")).collect();
        let a = k_closest(&peers, 77, 3);
        let b = k_closest(&peers, 77, 3);
        assert_eq!(a, b);
    }

    #[test]
    fn empty_peer_list_yields_empty_result() {
        let closest = k_closest(&[], 100, 2);
        assert!(closest.is_empty());
    }
}
