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

use crate::incentive::candidates::CandidateRegistry;
use crate::types::{BlockHeight, PeerEndpoint};

pub const ELECTION_INITIAL_DELAY_SECS: u64 = 8;
pub const ELECTION_INTERVAL_SECS: u64 = 8;

/// Choose the incentive winner among the K closest peers for a target
/// height. Even heights prefer the nearest peer as primary; odd heights
/// prefer the second-nearest, so consecutive heights alternate even when
/// the top two peers are stable across ticks.
///
/// When `rate_limit_enabled` is set, a primary or fallback selected
/// within the last hour is skipped in favor of a peer the registry has
/// not seen recently -- but, preserving the original scan's condition
/// exactly, only a peer *already present* in the registry qualifies. A
/// peer the registry has never seen is skipped even though it is, by
/// definition, not "recent". This looks like a bug in the source
/// protocol; it is preserved here rather than silently fixed.
pub fn select_winner(
    kclosest: &[PeerEndpoint],
    target_height: BlockHeight,
    rate_limit_enabled: bool,
    candidates: &CandidateRegistry,
    now: u64,
) -> Option<PeerEndpoint> {
    if kclosest.len() < 2 {
        return None;
    }

    let (primary, fallback) = if target_height % 2 == 0 {
        (&kclosest[0], &kclosest[1])
    } else {
        (&kclosest[1], &kclosest[0])
    };

    if !rate_limit_enabled {
        return Some(primary.clone());
    }

    if !candidates.was_recent(primary, now) {
        return Some(primary.clone());
    }
    if !candidates.was_recent(fallback, now) {
        return Some(fallback.clone());
    }

    kclosest
        .iter()
        .find(|ep| candidates.contains(ep) && !candidates.was_recent(ep, now))
        .cloned()
}

#[cfg(test)]
mod test {
    use super::*;
    use std::net::Ipv4Addr;

    fn peers() -> Vec<PeerEndpoint> {
        vec![
            PeerEndpoint::new(Ipv4Addr::new(10, 0, 0, 1), 8333, "P0".into()),
            PeerEndpoint::new(Ipv4Addr::new(10, 0, 0, 2), 8333, "P1".into()),
        ]
    }

    #[test]
    fn fewer_than_two_peers_yields_no_winner() {
        let registry = CandidateRegistry::new();
        let one = vec![peers()[0].clone()];
        assert!(select_winner(&one, 100, false, &registry, 0).is_none());
    }

    #[test]
    fn parity_alternates_across_consecutive_heights() {
        let registry = CandidateRegistry::new();
        let p = peers();
        let base = 100u64;
        let mut expect_p0 = true;
        for h in base..base + 20 {
            let winner = select_winner(&p, h, false, &registry, 0).unwrap();
            if expect_p0 {
                assert_eq!(winner.wallet_address, "P0");
            } else {
                assert_eq!(winner.wallet_address, "P1");
            }
            expect_p0 = !expect_p0;
        }
    }

    #[test]
    fn even_height_prefers_primary() {
        let registry = CandidateRegistry::new();
        let winner = select_winner(&peers(), 100, false, &registry, 0).unwrap();
        assert_eq!(winner.wallet_address, "P0");
    }

    #[test]
    fn odd_height_prefers_second_closest() {
        let registry = CandidateRegistry::new();
        let winner = select_winner(&peers(), 101, false, &registry, 0).unwrap();
        assert_eq!(winner.wallet_address, "P1");
    }

    #[test]
    fn rate_limit_off_always_returns_primary_even_if_recent() {
        let mut registry = CandidateRegistry::new();
        let p = peers();
        registry.touch(&p[0], 0);
        let winner = select_winner(&p, 100, false, &registry, 10).unwrap();
        assert_eq!(winner.wallet_address, "P0");
    }

    #[test]
    fn rate_limit_on_falls_back_when_primary_recent() {
        let mut registry = CandidateRegistry::new();
        let p = peers();
        registry.touch(&p[0], 0);
        let winner = select_winner(&p, 100, true, &registry, 10).unwrap();
        assert_eq!(winner.wallet_address, "P1");
    }

    #[test]
    fn rate_limit_on_with_both_recent_and_no_third_candidate_yields_none() {
        let mut registry = CandidateRegistry::new();
        let p = peers();
        registry.touch(&p[0], 0);
        registry.touch(&p[1], 0);
        let winner = select_winner(&p, 100, true, &registry, 10);
        assert!(winner.is_none());
    }

    #[test]
    fn rate_limit_on_skips_a_never_seen_fresh_endpoint() {
        // Preserves the quirk: a third endpoint that the registry has
        // never seen at all is not selected, even though it clearly
        // qualifies as "not recently used".
        let mut registry = CandidateRegistry::new();
        let mut p = peers();
        p.push(PeerEndpoint::new(Ipv4Addr::new(10, 0, 0, 3), 8333, "P2".into()));
        registry.touch(&p[0], 0);
        registry.touch(&p[1], 0);
        let winner = select_winner(&p, 100, true, &registry, 10);
        assert!(winner.is_none());
    }

    #[test]
    fn rate_limit_on_selects_a_stale_known_endpoint() {
        let mut registry = CandidateRegistry::new();
        let mut p = peers();
        p.push(PeerEndpoint::new(Ipv4Addr::new(10, 0, 0, 3), 8333, "P2".into()));
        let now = 100_000u64;
        registry.touch(&p[0], now - 10); // still within the rate-limit window
        registry.touch(&p[1], now - 10); // still within the rate-limit window
        registry.touch(&p[2], now - (60 * 60 + 10)); // known, but past the window
        let winner = select_winner(&p, 100, true, &registry, now);
        assert_eq!(winner.unwrap().wallet_address, "P2");
    }
}
