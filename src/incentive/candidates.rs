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

use std::collections::HashMap;
use std::time::Duration;

use crate::types::PeerEndpoint;

/// How long a selection is remembered before it ages out of the registry.
pub const CANDIDATE_RETENTION: Duration = Duration::from_secs(20 * 60);

/// The one-hour window used by the optional rate-limit mode.
pub const CANDIDATE_RATE_LIMIT: Duration = Duration::from_secs(60 * 60);

#[derive(Clone, Copy, Debug, Default)]
pub struct CandidateEntry {
    pub last_selected: u64,
    pub selection_count: u64,
}

/// Recent local selections, keyed by the peer endpoint chosen as an
/// incentive winner. Used only to support the optional rate-limit mode;
/// it is not a consensus structure.
#[derive(Default)]
pub struct CandidateRegistry {
    entries: HashMap<PeerEndpoint, CandidateEntry>,
}

impl CandidateRegistry {
    pub fn new() -> CandidateRegistry {
        CandidateRegistry {
            entries: HashMap::new(),
        }
    }

    pub fn touch(&mut self, endpoint: &PeerEndpoint, now: u64) {
        let entry = self.entries.entry(endpoint.clone()).or_default();
        entry.last_selected = now;
        entry.selection_count += 1;
    }

    pub fn last(&self, endpoint: &PeerEndpoint) -> u64 {
        self.entries.get(endpoint).map(|e| e.last_selected).unwrap_or(0)
    }

    pub fn contains(&self, endpoint: &PeerEndpoint) -> bool {
        self.entries.contains_key(endpoint)
    }

    /// True if `endpoint` was selected within the rate-limit window. The
    /// source selects a candidate when `elapsed > 3600` (strict), so an
    /// endpoint at exactly the one-hour boundary is still "recent".
    pub fn was_recent(&self, endpoint: &PeerEndpoint, now: u64) -> bool {
        let last = self.last(endpoint);
        last != 0 && now.saturating_sub(last) <= CANDIDATE_RATE_LIMIT.as_secs()
    }

    /// Remove entries untouched for longer than the retention window.
    pub fn prune(&mut self, now: u64) {
        let retention = CANDIDATE_RETENTION.as_secs();
        self.entries
            .retain(|_, entry| now.saturating_sub(entry.last_selected) <= retention);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::net::Ipv4Addr;

    fn ep(octet: u8) -> PeerEndpoint {
        PeerEndpoint::new(Ipv4Addr::new(10, 0, 0, octet), 8333, "addr".into())
    }

    #[test]
    fn touch_sets_timestamp_and_increments_count() {
        let mut reg = CandidateRegistry::new();
        let e = ep(1);
        reg.touch(&e, 1000);
        assert_eq!(reg.last(&e), 1000);
        reg.touch(&e, 1010);
        assert_eq!(reg.last(&e), 1010);
        assert_eq!(reg.entries.get(&e).unwrap().selection_count, 2);
    }

    #[test]
    fn unknown_endpoint_has_zero_last() {
        let reg = CandidateRegistry::new();
        assert_eq!(reg.last(&ep(9)), 0);
    }

    #[test]
    fn prune_drops_entries_past_twenty_minutes() {
        let mut reg = CandidateRegistry::new();
        let e = ep(1);
        reg.touch(&e, 0);
        reg.prune(20 * 60 + 1);
        assert!(!reg.contains(&e));
    }

    #[test]
    fn prune_keeps_entries_within_window() {
        let mut reg = CandidateRegistry::new();
        let e = ep(1);
        reg.touch(&e, 0);
        reg.prune(20 * 60);
        assert!(reg.contains(&e));
    }

    #[test]
    fn was_recent_respects_one_hour_window() {
        let mut reg = CandidateRegistry::new();
        let e = ep(1);
        reg.touch(&e, 0);
        assert!(reg.was_recent(&e, 60 * 60 - 1));
        assert!(!reg.was_recent(&e, 60 * 60 + 1));
    }

    #[test]
    fn was_recent_includes_the_exact_one_hour_boundary() {
        // The source selects a candidate only when elapsed > 3600
        // (strict), so exactly one hour out is still "too soon".
        let mut reg = CandidateRegistry::new();
        let e = ep(1);
        reg.touch(&e, 0);
        assert!(reg.was_recent(&e, 60 * 60));
    }
}
