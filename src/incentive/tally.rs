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

use tracing::debug;

use crate::incentive::vote::Vote;
use crate::types::{BlockHeight, WalletAddress};

/// Per-height, per-address vote lists. Votes are appended on arrival and
/// are never deduplicated by voter public key: a misbehaving peer that
/// resends the same vote inflates the count for its address. This
/// matches the network's original behavior; a stricter rewrite would key
/// by voter public key instead.
#[derive(Default)]
pub struct VoteTally {
    by_height: HashMap<BlockHeight, HashMap<WalletAddress, Vec<Vote>>>,
    winners: HashMap<BlockHeight, WalletAddress>,
}

impl VoteTally {
    pub fn new() -> VoteTally {
        VoteTally {
            by_height: HashMap::new(),
            winners: HashMap::new(),
        }
    }

    /// Record an inbound vote under its target height, then update the
    /// provisional winner for that height: the first address to reach
    /// the minimum vote threshold becomes the winner, and only a
    /// strictly higher count from a different address displaces it.
    /// Returns the winner for this height, if any.
    pub fn record(&mut self, vote: Vote, minimum_votes: u64) -> Option<WalletAddress> {
        let height = vote.target_height();
        let address = vote.address.clone();

        let bucket = self.by_height.entry(height).or_default();
        bucket.entry(address.clone()).or_default().push(vote);
        let count = bucket.get(&address).map(Vec::len).unwrap_or(0);

        debug!(height, "incentive votes:");
        for (addr, votes) in bucket.iter() {
            debug!(height, address = %addr, count = votes.len(), "candidate tally");
        }

        if count as u64 >= minimum_votes {
            self.set_winner_if_stronger(height, address, count);
        }

        self.winners.get(&height).cloned()
    }

    /// Only replace the current winner if the challenger's count strictly
    /// exceeds it; an equal count, or no challenge at all, keeps the
    /// incumbent in place.
    fn set_winner_if_stronger(&mut self, height: BlockHeight, candidate: WalletAddress, candidate_votes: usize) {
        match self.winners.get(&height) {
            None => {
                self.winners.insert(height, candidate);
            }
            Some(incumbent) if *incumbent == candidate => {}
            Some(incumbent) => {
                let incumbent_votes = self
                    .by_height
                    .get(&height)
                    .and_then(|b| b.get(incumbent))
                    .map(Vec::len)
                    .unwrap_or(0);
                if candidate_votes > incumbent_votes {
                    self.winners.insert(height, candidate);
                }
            }
        }
    }

    pub fn winner(&self, height: BlockHeight) -> Option<WalletAddress> {
        self.winners.get(&height).cloned()
    }

    pub fn votes_for(&self, height: BlockHeight) -> HashMap<WalletAddress, usize> {
        self.by_height
            .get(&height)
            .map(|bucket| bucket.iter().map(|(addr, votes)| (addr.clone(), votes.len())).collect())
            .unwrap_or_default()
    }

    pub fn total_votes_at(&self, height: BlockHeight) -> usize {
        self.by_height
            .get(&height)
            .map(|bucket| bucket.values().map(Vec::len).sum())
            .unwrap_or(0)
    }

    /// Drop every height, and its winner, that now lies more than 4 below
    /// the current vote height.
    pub fn prune(&mut self, vote_height: BlockHeight) {
        self.by_height
            .retain(|height, _| vote_height.saturating_sub(*height) <= 4);
        self.winners
            .retain(|height, _| vote_height.saturating_sub(*height) <= 4);
    }

    pub fn heights(&self) -> Vec<BlockHeight> {
        self.by_height.keys().cloned().collect()
    }
}

/// Accept an inbound "ivote" vote: if eligible, fold it into the tally
/// and return the (possibly unchanged) provisional winner for its target
/// height. Ineligible votes (score <= -1) are discarded but the call is
/// still considered handled.
pub fn handle_vote(tally: &mut VoteTally, vote: Vote, minimum_votes: u64) -> Option<WalletAddress> {
    if !vote.is_eligible() {
        debug!(address = %vote.address, "discarding ineligible vote");
        return tally.winner(vote.target_height());
    }
    tally.record(vote, minimum_votes)
}
