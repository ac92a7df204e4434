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

use serde_derive::{Deserialize, Serialize};

use crate::types::{BlockHash, BlockHeight, WalletAddress};

/// A cast vote for an incentive winner. `block_height` is the chain tip
/// height the voter observed at cast time, *not* the target vote height;
/// every consumer -- sender and receiver alike -- adds 2 to arrive at the
/// height the vote actually targets.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vote {
    pub voter_public_key: Vec<u8>,
    pub address: WalletAddress,
    pub block_height: BlockHeight,
    pub block_hash: BlockHash,
    pub score: i64,
    pub nonce: u64,
}

impl Vote {
    pub fn new(
        voter_public_key: Vec<u8>,
        address: WalletAddress,
        block_height: BlockHeight,
        block_hash: BlockHash,
        score: i64,
        nonce: u64,
    ) -> Vote {
        Vote {
            voter_public_key,
            address,
            block_height,
            block_hash,
            score,
            nonce,
        }
    }

    /// The height this vote targets: always two blocks ahead of the tip
    /// the voter observed.
    pub fn target_height(&self) -> BlockHeight {
        self.block_height + 2
    }

    pub fn is_eligible(&self) -> bool {
        self.score > -1
    }

    pub fn encode(&self) -> Vec<u8> {
        serde_json::to_vec(self).expect("Vote serialization cannot fail")
    }

    pub fn decode(bytes: &[u8]) -> serde_json::Result<Vote> {
        serde_json::from_slice(bytes)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn round_trip_preserves_all_fields() {
        let v = Vote::new(vec![1, 2, 3], "addrZ".into(), 100, [7u8; 32], 0, 555);
        let bytes = v.encode();
        let decoded = Vote::decode(&bytes).unwrap();
        assert_eq!(v, decoded);
    }

    #[test]
    fn target_height_is_tip_plus_two() {
        let v = Vote::new(vec![], "a".into(), 98, [0u8; 32], 0, 1);
        assert_eq!(v.target_height(), 100);
    }

    #[test]
    fn negative_score_is_ineligible() {
        let v = Vote::new(vec![], "a".into(), 98, [0u8; 32], -1, 1);
        assert!(!v.is_eligible());
        let v2 = Vote::new(vec![], "a".into(), 98, [0u8; 32], 0, 1);
        assert!(v2.is_eligible());
    }
}
