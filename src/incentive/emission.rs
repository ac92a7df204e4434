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

use rand::RngCore;
use tracing::debug;

use crate::chain::ChainView;
use crate::error::{IncentiveError, Result};
use crate::incentive::vote::Vote;
use crate::net::message::InventoryItem;
use crate::peers::PeerManager;
use crate::types::WalletAddress;
use crate::util::hash::voter_score;

/// The local node's identity within the incentive protocol.
#[derive(Clone, Debug)]
pub struct IncentiveKey {
    pub public_key: Vec<u8>,
}

/// Build and relay a vote for `wallet_address`, the winner the election
/// loop just selected. Returns `Ok(None)` (rather than an error) when the
/// node is mid-IBD, since that is a silent, expected skip rather than a
/// fault.
pub fn emit_vote(
    chain: &dyn ChainView,
    peers: &dyn PeerManager,
    key: &IncentiveKey,
    wallet_address: WalletAddress,
) -> Result<Option<Vote>> {
    let tip = chain.best_height();
    let index = chain
        .find_index_by_height(tip)
        .ok_or(IncentiveError::KeyUnavailable)?;

    if wallet_address.is_empty() {
        return Err(IncentiveError::EmptyWinnerAddress);
    }

    let score = voter_score(&key.public_key);
    debug!(score, "incentive manager forming vote");
    if score <= -1 {
        return Err(IncentiveError::IneligibleScore);
    }

    if chain.is_initial_block_download() {
        debug!("skipping vote emission during initial block download");
        return Ok(None);
    }

    let nonce = rand::thread_rng().next_u64();
    let vote = Vote::new(
        key.public_key.clone(),
        wallet_address,
        index.height,
        index.hash,
        score,
        nonce,
    );

    for peer in peers.tcp_connections() {
        peers.send_inventory(&peer, InventoryItem::for_vote(&vote));
    }
    peers.broadcast(&vote.encode());

    Ok(Some(vote))
}
