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

pub mod candidates;
pub mod collateral;
pub mod collateral_loop;
pub mod distance;
pub mod election;
pub mod emission;
pub mod status;
pub mod tally;
pub mod vote;

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use parking_lot::Mutex;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tracing::{debug, instrument};

use crate::chain::ChainView;
use crate::config::IncentiveConfig;
use crate::mempool::Mempool;
use crate::net::message::Message;
use crate::peers::{AddressBook, PeerManager};
use crate::types::{BlockHeight, PeerEndpoint, WalletAddress};
use crate::wallet::Wallet;

use candidates::CandidateRegistry;
use collateral::CollateralProver;
use distance::k_closest;
use election::{select_winner, ELECTION_INITIAL_DELAY_SECS, ELECTION_INTERVAL_SECS};
use emission::{emit_vote, IncentiveKey};
use status::IncentiveStatus;
use tally::{handle_vote, VoteTally};
use vote::Vote;

fn now_unix() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// The incentive coordination core: leader election and self-collateral
/// proof, wired to the rest of the node through a handful of read-only
/// collaborator traits. The core never owns the wallet, chain, mempool,
/// or peer manager -- it borrows them for the lifetime of the runtime
/// that constructs it.
pub struct IncentiveCore {
    config: IncentiveConfig,
    chain: Arc<dyn ChainView + Send + Sync>,
    wallet: Arc<dyn Wallet + Send + Sync>,
    mempool: Arc<dyn Mempool + Send + Sync>,
    address_book: Arc<dyn AddressBook + Send + Sync>,
    peer_manager: Arc<dyn PeerManager + Send + Sync>,

    tally: Mutex<VoteTally>,
    candidates: Mutex<CandidateRegistry>,
    votes: Mutex<HashMap<u64, Vote>>,
    collateral: Mutex<CollateralProver>,
    incentive_key: Mutex<Option<IncentiveKey>>,
    last_processed_height: Mutex<BlockHeight>,

    shutdown: Notify,
    stopped: AtomicBool,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl IncentiveCore {
    pub fn new(
        config: IncentiveConfig,
        chain: Arc<dyn ChainView + Send + Sync>,
        wallet: Arc<dyn Wallet + Send + Sync>,
        mempool: Arc<dyn Mempool + Send + Sync>,
        address_book: Arc<dyn AddressBook + Send + Sync>,
        peer_manager: Arc<dyn PeerManager + Send + Sync>,
    ) -> Arc<IncentiveCore> {
        Arc::new(IncentiveCore {
            config,
            chain,
            wallet,
            mempool,
            address_book,
            peer_manager,
            tally: Mutex::new(VoteTally::new()),
            candidates: Mutex::new(CandidateRegistry::new()),
            votes: Mutex::new(HashMap::new()),
            collateral: Mutex::new(CollateralProver::new()),
            incentive_key: Mutex::new(None),
            last_processed_height: Mutex::new(0),
            shutdown: Notify::new(),
            stopped: AtomicBool::new(false),
            tasks: Mutex::new(Vec::new()),
        })
    }

    /// Start the election and collateral loops. No-op if incentive is
    /// disabled in config.
    pub fn start(self: &Arc<Self>) {
        if !self.config.enabled {
            debug!("incentive core is disabled, not starting loops");
            return;
        }
        debug!("incentive core is starting");

        let election_core = Arc::clone(self);
        let election_task = tokio::spawn(async move { election_core.election_loop().await });

        let mut handles = vec![election_task];

        if self.config.collateral > 0 {
            let collateral_core = Arc::clone(self);
            let collateral_task = tokio::spawn(async move { collateral_core.collateral_loop().await });
            handles.push(collateral_task);
        }

        *self.tasks.lock() = handles;
    }

    /// Cancel both timers. In-flight callbacks observe the shutdown
    /// signal and return without rescheduling.
    pub fn stop(&self) {
        debug!("incentive core is stopping");
        self.stopped.store(true, Ordering::SeqCst);
        self.shutdown.notify_waiters();
    }

    async fn election_loop(self: Arc<Self>) {
        tokio::select! {
            _ = self.shutdown.notified() => return,
            _ = tokio::time::sleep(std::time::Duration::from_secs(ELECTION_INITIAL_DELAY_SECS)) => {}
        }

        loop {
            if self.stopped.load(Ordering::SeqCst) {
                return;
            }
            self.election_tick().await;

            tokio::select! {
                _ = self.shutdown.notified() => return,
                _ = tokio::time::sleep(std::time::Duration::from_secs(ELECTION_INTERVAL_SECS)) => {}
            }
        }
    }

    async fn collateral_loop(self: Arc<Self>) {
        use collateral_loop::{COLLATERAL_INITIAL_DELAY_SECS, COLLATERAL_INTERVAL_SECS};

        tokio::select! {
            _ = self.shutdown.notified() => return,
            _ = tokio::time::sleep(std::time::Duration::from_secs(COLLATERAL_INITIAL_DELAY_SECS)) => {}
        }

        loop {
            if self.stopped.load(Ordering::SeqCst) {
                return;
            }
            self.collateral_tick();

            tokio::select! {
                _ = self.shutdown.notified() => return,
                _ = tokio::time::sleep(std::time::Duration::from_secs(COLLATERAL_INTERVAL_SECS)) => {}
            }
        }
    }

    fn ensure_incentive_key(&self) -> Option<IncentiveKey> {
        if let Some(key) = self.incentive_key.lock().clone() {
            return Some(key);
        }
        if self.wallet.is_locked() {
            debug!("wallet is locked, cannot load incentive key");
            return None;
        }
        let public_key = self.wallet.default_public_key()?;
        let key = IncentiveKey { public_key };
        *self.incentive_key.lock() = Some(key.clone());
        Some(key)
    }

    /// Locks are acquired candidates-then-votes-then-tally when more than
    /// one table needs pruning in the same tick, matching the order used
    /// elsewhere whenever both tables are touched together.
    ///
    /// The global votes table is pruned against each vote's raw
    /// `block_height` (the tip the voter observed), not its `target_height`
    /// (`block_height + 2`) -- matching the source, which compares
    /// `vote_block_height - it2->second.block_height() > 4` with no `+2`
    /// offset on the stored side. Using `target_height` here instead would
    /// widen this table's retention window to a gap of 6, not 4.
    fn prune_all(&self, vote_height: BlockHeight, now: u64) {
        self.candidates.lock().prune(now);
        self.votes
            .lock()
            .retain(|_, v| vote_height.saturating_sub(v.block_height) <= 4);
        self.tally.lock().prune(vote_height);
    }

    #[instrument(skip(self))]
    async fn election_tick(self: &Arc<Self>) {
        if !self.config.enabled {
            return;
        }

        let key = match self.ensure_incentive_key() {
            Some(k) => k,
            None => return,
        };

        let tip = self.chain.best_height();
        {
            let mut last = self.last_processed_height.lock();
            if tip <= *last {
                return;
            }
            *last = tip;
        }

        let now = now_unix();
        let vote_height = tip + 2;
        self.prune_all(vote_height, now);

        let peers = self.address_book.recent_good_endpoints();
        let kclosest = k_closest(&peers, vote_height, 2);
        if kclosest.len() < 2 {
            debug!(found = kclosest.len(), "not enough k-closest peers this tick");
            return;
        }

        let winner_ep: Option<PeerEndpoint> = {
            let candidates = self.candidates.lock();
            select_winner(&kclosest, vote_height, self.config.rate_limit_test_mode, &candidates, now)
        };

        let winner_ep = match winner_ep {
            Some(w) => w,
            None => return,
        };

        if winner_ep.wallet_address.is_empty() {
            return;
        }

        match emit_vote(
            self.chain.as_ref(),
            self.peer_manager.as_ref(),
            &key,
            winner_ep.wallet_address.clone(),
        ) {
            Ok(Some(vote)) => {
                self.votes.lock().insert(vote.nonce, vote);
                self.candidates.lock().touch(&winner_ep, now);
            }
            Ok(None) => {}
            Err(e) => debug!(error = %e, "vote emission skipped"),
        }
    }

    fn collateral_tick(&self) {
        if self.config.collateral == 0 {
            return;
        }
        let key_present = self.incentive_key.lock().is_some();
        if !key_present && self.ensure_incentive_key().is_none() {
            return;
        }
        let mut prover = self.collateral.lock();
        collateral_loop::tick(
            &mut prover,
            self.wallet.as_ref(),
            self.mempool.as_ref(),
            self.config.collateral,
            self.config.coin_unit,
        );
    }

    /// Accept an inbound network message. Returns true if it was the
    /// "ivote" command (whether or not the embedded vote was eligible),
    /// false otherwise so the host can route the message elsewhere.
    pub fn handle_message(&self, _from: &PeerEndpoint, message: &Message) -> bool {
        if !self.config.enabled {
            return false;
        }
        if !message.is_ivote() {
            return false;
        }
        let vote = match &message.ivote {
            Some(v) => v.clone(),
            None => return true,
        };
        let mut tally = self.tally.lock();
        handle_vote(&mut tally, vote, self.config.minimum_votes);
        true
    }

    pub fn winner_for(&self, height: BlockHeight) -> Option<WalletAddress> {
        self.tally.lock().winner(height)
    }

    pub fn votes_for(&self, height: BlockHeight) -> HashMap<WalletAddress, usize> {
        self.tally.lock().votes_for(height)
    }

    pub fn status(&self) -> IncentiveStatus {
        let claim = self.collateral.lock();
        IncentiveStatus {
            enabled: self.config.enabled,
            incentive_address: self.wallet.default_address(),
            collateral_valid: claim.claim().valid,
            collateral_balance: claim.claim().balance,
            tally_heights: self.tally.lock().heights().len(),
            candidate_count: self.candidates.lock().len(),
        }
    }
}
