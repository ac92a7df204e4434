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

use tracing::{debug, error};

use crate::error::{IncentiveError, Result};
use crate::mempool::Mempool;
use crate::types::WalletAddress;
use crate::wallet::{TxHash, UnspentOutput, Wallet};

/// A single-input, single-output spend built to prove an input is
/// spendable, without ever being broadcast.
#[derive(Clone, Debug)]
pub struct SentinelTransaction {
    pub input_tx_hash: TxHash,
    pub input_index: u32,
    pub output_value: u64,
    pub output_address: WalletAddress,
}

/// The input the prover currently stands behind, plus the claimed
/// balance it represents (in whole coins).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CollateralInput {
    pub tx_hash: TxHash,
    pub index: u32,
}

#[derive(Clone, Debug, Default)]
pub struct CollateralClaim {
    pub input: Option<CollateralInput>,
    pub balance: f64,
    pub valid: bool,
}

/// Coin selection, sentinel construction, and mempool probing for the
/// local node's collateral proof.
pub struct CollateralProver {
    claim: CollateralClaim,
}

impl CollateralProver {
    pub fn new() -> CollateralProver {
        CollateralProver {
            claim: CollateralClaim::default(),
        }
    }

    pub fn claim(&self) -> &CollateralClaim {
        &self.claim
    }

    /// Outputs worth at least `collateral * coin_unit`, locked to the
    /// wallet's default address.
    pub fn select_coins(
        wallet: &dyn Wallet,
        collateral: u64,
        coin_unit: u64,
    ) -> Result<Vec<UnspentOutput>> {
        let default_address = wallet
            .default_address()
            .ok_or(IncentiveError::KeyUnavailable)?;
        let threshold = collateral.saturating_mul(coin_unit);

        let coins = wallet
            .available_coins(false)
            .into_iter()
            .filter(|o| o.value >= threshold)
            .filter(|o| {
                wallet
                    .extract_destination(&o.script_pubkey)
                    .map(|addr| addr == default_address)
                    .unwrap_or(false)
            })
            .collect();

        Ok(coins)
    }

    /// Build the sentinel spend for a chosen output.
    pub fn build_sentinel(
        wallet: &dyn Wallet,
        output: &UnspentOutput,
        collateral: u64,
        coin_unit: u64,
    ) -> Result<SentinelTransaction> {
        let default_address = wallet
            .default_address()
            .ok_or(IncentiveError::KeyUnavailable)?;

        let destination = wallet
            .extract_destination(&output.script_pubkey)
            .ok_or(IncentiveError::ScriptExtractionFailed)?;

        if destination != default_address {
            error!(destination = %destination, "collateral output does not pay the default address");
            return Err(IncentiveError::ScriptExtractionFailed);
        }

        if wallet.get_key(&destination).is_none() {
            return Err(IncentiveError::UnknownKey(destination));
        }

        Ok(SentinelTransaction {
            input_tx_hash: output.tx_hash.clone(),
            input_index: output.index,
            output_value: collateral.saturating_mul(coin_unit),
            output_address: default_address,
        })
    }

    /// Try each candidate coin in turn until one's sentinel is accepted
    /// by the mempool; store it as the current claim.
    pub fn discover(
        &mut self,
        wallet: &dyn Wallet,
        mempool: &dyn Mempool,
        collateral: u64,
        coin_unit: u64,
    ) -> Result<()> {
        let coins = Self::select_coins(wallet, collateral, coin_unit)?;
        if coins.is_empty() {
            self.claim = CollateralClaim::default();
            return Err(IncentiveError::NoCollateralCandidate);
        }

        for coin in &coins {
            let sentinel = match Self::build_sentinel(wallet, coin, collateral, coin_unit) {
                Ok(s) => s,
                Err(e) => {
                    error!(error = %e, "skipping collateral candidate");
                    continue;
                }
            };

            let (accepted, reason) = mempool.acceptable(&sentinel);
            if accepted {
                debug!(tx_hash = ?coin.tx_hash, "collateral candidate accepted");
                self.claim = CollateralClaim {
                    input: Some(CollateralInput {
                        tx_hash: coin.tx_hash.clone(),
                        index: coin.index,
                    }),
                    balance: coin.value as f64 / coin_unit as f64,
                    valid: true,
                };
                return Ok(());
            } else {
                debug!(reason, "collateral candidate rejected by mempool");
            }
        }

        self.claim = CollateralClaim::default();
        Err(IncentiveError::NoCollateralCandidate)
    }

    /// Re-probe the currently stored claim. On any failure the claim is
    /// marked invalid (but left in place for logging) and the caller is
    /// expected to call `discover` again in the same tick.
    pub fn revalidate(&mut self, wallet: &dyn Wallet, mempool: &dyn Mempool, collateral: u64, coin_unit: u64) {
        let input = match &self.claim.input {
            Some(i) => i.clone(),
            None => {
                self.claim.valid = false;
                return;
            }
        };

        let coin = wallet
            .available_coins(true)
            .into_iter()
            .find(|o| o.tx_hash == input.tx_hash && o.index == input.index);

        let coin = match coin {
            Some(c) => c,
            None => {
                self.claim.valid = false;
                return;
            }
        };

        let sentinel = match Self::build_sentinel(wallet, &coin, collateral, coin_unit) {
            Ok(s) => s,
            Err(_) => {
                self.claim.valid = false;
                return;
            }
        };

        let (accepted, _reason) = mempool.acceptable(&sentinel);
        self.claim.valid = accepted;
    }
}

impl Default for CollateralProver {
    fn default() -> CollateralProver {
        CollateralProver::new()
    }
}
