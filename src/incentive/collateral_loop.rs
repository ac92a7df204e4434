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

pub const COLLATERAL_INITIAL_DELAY_SECS: u64 = 12;
pub const COLLATERAL_INTERVAL_SECS: u64 = 10 * 60;

use tracing::debug;

use crate::incentive::collateral::CollateralProver;
use crate::mempool::Mempool;
use crate::wallet::Wallet;

/// Revalidate the stored claim; if it is no longer valid, rediscover.
/// Runs entirely within one tick: a rejection and a fresh discovery both
/// happen before the loop sleeps again.
pub fn tick(prover: &mut CollateralProver, wallet: &dyn Wallet, mempool: &dyn Mempool, collateral: u64, coin_unit: u64) {
    prover.revalidate(wallet, mempool, collateral, coin_unit);

    if !prover.claim().valid {
        debug!("collateral claim invalid, rediscovering");
        if let Err(e) = prover.discover(wallet, mempool, collateral, coin_unit) {
            debug!(error = %e, "collateral rediscovery found no acceptable coin this tick");
        }
    }
}
