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

use serde_derive::Serialize;

use crate::types::WalletAddress;

/// A read-only snapshot of the core's state, shaped for whatever RPC
/// surface the host process exposes it through. Building this struct is
/// the core's job; serving it over JSON-RPC is not (that transport is an
/// external collaborator).
#[derive(Clone, Debug, Serialize)]
pub struct IncentiveStatus {
    pub enabled: bool,
    pub incentive_address: Option<WalletAddress>,
    pub collateral_valid: bool,
    pub collateral_balance: f64,
    pub tally_heights: usize,
    pub candidate_count: usize,
}
