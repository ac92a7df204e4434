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

use thiserror::Error;

/// Errors surfaced by the incentive coordination core. None of these are
/// fatal to the host process: callers at the tick boundary log and move on.
#[derive(Error, Debug)]
pub enum IncentiveError {
    #[error("wallet is locked")]
    WalletLocked,

    #[error("no incentive key available")]
    KeyUnavailable,

    #[error("fewer than {needed} of {found} required peers for k-closest selection")]
    NotEnoughPeers { needed: usize, found: usize },

    #[error("could not extract destination address from output script")]
    ScriptExtractionFailed,

    #[error("private key for address {0} is not known to the wallet")]
    UnknownKey(String),

    #[error("mempool rejected sentinel transaction: {0}")]
    MempoolRejected(String),

    #[error("no spendable output met the collateral threshold")]
    NoCollateralCandidate,

    #[error("node is still completing initial block download")]
    InitialBlockDownload,

    #[error("local incentive score is ineligible (score <= -1)")]
    IneligibleScore,

    #[error("winner has an empty wallet address")]
    EmptyWinnerAddress,
}

pub type Result<T> = std::result::Result<T, IncentiveError>;
