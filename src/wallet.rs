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

use crate::types::WalletAddress;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TxHash(pub [u8; 32]);

/// A spendable unspent output as seen by the wallet.
#[derive(Clone, Debug)]
pub struct UnspentOutput {
    pub tx_hash: TxHash,
    pub index: u32,
    pub value: u64,
    pub script_pubkey: Vec<u8>,
}

/// Opaque private key handle. The core never inspects key material; it
/// only needs to know whether one is available for a given address.
#[derive(Clone, Debug)]
pub struct PrivateKeyHandle(pub String);

/// Read-only surface the core needs from the node's wallet. The wallet's
/// own locking and persistence are its responsibility, not the core's.
pub trait Wallet {
    fn is_locked(&self) -> bool;

    /// The wallet's default address, derived from its default public key.
    /// This is the address the incentive key is bound to.
    fn default_address(&self) -> Option<WalletAddress>;

    fn default_public_key(&self) -> Option<Vec<u8>>;

    fn get_key(&self, address: &WalletAddress) -> Option<PrivateKeyHandle>;

    /// Spendable outputs, excluding zero-value ones unless requested.
    fn available_coins(&self, include_zero: bool) -> Vec<UnspentOutput>;

    /// Extract the destination address encoded in a script_pubkey, if any.
    fn extract_destination(&self, script_pubkey: &[u8]) -> Option<WalletAddress>;
}
