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

use crate::types::PeerEndpoint;

/// The node's gossiped view of recently-seen peers.
pub trait AddressBook {
    fn recent_good_endpoints(&self) -> Vec<PeerEndpoint>;
}

/// The subset of peer-manager behavior the core relies on to relay a
/// vote: active TCP connections to send inventory to, and a UDP
/// broadcast path reaching the wider address-book graph.
pub trait PeerManager {
    fn tcp_connections(&self) -> Vec<PeerEndpoint>;

    /// Send a relayed inventory item to a specific connected peer.
    /// Fire-and-forget: the core does not retry on failure.
    fn send_inventory(&self, to: &PeerEndpoint, item: crate::net::message::InventoryItem);

    /// Broadcast raw encoded bytes over UDP via the address-book graph.
    fn broadcast(&self, bytes: &[u8]);
}
