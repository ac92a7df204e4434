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

use crate::types::{BlockHash, BlockHeight};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockIndex {
    pub height: BlockHeight,
    pub hash: BlockHash,
}

/// Read-only view onto the node's chain index.
pub trait ChainView {
    fn best_height(&self) -> BlockHeight;

    fn find_index_by_height(&self, height: BlockHeight) -> Option<BlockIndex>;

    /// Whether the node is still completing its initial block download.
    fn is_initial_block_download(&self) -> bool;
}
