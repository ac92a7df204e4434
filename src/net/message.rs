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

use crate::incentive::vote::Vote;

/// Wire command naming the vote message.
pub const COMMAND_IVOTE: &str = "ivote";

/// Inventory type tag advertised alongside relayed "ivote" items.
pub const TYPE_MSG_IVOTE: u32 = 0x2;

/// A decoded inbound network message. The core only understands the
/// "ivote" command; every other command is passed back to the caller
/// unhandled.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Message {
    pub command: String,
    pub ivote: Option<Vote>,
}

impl Message {
    pub fn ivote(vote: Vote) -> Message {
        Message {
            command: COMMAND_IVOTE.to_string(),
            ivote: Some(vote),
        }
    }

    pub fn is_ivote(&self) -> bool {
        self.command == COMMAND_IVOTE
    }
}

/// An inventory advertisement relayed to a connected TCP peer.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InventoryItem {
    pub inv_type: u32,
    pub hash_nonce: u64,
}

impl InventoryItem {
    pub fn for_vote(vote: &Vote) -> InventoryItem {
        InventoryItem {
            inv_type: TYPE_MSG_IVOTE,
            hash_nonce: vote.nonce,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::incentive::vote::Vote;

    #[test]
    fn recognizes_ivote_command() {
        let v = Vote::new(vec![], "a".into(), 10, [0u8; 32], 0, 1);
        let msg = Message::ivote(v);
        assert!(msg.is_ivote());
    }

    #[test]
    fn other_commands_are_not_ivote() {
        let msg = Message {
            command: "version".to_string(),
            ivote: None,
        };
        assert!(!msg.is_ivote());
    }
}
