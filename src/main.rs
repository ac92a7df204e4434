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

use std::net::Ipv4Addr;
use std::path::PathBuf;
use std::sync::Arc;

use incentive_core::chain::{BlockIndex, ChainView};
use incentive_core::config::IncentiveConfig;
use incentive_core::mempool::Mempool;
use incentive_core::peers::{AddressBook, PeerManager};
use incentive_core::types::{BlockHeight, PeerEndpoint};
use incentive_core::wallet::{UnspentOutput, Wallet};
use incentive_core::IncentiveCore;

const USAGE: &str = "\
incentive-node

USAGE:
    incentive-node [--config <path>]

OPTIONS:
    --config <path>    Path to an IncentiveConfig TOML file (defaults are used if omitted)
    -h, --help         Print this message
";

fn parse_args() -> anyhow::Result<Option<PathBuf>> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        print!("{}", USAGE);
        std::process::exit(0);
    }
    Ok(args.opt_value_from_str("--config")?)
}

/// A chain view with no blocks, standing in for the node's real chain
/// index until this core is wired into one. The host process is
/// expected to supply its own `ChainView` implementation.
struct StandaloneChain;

impl ChainView for StandaloneChain {
    fn best_height(&self) -> BlockHeight {
        0
    }
    fn find_index_by_height(&self, height: BlockHeight) -> Option<BlockIndex> {
        Some(BlockIndex {
            height,
            hash: [0u8; 32],
        })
    }
    fn is_initial_block_download(&self) -> bool {
        true
    }
}

struct StandaloneWallet;

impl Wallet for StandaloneWallet {
    fn is_locked(&self) -> bool {
        true
    }
    fn default_address(&self) -> Option<String> {
        None
    }
    fn default_public_key(&self) -> Option<Vec<u8>> {
        None
    }
    fn get_key(&self, _address: &String) -> Option<incentive_core::wallet::PrivateKeyHandle> {
        None
    }
    fn available_coins(&self, _include_zero: bool) -> Vec<UnspentOutput> {
        Vec::new()
    }
    fn extract_destination(&self, _script_pubkey: &[u8]) -> Option<String> {
        None
    }
}

struct StandaloneMempool;

impl Mempool for StandaloneMempool {
    fn acceptable(
        &self,
        _tx: &incentive_core::incentive::collateral::SentinelTransaction,
    ) -> (bool, String) {
        (false, "standalone node has no mempool".to_string())
    }
}

struct StandaloneAddressBook;

impl AddressBook for StandaloneAddressBook {
    fn recent_good_endpoints(&self) -> Vec<PeerEndpoint> {
        Vec::new()
    }
}

struct StandalonePeerManager;

impl PeerManager for StandalonePeerManager {
    fn tcp_connections(&self) -> Vec<PeerEndpoint> {
        Vec::new()
    }
    fn send_inventory(&self, _to: &PeerEndpoint, _item: incentive_core::net::message::InventoryItem) {}
    fn broadcast(&self, _bytes: &[u8]) {}
}

fn dummy_endpoint() -> PeerEndpoint {
    PeerEndpoint::new(Ipv4Addr::new(127, 0, 0, 1), 8333, String::new())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config_path = parse_args()?;
    let config = match config_path {
        Some(path) => IncentiveConfig::load(&path)?,
        None => IncentiveConfig::default(),
    };

    let core = IncentiveCore::new(
        config,
        Arc::new(StandaloneChain),
        Arc::new(StandaloneWallet),
        Arc::new(StandaloneMempool),
        Arc::new(StandaloneAddressBook),
        Arc::new(StandalonePeerManager),
    );

    core.start();

    // The standalone binary stands in for a node runtime that would
    // otherwise dispatch inbound "ivote" messages here as they arrive.
    let _ = core.handle_message(
        &dummy_endpoint(),
        &incentive_core::net::message::Message {
            command: "ping".to_string(),
            ivote: None,
        },
    );

    tokio::signal::ctrl_c().await?;
    core.stop();

    Ok(())
}
