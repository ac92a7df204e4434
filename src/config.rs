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

/// Tunables for the incentive coordination core. Loaded from TOML at
/// startup; every field has a default matching the constants in the
/// protocol description.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct IncentiveConfig {
    /// Master switch. When false, neither periodic loop starts and the
    /// message sink refuses every "ivote" message.
    pub enabled: bool,

    /// Minimum wallet balance, in whole coins, required to be held in a
    /// single unspent output for the local node to be a valid candidate.
    /// A value of zero disables the collateral loop entirely.
    pub collateral: u64,

    /// Smallest on-chain unit per whole coin (i.e. "satoshis" per coin).
    pub coin_unit: u64,

    /// Vote count at which an address becomes the provisional winner for
    /// a height.
    pub minimum_votes: u64,

    /// Enables the one-hour candidate rate limit in the election loop.
    /// Off by default; per the source this exists for testing, not as a
    /// consensus requirement.
    pub rate_limit_test_mode: bool,
}

impl Default for IncentiveConfig {
    fn default() -> Self {
        IncentiveConfig {
            enabled: true,
            collateral: 1_000,
            coin_unit: 100_000_000,
            minimum_votes: 8,
            rate_limit_test_mode: false,
        }
    }
}

impl IncentiveConfig {
    pub fn from_toml_str(contents: &str) -> Result<IncentiveConfig, toml::de::Error> {
        toml::from_str(contents)
    }

    pub fn load(path: &std::path::Path) -> anyhow::Result<IncentiveConfig> {
        let contents = std::fs::read_to_string(path)?;
        Ok(Self::from_toml_str(&contents)?)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults_match_protocol_constants() {
        let cfg = IncentiveConfig::default();
        assert_eq!(cfg.minimum_votes, 8);
        assert_eq!(cfg.coin_unit, 100_000_000);
        assert!(!cfg.rate_limit_test_mode);
    }

    #[test]
    fn parses_partial_toml_with_defaults() {
        let cfg = IncentiveConfig::from_toml_str("collateral = 5000\n").unwrap();
        assert_eq!(cfg.collateral, 5000);
        assert_eq!(cfg.minimum_votes, 8);
        assert!(cfg.enabled);
    }

    #[test]
    fn zero_collateral_is_representable() {
        let cfg = IncentiveConfig::from_toml_str("collateral = 0\n").unwrap();
        assert_eq!(cfg.collateral, 0);
    }
}
