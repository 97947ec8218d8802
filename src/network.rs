//! Supported settlement networks and their stablecoin precision

use alloy_chains::NamedChain;
use serde::{Deserialize, Serialize};

use crate::config::constants::stablecoins::BSC_BINANCE_PEG_USDC;
use crate::types::decimals::TokenDecimals;
use crate::types::identity::TokenId;

/// Network a purchase settles on
///
/// EVM chains are identified by [`NamedChain`]; the non-EVM networks are
/// listed explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Network {
    /// Any EVM chain
    Evm(NamedChain),
    Solana,
    Tron,
    Ton,
    Sui,
}

impl Network {
    pub fn is_evm(&self) -> bool {
        matches!(self, Network::Evm(_))
    }

    /// EIP-155 chain id for EVM networks
    pub fn chain_id(&self) -> Option<u64> {
        match self {
            Network::Evm(chain) => Some(*chain as u64),
            _ => None,
        }
    }

    /// Decimals of the settlement stablecoin `token` on this network
    ///
    /// USDC and USDT use 6 decimals everywhere except Binance-Peg USDC on
    /// BNB Smart Chain, which uses 18. EVM addresses compare
    /// case-insensitively.
    ///
    /// # Examples
    ///
    /// ```
    /// use alloy_chains::NamedChain;
    /// use instacard::{Network, TokenDecimals, TokenId};
    ///
    /// let bsc = Network::Evm(NamedChain::BinanceSmartChain);
    /// let usdc = TokenId::from("0x8ac76a51cc950d9822d68b83fe1ad97b32cd580d");
    /// assert_eq!(bsc.stablecoin_decimals(&usdc), TokenDecimals::STANDARD);
    ///
    /// let usdc = TokenId::from("EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v");
    /// assert_eq!(Network::Solana.stablecoin_decimals(&usdc), TokenDecimals::USDC);
    /// ```
    pub fn stablecoin_decimals(&self, token: &TokenId) -> TokenDecimals {
        match self {
            Network::Evm(NamedChain::BinanceSmartChain)
                if token.as_str().eq_ignore_ascii_case(BSC_BINANCE_PEG_USDC) =>
            {
                TokenDecimals::STANDARD
            }
            _ => TokenDecimals::USDC,
        }
    }
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Network::Evm(chain) => write!(f, "{chain}"),
            Network::Solana => f.write_str("solana"),
            Network::Tron => f.write_str("tron"),
            Network::Ton => f.write_str("ton"),
            Network::Sui => f.write_str("sui"),
        }
    }
}
