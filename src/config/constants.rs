//! Constants shared across the money, fee and validation modules

/// Largest supported base-unit scale (ERC-20 convention)
pub const MAX_DECIMALS: u8 = 18;

/// Basis points in 100%
pub const BPS_DENOMINATOR: u16 = 10_000;

/// Number of decimal digits in [`BPS_DENOMINATOR`]
pub const BPS_DENOMINATOR_DIGITS: i64 = 4;

/// Fee applied when no custom fee exists and no tier matches (5%)
///
/// This is the swap fallback fee used by the card providers.
pub const DEFAULT_FEE_RATE_BPS: u16 = 500;

/// Unsigned decimal number, ASCII digits only
pub const DECIMAL_PATTERN: &str = r"^[0-9]+(\.[0-9]+)?$";

/// Percent in `[0, 100]`
///
/// Strict about `100` (at most two zero fraction digits) but accepts any
/// number of fraction digits below 100.
pub const PERCENT_PATTERN: &str = r"^(100(\.0{1,2})?|(0|[1-9][0-9]?)(\.[0-9]+)?)$";

/// Recipient email accepted by card issuers
pub const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,10}$";

/// Stablecoin addresses whose decimals differ from the chain default
pub mod stablecoins {
    /// Binance-Peg USDC on BNB Smart Chain (18 decimals)
    pub const BSC_BINANCE_PEG_USDC: &str = "0x8AC76a51cc950d9822D68b83fE1Ad97B32Cd580d";
}
