//! Wallet balance endpoints: native currency and ERC-20 tokens.

use resolver::{Address, ChainId, EndpointConfig, ResolverError};
use serde::{Deserialize, Serialize};

use crate::common::{address_param, address_segment, chain_param, format_units};

/// Decimals of the native currency on every supported chain.
const NATIVE_DECIMALS: u32 = 18;

// ---------------------------------------------------------------------------
// getNativeBalance
// ---------------------------------------------------------------------------

/// Parameters for [`native_balance`].
///
/// `address` and `chain` default to the connected wallet when omitted.
#[derive(Debug, Clone, Default)]
pub struct NativeBalanceParams {
    pub address: Option<Address>,
    pub chain: Option<ChainId>,
    /// Block height at which to read the balance; latest when omitted.
    pub to_block: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct NativeBalanceApiParams {
    chain: Option<String>,
    address: Option<String>,
    to_block: Option<u64>,
}

/// Raw `getNativeBalance` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawNativeBalance {
    /// Balance in wei, as a decimal string.
    pub balance: String,
}

/// Native balance of an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeBalance {
    /// Balance in wei, as a decimal string (may exceed `u64`).
    pub wei: String,
}

impl NativeBalance {
    /// Balance in wei, or `None` if it does not fit in a `u128`.
    pub fn as_u128(&self) -> Option<u128> {
        self.wei.parse().ok()
    }

    /// Balance in whole units of the native currency (ether, matic, ...).
    pub fn ether(&self) -> String {
        format_units(&self.wei, NATIVE_DECIMALS)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NativeBalanceJson {
    pub balance: String,
    pub ether: String,
}

/// `GET {address}/balance`
pub fn native_balance(
) -> EndpointConfig<NativeBalanceParams, NativeBalanceApiParams, RawNativeBalance, NativeBalance, NativeBalanceJson>
{
    EndpointConfig::new(
        "getNativeBalance",
        |p| format!("{}/balance", address_segment(p.address.as_ref())),
        |p| {
            Ok(NativeBalanceApiParams {
                chain: chain_param(p.chain),
                address: address_param(p.address.as_ref()),
                to_block: p.to_block,
            })
        },
        |raw| NativeBalance {
            wei: raw.balance.clone(),
        },
        |balance| NativeBalanceJson {
            balance: balance.wei.clone(),
            ether: balance.ether(),
        },
    )
}

// ---------------------------------------------------------------------------
// getTokenBalances
// ---------------------------------------------------------------------------

/// Parameters for [`token_balances`].
#[derive(Debug, Clone, Default)]
pub struct TokenBalancesParams {
    pub address: Option<Address>,
    pub chain: Option<ChainId>,
    pub to_block: Option<u64>,
    /// Restrict the result to these token contracts. Empty means all tokens.
    pub token_addresses: Vec<Address>,
}

#[derive(Debug, Serialize)]
pub struct TokenBalancesApiParams {
    chain: Option<String>,
    address: Option<String>,
    to_block: Option<u64>,
    token_addresses: Option<Vec<String>>,
}

/// One entry of the raw `getTokenBalances` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTokenBalance {
    pub token_address: String,
    pub name: String,
    pub symbol: String,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    pub decimals: u32,
    pub balance: String,
}

/// ERC-20 balance of one token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenBalance {
    /// Token contract, lowercase.
    pub token_address: String,
    pub name: String,
    pub symbol: String,
    pub logo: Option<String>,
    pub decimals: u32,
    /// Balance in the token's smallest unit, as a decimal string.
    pub amount: String,
}

impl TokenBalance {
    /// Balance in whole tokens.
    pub fn display_amount(&self) -> String {
        format_units(&self.amount, self.decimals)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenBalanceJson {
    pub token_address: String,
    pub name: String,
    pub symbol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    pub decimals: u32,
    pub balance: String,
    pub value: String,
}

/// `GET {address}/erc20`
pub fn token_balances() -> EndpointConfig<
    TokenBalancesParams,
    TokenBalancesApiParams,
    Vec<RawTokenBalance>,
    Vec<TokenBalance>,
    Vec<TokenBalanceJson>,
> {
    EndpointConfig::new(
        "getTokenBalances",
        |p| format!("{}/erc20", address_segment(p.address.as_ref())),
        parse_token_balances,
        |raw| raw.iter().map(TokenBalance::from).collect(),
        |balances| balances.iter().map(TokenBalanceJson::from).collect(),
    )
}

fn parse_token_balances(p: &TokenBalancesParams) -> Result<TokenBalancesApiParams, ResolverError> {
    let token_addresses = if p.token_addresses.is_empty() {
        None
    } else {
        Some(p.token_addresses.iter().map(Address::lowercase).collect())
    };
    Ok(TokenBalancesApiParams {
        chain: chain_param(p.chain),
        address: address_param(p.address.as_ref()),
        to_block: p.to_block,
        token_addresses,
    })
}

impl From<&RawTokenBalance> for TokenBalance {
    fn from(raw: &RawTokenBalance) -> Self {
        Self {
            token_address: raw.token_address.to_ascii_lowercase(),
            name: raw.name.clone(),
            symbol: raw.symbol.clone(),
            logo: raw.logo.clone().filter(|l| !l.is_empty()),
            decimals: raw.decimals,
            amount: raw.balance.clone(),
        }
    }
}

impl From<&TokenBalance> for TokenBalanceJson {
    fn from(balance: &TokenBalance) -> Self {
        Self {
            token_address: balance.token_address.clone(),
            name: balance.name.clone(),
            symbol: balance.symbol.clone(),
            logo: balance.logo.clone(),
            decimals: balance.decimals,
            balance: balance.amount.clone(),
            value: balance.display_amount(),
        }
    }
}
