//! Block lookup.

use std::str::FromStr;

use resolver::{ChainId, EndpointConfig, ResolverError};
use serde::{Deserialize, Serialize};

use crate::common::{chain_param, u64_from_number_or_string};

/// A block height or a 32-byte block hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockId {
    Number(u64),
    /// Lowercase `0x`-prefixed hash.
    Hash(String),
}

impl BlockId {
    const HASH_LEN: usize = 64;

    /// Path segment form: decimal height or lowercase hash.
    pub fn as_segment(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Hash(h) => h.clone(),
        }
    }
}

impl FromStr for BlockId {
    type Err = ResolverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(hex) = s.strip_prefix("0x") {
            if hex.len() == Self::HASH_LEN && hex.chars().all(|c| c.is_ascii_hexdigit()) {
                return Ok(Self::Hash(s.to_ascii_lowercase()));
            }
        } else if let Ok(n) = s.parse() {
            return Ok(Self::Number(n));
        }
        Err(ResolverError::invalid_params(format!(
            "Invalid block number or hash '{s}'"
        )))
    }
}

/// Parameters for [`block`].
#[derive(Debug, Clone)]
pub struct BlockParams {
    pub block: BlockId,
    pub chain: Option<ChainId>,
}

#[derive(Debug, Serialize)]
pub struct BlockApiParams {
    chain: Option<String>,
}

/// Raw `getBlock` response (subset of the fields the API returns).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawBlock {
    pub hash: String,
    #[serde(deserialize_with = "u64_from_number_or_string")]
    pub number: u64,
    pub timestamp: String,
    pub miner: String,
    #[serde(deserialize_with = "u64_from_number_or_string")]
    pub gas_used: u64,
    #[serde(deserialize_with = "u64_from_number_or_string")]
    pub gas_limit: u64,
    #[serde(deserialize_with = "u64_from_number_or_string")]
    pub transaction_count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub hash: String,
    pub number: u64,
    pub timestamp: String,
    pub miner: String,
    pub gas_used: u64,
    pub gas_limit: u64,
    pub transaction_count: u64,
}

impl Block {
    /// Share of the gas limit consumed, in percent.
    pub fn gas_utilisation(&self) -> f64 {
        if self.gas_limit == 0 {
            return 0.0;
        }
        self.gas_used as f64 * 100.0 / self.gas_limit as f64
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockJson {
    pub hash: String,
    pub number: u64,
    pub timestamp: String,
    pub miner: String,
    pub gas_used: u64,
    pub gas_limit: u64,
    pub gas_utilisation: f64,
    pub transaction_count: u64,
}

/// `GET block/{block_number_or_hash}`
///
/// Declares no `address` parameter, so a missing wallet connection never
/// fails this call.
pub fn block() -> EndpointConfig<BlockParams, BlockApiParams, RawBlock, Block, BlockJson> {
    EndpointConfig::new(
        "getBlock",
        |p| format!("block/{}", p.block.as_segment()),
        |p| {
            Ok(BlockApiParams {
                chain: chain_param(p.chain),
            })
        },
        |raw| Block {
            hash: raw.hash.clone(),
            number: raw.number,
            timestamp: raw.timestamp.clone(),
            miner: raw.miner.to_ascii_lowercase(),
            gas_used: raw.gas_used,
            gas_limit: raw.gas_limit,
            transaction_count: raw.transaction_count,
        },
        |b| BlockJson {
            hash: b.hash.clone(),
            number: b.number,
            timestamp: b.timestamp.clone(),
            miner: b.miner.clone(),
            gas_used: b.gas_used,
            gas_limit: b.gas_limit,
            gas_utilisation: b.gas_utilisation(),
            transaction_count: b.transaction_count,
        },
    )
}
