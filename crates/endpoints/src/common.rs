//! Helpers shared by endpoint parameter parsers and raw result types.

use resolver::{Address, ChainId};
use serde::{Deserialize, Deserializer};

/// Wire form of an optional chain.
pub(crate) fn chain_param(chain: Option<ChainId>) -> Option<String> {
    chain.map(ChainId::api_hex)
}

/// Wire form of an optional address.
pub(crate) fn address_param(address: Option<&Address>) -> Option<String> {
    address.map(Address::lowercase)
}

/// Path segment for an address; empty when absent.
pub(crate) fn address_segment(address: Option<&Address>) -> String {
    address_param(address).unwrap_or_default()
}

/// Deserialises an integer the API may send either as a number or a decimal string.
pub(crate) fn u64_from_number_or_string<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(u64),
        String(String),
    }

    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::String(s) => s.parse().map_err(serde::de::Error::custom),
    }
}

/// Formats an integer token amount with `decimals` fractional digits.
///
/// Trailing fractional zeros are trimmed; `"1500000", 6` gives `"1.5"`.
/// Anything other than plain decimal digits is returned unchanged.
pub(crate) fn format_units(amount: &str, decimals: u32) -> String {
    let decimals = decimals as usize;
    if decimals == 0 || amount.is_empty() || !amount.bytes().all(|b| b.is_ascii_digit()) {
        return amount.to_string();
    }
    let padded = format!("{amount:0>width$}", width = decimals + 1);
    let (whole, fraction) = padded.split_at(padded.len() - decimals);
    let fraction = fraction.trim_end_matches('0');
    if fraction.is_empty() {
        whole.to_string()
    } else {
        format!("{whole}.{fraction}")
    }
}
