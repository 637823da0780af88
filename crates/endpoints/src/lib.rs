//! EVM API endpoint catalogue.
//!
//! Each operation is one [`resolver::EndpointConfig`] value built by a function
//! in this crate, plus its parameter and result types. [`EvmApi`] pairs those
//! configurations with a shared [`resolver::ApiContext`] and exposes one async
//! method per operation.
//!
//! ## Architectural Layer
//!
//! **Orchestration layer.** Endpoints describe paths, parameter shapes and
//! result projections. Placement, default injection and routing rules belong
//! to the [`resolver`] crate; HTTP belongs to the `transport` crate.
//!
//! ## Operations
//!
//! | Method | Operation | HTTP |
//! |--------|-----------|------|
//! | [`EvmApi::get_native_balance`] | `getNativeBalance` | `GET {address}/balance` |
//! | [`EvmApi::get_token_balances`] | `getTokenBalances` | `GET {address}/erc20` |
//! | [`EvmApi::get_block`] | `getBlock` | `GET block/{block}` |
//! | [`EvmApi::run_contract_function`] | `runContractFunction` | `POST {address}/function` |
//! | [`EvmApi::upload_folder`] | `uploadFolder` | `POST ipfs/uploadFolder` |

pub mod balance;
pub mod block;
pub mod contract;
pub mod ipfs;

mod common;

use resolver::{ApiContext, Resolver, ResolverError, ResultAdapter};
use serde_json::Value;

pub use balance::{
    native_balance, token_balances, NativeBalance, NativeBalanceJson, NativeBalanceParams,
    RawNativeBalance, RawTokenBalance, TokenBalance, TokenBalanceJson, TokenBalancesParams,
};
pub use block::{block, Block, BlockId, BlockJson, BlockParams, RawBlock};
pub use contract::{run_contract_function, ContractOutput, RunContractFunctionParams};
pub use ipfs::{upload_folder, IpfsFile, IpfsPath, RawIpfsPath, UploadFolderParams};

pub type NativeBalanceResult = ResultAdapter<RawNativeBalance, NativeBalance, NativeBalanceJson>;
pub type TokenBalancesResult =
    ResultAdapter<Vec<RawTokenBalance>, Vec<TokenBalance>, Vec<TokenBalanceJson>>;
pub type BlockResult = ResultAdapter<RawBlock, Block, BlockJson>;
pub type ContractFunctionResult = ResultAdapter<Value, ContractOutput, Value>;
pub type UploadFolderResult = ResultAdapter<Vec<RawIpfsPath>, Vec<IpfsPath>, Vec<IpfsPath>>;

/// Typed entry point to every supported EVM API operation.
#[derive(Debug, Clone)]
pub struct EvmApi {
    context: ApiContext,
}

impl EvmApi {
    pub fn new(context: ApiContext) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &ApiContext {
        &self.context
    }

    /// Native currency balance of an address.
    pub async fn get_native_balance(
        &self,
        params: &NativeBalanceParams,
    ) -> Result<NativeBalanceResult, ResolverError> {
        Resolver::new(native_balance(), self.context.clone())
            .fetch(params)
            .await
    }

    /// ERC-20 balances of an address.
    pub async fn get_token_balances(
        &self,
        params: &TokenBalancesParams,
    ) -> Result<TokenBalancesResult, ResolverError> {
        Resolver::new(token_balances(), self.context.clone())
            .fetch(params)
            .await
    }

    /// A block by height or hash.
    pub async fn get_block(&self, params: &BlockParams) -> Result<BlockResult, ResolverError> {
        Resolver::new(block(), self.context.clone())
            .fetch(params)
            .await
    }

    /// Calls a read-only contract function.
    pub async fn run_contract_function(
        &self,
        params: &RunContractFunctionParams,
    ) -> Result<ContractFunctionResult, ResolverError> {
        Resolver::new(run_contract_function(), self.context.clone())
            .fetch(params)
            .await
    }

    /// Uploads a set of files to IPFS as one folder.
    pub async fn upload_folder(
        &self,
        params: &UploadFolderParams,
    ) -> Result<UploadFolderResult, ResolverError> {
        Resolver::new(upload_folder(), self.context.clone())
            .fetch(params)
            .await
    }
}
