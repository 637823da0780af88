//! `evm-api` CLI entry point.
//!
//! This binary is the composition root for the workspace. Responsibilities:
//!
//! 1. **Parse arguments** with `clap`, including environment fallbacks.
//! 2. **Wire observability**: `tracing-subscriber` with an env-filter and an
//!    optional JSON layer, plus an OpenTelemetry OTLP exporter when
//!    `OTEL_EXPORTER_OTLP_ENDPOINT` is set. Spans emitted by the resolver
//!    (`evm_api.fetch`) flow through these layers.
//! 3. **Load configuration**: TOML file, environment, then flags.
//! 4. **Construct infrastructure**: a [`transport::ReqwestTransport`], the
//!    [`config::CliConfig`] provider and the wallet connection, bundled into
//!    a [`resolver::ApiContext`].
//! 5. **Run one command** and print the JSON projection of its result.

mod args;
mod config;
mod telemetry;

use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use endpoints::{
    BlockParams, EvmApi, IpfsFile, NativeBalanceParams, RunContractFunctionParams,
    TokenBalancesParams, UploadFolderParams,
};
use resolver::{ApiContext, ConnectionContext};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use transport::ReqwestTransport;

use crate::args::{Cli, Command, GlobalArgs};
use crate::config::CliConfig;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _telemetry = telemetry::init(cli.global.json_logs)?;

    let api = build_api(&cli.global)?;
    let output = run(&api, cli.command).await?;
    println!("{output}");
    Ok(())
}

fn build_api(global: &GlobalArgs) -> Result<EvmApi> {
    let config = CliConfig::load(global)?;
    debug!(?config, "Resolved configuration");

    let connection = match (global.chain_id, &global.account) {
        (Some(chain), Some(account)) => ConnectionContext::connected(chain, account.clone()),
        _ => ConnectionContext::Disconnected,
    };

    let transport = ReqwestTransport::new().context("Failed to create HTTP client")?;
    let base_url = config.base_url().to_string();
    let context = ApiContext::new(Arc::new(transport), Arc::new(config), Arc::new(connection))
        .with_base_url(base_url);
    Ok(EvmApi::new(context))
}

async fn run(api: &EvmApi, command: Command) -> Result<String> {
    let output = match command {
        Command::NativeBalance {
            address,
            chain,
            to_block,
        } => {
            let params = NativeBalanceParams {
                address,
                chain,
                to_block,
            };
            api.get_native_balance(&params).await?.format()?
        }
        Command::TokenBalances {
            address,
            chain,
            to_block,
            token_addresses,
        } => {
            let params = TokenBalancesParams {
                address,
                chain,
                to_block,
                token_addresses,
            };
            api.get_token_balances(&params).await?.format()?
        }
        Command::Block { block, chain } => {
            let params = BlockParams { block, chain };
            api.get_block(&params).await?.format()?
        }
        Command::RunFunction {
            address,
            chain,
            function_name,
            abi,
            params,
        } => {
            let abi: Value = read_json(&abi)?;
            let params = params
                .map(|p| serde_json::from_str::<Value>(&p))
                .transpose()
                .context("--params is not valid JSON")?;
            let params = RunContractFunctionParams {
                address,
                chain,
                function_name,
                abi,
                params,
            };
            api.run_contract_function(&params).await?.format()?
        }
        Command::UploadFolder { manifest } => {
            let files: Vec<IpfsFile> = read_json(&manifest)?;
            api.upload_folder(&UploadFolderParams { files })
                .await?
                .format()?
        }
    };
    Ok(output)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let source =
        fs::read_to_string(path).with_context(|| format!("Could not read {}", path.display()))?;
    serde_json::from_str(&source).with_context(|| format!("Invalid JSON in {}", path.display()))
}
