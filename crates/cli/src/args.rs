//! Command line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use endpoints::BlockId;
use resolver::{Address, ChainId};

#[derive(Debug, Parser)]
#[command(name = "evm-api")]
#[command(about = "Query the EVM API directly or through a proxy server", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every command.
#[derive(Debug, Default, Args)]
pub struct GlobalArgs {
    #[arg(long, help = "Path to a TOML configuration file (default: ./evm-api.toml if present)")]
    pub config: Option<PathBuf>,

    #[arg(long, env = "EVM_API_KEY", hide_env_values = true, help = "API key for direct calls")]
    pub api_key: Option<String>,

    #[arg(long, env = "EVM_API_SERVER_URL", help = "Proxy server used when no API key is set")]
    pub server_url: Option<String>,

    #[arg(long, env = "EVM_API_BASE_URL", help = "Base URL of the EVM API")]
    pub base_url: Option<String>,

    #[arg(
        long,
        requires = "account",
        help = "Chain of the simulated wallet connection (decimal or 0x hex)"
    )]
    pub chain_id: Option<ChainId>,

    #[arg(long, requires = "chain_id", help = "Account of the simulated wallet connection")]
    pub account: Option<Address>,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the native currency balance of an address
    NativeBalance {
        #[arg(short, long, help = "Address to query (defaults to the connected account)")]
        address: Option<Address>,
        #[arg(short, long, help = "Chain to query (defaults to the connected chain)")]
        chain: Option<ChainId>,
        #[arg(long, help = "Read the balance as of this block")]
        to_block: Option<u64>,
    },
    /// Show the ERC-20 token balances of an address
    TokenBalances {
        #[arg(short, long, help = "Address to query (defaults to the connected account)")]
        address: Option<Address>,
        #[arg(short, long, help = "Chain to query (defaults to the connected chain)")]
        chain: Option<ChainId>,
        #[arg(long, help = "Read the balances as of this block")]
        to_block: Option<u64>,
        #[arg(
            short = 't',
            long = "token-address",
            help = "Restrict to this token contract. Can be specified multiple times."
        )]
        token_addresses: Vec<Address>,
    },
    /// Show a block by height or hash
    Block {
        #[arg(help = "Block height or 0x-prefixed block hash")]
        block: BlockId,
        #[arg(short, long, help = "Chain to query (defaults to the connected chain)")]
        chain: Option<ChainId>,
    },
    /// Call a read-only contract function
    RunFunction {
        #[arg(short, long, help = "Contract address")]
        address: Address,
        #[arg(short, long, help = "Chain to query (defaults to the connected chain)")]
        chain: Option<ChainId>,
        #[arg(short, long, help = "Name of the function to call")]
        function_name: String,
        #[arg(long, help = "Path to the contract ABI (JSON array)")]
        abi: PathBuf,
        #[arg(short, long, help = "Function arguments as a JSON object")]
        params: Option<String>,
    },
    /// Upload files to IPFS as one folder
    UploadFolder {
        #[arg(help = "Path to a JSON array of {\"path\", \"content\"} entries")]
        manifest: PathBuf,
    },
}
