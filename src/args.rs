use camino::Utf8PathBuf;
use reqwest::Url;
use std::str::FromStr;

use verifier::{
    api::{DEFAULT_INTERVAL_MS, DEFAULT_MAX_ATTEMPTS},
    constructor::{AbiArg, ConstructorArgs},
    contract::{ContractAddress, ContractName},
    deployment::ignition_artifact_path,
};

const MAINNET_API_URL: &str = "https://api.etherscan.io/api";
const SEPOLIA_API_URL: &str = "https://api-sepolia.etherscan.io/api";
const SEPOLIA_CHAIN_ID: u64 = 11_155_111;

#[derive(clap::Parser)]
#[command(name = "etherscan-verify")]
#[command(version)]
#[command(about = "Verify deployed Solidity contracts on Etherscan-compatible explorers")]
#[command(long_about = "
A command-line tool for verifying deployed Solidity contracts on Etherscan-compatible
block explorers.

It reads the compiler build-info artifact, submits the standard-JSON input together
with the matching compiler version and optimizer settings, and polls the explorer
until the verification job finishes.

Exit codes: 0 verified, 1 failure, 2 timed out while the job was still pending.

Examples:
  # Verify a contract on Sepolia
  etherscan-verify verify --network sepolia \\
    --artifact artifacts/build-info/solc-0_8_24.json \\
    --address 0x0eFbf4be712Ed78f899b306B5d919Bb167676ebe \\
    --contract-name contracts/KipuBank.sol:KipuBank \\
    --arg uint256:100ether --arg uint256:1ether

  # Check a submitted job once
  etherscan-verify status --network sepolia --guid <GUID>
")]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand)]
#[allow(clippy::large_enum_variant)]
pub enum Commands {
    /// Submit a contract for verification and wait for the result
    ///
    /// Examples:
    ///   etherscan-verify verify --network sepolia \
    ///     --artifact artifacts/build-info/solc.json \
    ///     --deployment ignition/deployments/chain-11155111/artifacts/BankModule#Bank.json \
    ///     --contract-name contracts/Bank.sol:Bank \
    ///     --constructor-args 0x00..
    Verify(VerifyArgs),

    /// Check the status of a verification job once
    ///
    /// Examples:
    ///   etherscan-verify status --network mainnet --guid <GUID>
    Status(StatusArgs),

    /// Print the deployed address recorded in a deployment artifact
    ///
    /// Examples:
    ///   etherscan-verify address --module KipuBankModule --contract KipuBank
    Address(AddressArgs),
}

#[derive(clap::Args)]
pub struct VerifyArgs {
    /// Network to verify on (mainnet, sepolia). If not specified, --url is required
    #[arg(long, value_enum)]
    pub network: Option<NetworkKind>,

    #[command(flatten)]
    pub network_url: Network,

    /// Explorer API key
    #[arg(long, env = "ETHERSCAN_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Compiler build-info artifact holding the standard-JSON input
    #[arg(long, value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
    pub artifact: Utf8PathBuf,

    #[command(flatten)]
    pub target: Target,

    /// Fully-qualified contract name, <path>:<ContractName>
    #[arg(
        long = "contract-name",
        value_name = "PATH:NAME",
        value_parser = ContractName::new
    )]
    pub contract_name: ContractName,

    /// ABI-encoded constructor arguments as hex
    #[arg(
        long = "constructor-args",
        value_name = "HEX",
        value_parser = ConstructorArgs::from_hex,
        conflicts_with = "args"
    )]
    pub constructor_args: Option<ConstructorArgs>,

    /// Constructor argument to encode, TYPE:VALUE (uint256, address, bool); repeat in order
    #[arg(long = "arg", id = "args", value_name = "TYPE:VALUE", value_parser = AbiArg::from_str)]
    pub args: Vec<AbiArg>,

    /// Number of status queries before giving up
    #[arg(
        long,
        default_value_t = DEFAULT_MAX_ATTEMPTS,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub max_attempts: u32,

    /// Delay before each status query, in milliseconds
    #[arg(long, default_value_t = DEFAULT_INTERVAL_MS)]
    pub interval_ms: u64,

    /// Print the request that would be submitted without sending it
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}

impl VerifyArgs {
    pub fn constructor_args(&self) -> ConstructorArgs {
        self.constructor_args
            .clone()
            .unwrap_or_else(|| ConstructorArgs::encode(&self.args))
    }
}

/// Where the deployed address comes from.
#[derive(clap::Args)]
#[group(required = true, multiple = false)]
pub struct Target {
    /// Address of the deployed contract
    #[arg(long, value_name = "ADDRESS", value_parser = ContractAddress::new)]
    pub address: Option<ContractAddress>,

    /// Deployment artifact JSON carrying the deployed address
    #[arg(long, value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
    pub deployment: Option<Utf8PathBuf>,
}

#[derive(clap::Args)]
pub struct StatusArgs {
    /// Network to query (mainnet, sepolia). If not specified, --url is required
    #[arg(long, value_enum)]
    pub network: Option<NetworkKind>,

    #[command(flatten)]
    pub network_url: Network,

    /// Explorer API key
    #[arg(long, env = "ETHERSCAN_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Verification job GUID returned on submission
    #[arg(long, value_name = "GUID")]
    pub guid: String,
}

#[derive(clap::Args)]
pub struct AddressArgs {
    /// Deployment artifact JSON carrying the deployed address
    #[arg(
        long,
        value_name = "FILE",
        value_hint = clap::ValueHint::FilePath,
        conflicts_with_all = ["module", "contract"],
        required_unless_present = "module"
    )]
    pub deployment: Option<Utf8PathBuf>,

    /// Ignition module that deployed the contract
    #[arg(long, requires = "contract")]
    pub module: Option<String>,

    /// Contract name inside the Ignition module
    #[arg(long, requires = "module")]
    pub contract: Option<String>,

    /// Chain id of the deployment
    #[arg(long, default_value_t = SEPOLIA_CHAIN_ID)]
    pub chain_id: u64,

    /// Project root holding the ignition/ directory
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub root: Utf8PathBuf,
}

impl AddressArgs {
    /// The deployment artifact to read, given directly or derived from
    /// the Ignition module and contract names.
    pub fn artifact_path(&self) -> Option<Utf8PathBuf> {
        match (&self.deployment, &self.module, &self.contract) {
            (Some(path), _, _) => Some(path.clone()),
            (None, Some(module), Some(contract)) => Some(ignition_artifact_path(
                &self.root,
                self.chain_id,
                module,
                contract,
            )),
            (None, _, _) => None,
        }
    }
}

#[derive(clap::ValueEnum, Clone)]
pub enum NetworkKind {
    /// Target Ethereum mainnet
    Mainnet,

    /// Target Sepolia testnet
    Sepolia,
}

#[derive(Clone)]
pub struct Network {
    /// API endpoint URL
    pub url: Url,
}

fn url_from_matches(matches: &clap::ArgMatches) -> Result<Url, clap::Error> {
    matches
        .get_one::<Url>("url")
        .cloned()
        .ok_or_else(|| {
            clap::Error::raw(
                clap::error::ErrorKind::MissingRequiredArgument,
                "API URL is required when not using predefined networks",
            )
        })
}

fn url_arg() -> clap::Arg {
    clap::Arg::new("url")
        .long("url")
        .help("Explorer API endpoint URL (required when --network is not specified)")
        .value_hint(clap::ValueHint::Url)
        .value_parser(Url::parse)
        .default_value_ifs([
            ("network", "mainnet", MAINNET_API_URL),
            ("network", "sepolia", SEPOLIA_API_URL),
        ])
        .required_unless_present("network")
}

impl clap::FromArgMatches for Network {
    fn from_arg_matches(matches: &clap::ArgMatches) -> Result<Self, clap::Error> {
        Ok(Self {
            url: url_from_matches(matches)?,
        })
    }

    fn update_from_arg_matches(&mut self, matches: &clap::ArgMatches) -> Result<(), clap::Error> {
        self.url = url_from_matches(matches)?;
        Ok(())
    }
}

// Can't derive the default value logic, hence hand rolled instance
impl clap::Args for Network {
    fn augment_args(cmd: clap::Command) -> clap::Command {
        cmd.arg(url_arg())
    }

    fn augment_args_for_update(cmd: clap::Command) -> clap::Command {
        cmd.arg(url_arg())
    }
}
