use anyhow::{anyhow, bail, Context};
use clap::{arg, command, Parser, Subcommand};
use config::{Config as ConfigHelper, Environment, File};
use log::{info, warn};
use serde::Deserialize;
use smart_wallet_clients::{
    provider::LoginCredentials,
    smart_account::{EvmSmartAccountFactory, SmartAccountConfig},
    social_login::LocalSocialLogin,
};
use smart_wallet_session::{Session, SessionConfig};
use smart_wallet_utils::tokens::TOKENS;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the wallet config, without extension
    #[arg(short, long, default_value = "deployment/configs/local/config")]
    config_path: String,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Send tokens from the smart account, paying gas in one of its holdings
    Send {
        #[arg(long)]
        to: String,
        #[arg(long)]
        amount: String,
        /// Symbol of the token to send
        #[arg(long, default_value = "USDC")]
        token: String,
        /// Symbol of the held token that pays for gas; defaults to the first holding
        #[arg(long)]
        gas_token: Option<String>,
    },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct NetworkConfig {
    rpc_url: String,
}

#[derive(Debug, Deserialize)]
struct AppConfig {
    network: NetworkConfig,
    login: LoginCredentials,
    #[serde(default)]
    session: SessionConfig,
    smart_account: SmartAccountConfig,
}

fn get_config(path: &str) -> anyhow::Result<AppConfig> {
    ConfigHelper::builder()
        .add_source(File::with_name(path))
        .add_source(Environment::with_prefix("WALLET").separator("__"))
        .build()?
        .try_deserialize()
        .context("invalid wallet config")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let cfg = get_config(&args.config_path)?;

    let rpc_url = cfg.network.rpc_url;
    let credentials = cfg.login;
    let factory = EvmSmartAccountFactory {
        config: cfg.smart_account,
    };

    let mut session = Session::new(
        cfg.session,
        move || LocalSocialLogin::new(&rpc_url, credentials.clone()),
        factory,
    );

    let cancel = session.login_cancel_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupted, cancelling login");
            cancel.cancel();
        }
    });

    session.login().await?;

    let Some(account) = session.account_address() else {
        bail!("smart account is not available (session is {})", session.phase());
    };
    println!("smart account: {account}");
    for balance in session.balances() {
        println!("  {balance}");
    }
    if let Some(usd) = session.usd_balance() {
        println!("  total: ${usd:.2}");
    }

    if let Some(Command::Send {
        to,
        amount,
        token,
        gas_token,
    }) = args.command
    {
        let token_index = TOKENS
            .iter()
            .position(|t| t.symbol == token)
            .ok_or_else(|| anyhow!("unknown token {token}"))?;
        session.select_token(token_index)?;

        if let Some(gas_token) = gas_token {
            let gas_index = session
                .balances()
                .iter()
                .position(|b| b.contract_ticker_symbol == gas_token)
                .ok_or_else(|| anyhow!("no {gas_token} held to pay for gas"))?;
            session.select_gas_token(gas_index);
        }

        session.set_recipient(to);
        session.set_amount(amount);

        match session.send_tokens().await? {
            Some(tx_hash) => info!("transfer submitted: {tx_hash}"),
            None => warn!("nothing sent: no gas token available"),
        }
    }

    session.logout().await?;

    Ok(())
}
