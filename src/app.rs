// src/app.rs
use anyhow::{Context, Result};
use reqwest::{Client, Url};
use solana_sdk::{commitment_config::CommitmentConfig, pubkey::Pubkey};
use std::{str::FromStr, sync::Arc, time::Duration};
use tracing::{error, info};

use solana_pay::shared::errors::AppError;
use solana_pay::{MerchantClient, SolanaRpcClient, TransactionRequestFetcher};

use crate::config::{Config, DEFAULT_COMMITMENT, DEFAULT_RPC_URL, DEFAULT_TIMEOUT_SECS};
use crate::report::TransactionReport;

#[derive(Debug, Clone)]
pub struct AppCfg {
    pub link: Url,
    pub account: Pubkey,
    pub rpc_url: String,
    pub commitment: CommitmentConfig,
    pub timeout: Duration,
    pub user_agent: Option<String>,
    pub json_output: bool,
}

/// Values given on the command line; `None` falls back to the config file
#[derive(Debug, Clone, Default)]
pub struct FetchArgs {
    pub link: String,
    pub account: String,
    pub rpc_url: Option<String>,
    pub commitment: Option<String>,
    pub timeout_secs: Option<u64>,
    pub json_output: bool,
}

impl AppCfg {
    /// Merge with priority: CLI args > Config file > Defaults
    pub fn resolve(args: FetchArgs, cfg: Config) -> Result<Self, AppError> {
        let link = Url::parse(&args.link)
            .map_err(|e| AppError::InvalidArgument(format!("Invalid link {}: {}", args.link, e)))?;
        if !matches!(link.scheme(), "https" | "http") {
            return Err(AppError::InvalidArgument(format!(
                "Link must be an http(s) URL, got scheme {}",
                link.scheme()
            )));
        }

        let account = Pubkey::from_str(&args.account)
            .map_err(|e| AppError::InvalidArgument(format!("Invalid account {}: {}", args.account, e)))?;

        let commitment = args
            .commitment
            .or(cfg.rpc.commitment)
            .unwrap_or_else(|| DEFAULT_COMMITMENT.to_string());
        let commitment = CommitmentConfig::from_str(&commitment)
            .map_err(|e| AppError::ConfigError(format!("Invalid commitment {}: {}", commitment, e)))?;

        Ok(Self {
            link,
            account,
            rpc_url: args
                .rpc_url
                .or(cfg.rpc.url)
                .unwrap_or_else(|| DEFAULT_RPC_URL.to_string()),
            commitment,
            timeout: Duration::from_secs(
                args.timeout_secs
                    .or(cfg.http.timeout_secs)
                    .unwrap_or(DEFAULT_TIMEOUT_SECS),
            ),
            user_agent: cfg.http.user_agent,
            json_output: args.json_output,
        })
    }

    fn http_client(&self) -> Result<Client> {
        let mut builder = Client::builder().timeout(self.timeout);
        if let Some(user_agent) = &self.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }
        builder.build().context("build HTTP client")
    }
}

pub async fn run(app_cfg: AppCfg) -> Result<()> {
    info!("Fetching transaction request from {}", app_cfg.link);
    info!("Paying account: {}, RPC: {}", app_cfg.account, app_cfg.rpc_url);

    let rpc_client = Arc::new(SolanaRpcClient::new_with_commitment(
        app_cfg.rpc_url.clone(),
        app_cfg.commitment,
    ));
    let fetcher = TransactionRequestFetcher::new(MerchantClient::new(app_cfg.http_client()?), rpc_client);

    let transaction = match fetcher
        .fetch(&app_cfg.link, &app_cfg.account, Some(app_cfg.commitment))
        .await
    {
        Ok(transaction) => transaction,
        Err(e) => {
            error!("❌ Transaction request failed ({:?}): {}", e.kind(), e);
            return Err(e.into());
        }
    };

    let report = TransactionReport::new(&transaction, &app_cfg.account)?;
    if app_cfg.json_output {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", report);
    }

    info!("✅ Transaction ready for {} to sign", app_cfg.account);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{HttpCfg, RpcCfg};

    fn args(account: &Pubkey) -> FetchArgs {
        FetchArgs {
            link: "https://merchant.example/api/".to_string(),
            account: account.to_string(),
            ..FetchArgs::default()
        }
    }

    #[test]
    fn test_defaults_apply_without_config() {
        let account = Pubkey::new_unique();
        let cfg = AppCfg::resolve(args(&account), Config::default()).unwrap();

        assert_eq!(cfg.account, account);
        assert_eq!(cfg.rpc_url, DEFAULT_RPC_URL);
        assert_eq!(cfg.commitment, CommitmentConfig::confirmed());
        assert_eq!(cfg.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn test_cli_overrides_config_file() {
        let account = Pubkey::new_unique();
        let file = Config {
            rpc: RpcCfg {
                url: Some("http://localhost:8899".to_string()),
                commitment: Some("processed".to_string()),
            },
            http: HttpCfg {
                timeout_secs: Some(5),
                user_agent: None,
            },
        };
        let mut cli = args(&account);
        cli.commitment = Some("finalized".to_string());

        let cfg = AppCfg::resolve(cli, file).unwrap();
        assert_eq!(cfg.rpc_url, "http://localhost:8899");
        assert_eq!(cfg.commitment, CommitmentConfig::finalized());
        assert_eq!(cfg.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_rejects_bad_arguments() {
        let account = Pubkey::new_unique();

        let mut bad_link = args(&account);
        bad_link.link = "solana:merchant".to_string();
        assert!(matches!(
            AppCfg::resolve(bad_link, Config::default()),
            Err(AppError::InvalidArgument(_))
        ));

        let mut bad_account = args(&account);
        bad_account.account = "not-a-key".to_string();
        assert!(matches!(
            AppCfg::resolve(bad_account, Config::default()),
            Err(AppError::InvalidArgument(_))
        ));

        let mut bad_commitment = args(&account);
        bad_commitment.commitment = Some("eventually".to_string());
        assert!(matches!(
            AppCfg::resolve(bad_commitment, Config::default()),
            Err(AppError::ConfigError(_))
        ));
    }
}
