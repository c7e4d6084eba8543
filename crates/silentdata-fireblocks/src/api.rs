/*
[INPUT]:  Transaction submissions and status queries
[OUTPUT]: Fireblocks REST API client behind a mockable trait
[POS]:    API layer - custodial service HTTP access
[UPDATE]: When Fireblocks endpoints or auth headers change
*/

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use url::Url;

use silentdata_provider::{Result, SilentDataError};

use crate::types::{
    CreateTransactionResponse, TransactionArguments, TransactionInfo, VaultAddress,
};

/// Minimal Fireblocks API surface the signer needs.
///
/// Tests substitute scripted implementations to drive the polling loop
/// through arbitrary status sequences.
#[async_trait]
pub trait FireblocksApi: Send + Sync {
    /// Submit a signing transaction
    async fn create_transaction(
        &self,
        args: &TransactionArguments,
    ) -> Result<CreateTransactionResponse>;

    /// Fetch a transaction's current status and signed messages
    async fn get_transaction(&self, tx_id: &str) -> Result<TransactionInfo>;

    /// List deposit addresses of a vault account for an asset
    async fn vault_addresses(&self, vault_account_id: &str, asset_id: &str)
    -> Result<Vec<VaultAddress>>;
}

/// HTTP client for the Fireblocks REST API
pub struct HttpFireblocksApi {
    client: Client,
    base_url: Url,
    api_key: String,
}

impl HttpFireblocksApi {
    pub fn new(api_url: &str, api_key: &str) -> Result<Self> {
        let base_url = Url::parse(api_url)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            base_url,
            api_key: api_key.to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }
}

#[async_trait]
impl FireblocksApi for HttpFireblocksApi {
    async fn create_transaction(
        &self,
        args: &TransactionArguments,
    ) -> Result<CreateTransactionResponse> {
        debug!(operation = ?args.operation, asset = %args.asset_id, "submitting signing transaction");
        let response = self
            .client
            .post(self.endpoint("/v1/transactions")?)
            .header("X-API-Key", &self.api_key)
            .json(args)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }

    async fn get_transaction(&self, tx_id: &str) -> Result<TransactionInfo> {
        let response = self
            .client
            .get(self.endpoint(&format!("/v1/transactions/{tx_id}"))?)
            .header("X-API-Key", &self.api_key)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }

    async fn vault_addresses(
        &self,
        vault_account_id: &str,
        asset_id: &str,
    ) -> Result<Vec<VaultAddress>> {
        let response = self
            .client
            .get(self.endpoint(&format!(
                "/v1/vault/accounts/{vault_account_id}/{asset_id}/addresses"
            ))?)
            .header("X-API-Key", &self.api_key)
            .send()
            .await?
            .error_for_status()?;
        let addresses: Vec<VaultAddress> = response.json().await?;
        if addresses.is_empty() {
            return Err(SilentDataError::Config(format!(
                "vault account {vault_account_id} has no {asset_id} addresses"
            )));
        }
        Ok(addresses)
    }
}
