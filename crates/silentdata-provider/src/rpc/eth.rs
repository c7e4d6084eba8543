/*
[INPUT]:  Addresses, block tags and transaction requests
[OUTPUT]: Typed results for common eth_* methods
[POS]:    RPC layer - convenience accessors over the signed send path
[UPDATE]: When adding new accessors or changing quantity parsing
*/

use serde_json::{Value, json};

use crate::error::{Result, SilentDataError};
use crate::rpc::provider::SilentDataProvider;

/// Parse a JSON-RPC hex quantity ("0x...") into an integer
pub(crate) fn parse_quantity(value: &Value) -> Result<u128> {
    let text = value
        .as_str()
        .ok_or_else(|| SilentDataError::InvalidResponse(format!("expected hex quantity, got {value}")))?;
    let digits = text.strip_prefix("0x").unwrap_or(text);
    u128::from_str_radix(digits, 16)
        .map_err(|e| SilentDataError::InvalidResponse(format!("bad hex quantity {text}: {e}")))
}

/// Parse a hex quantity that must fit a u64 (nonces, gas, block numbers)
pub(crate) fn parse_quantity_u64(value: &Value) -> Result<u64> {
    let quantity = parse_quantity(value)?;
    u64::try_from(quantity).map_err(|_| {
        SilentDataError::InvalidResponse(format!("quantity {quantity:#x} overflows u64"))
    })
}

impl SilentDataProvider {
    /// Account balance in wei (signed call)
    pub async fn get_balance(&self, address: &str, block: &str) -> Result<u128> {
        let result = self.send("eth_getBalance", json!([address, block])).await?;
        parse_quantity(&result)
    }

    /// Account transaction count (signed call)
    pub async fn get_transaction_count(&self, address: &str, block: &str) -> Result<u64> {
        let result = self
            .send("eth_getTransactionCount", json!([address, block]))
            .await?;
        parse_quantity_u64(&result)
    }

    /// Latest block number
    pub async fn block_number(&self) -> Result<u64> {
        let result = self.send("eth_blockNumber", json!([])).await?;
        parse_quantity_u64(&result)
    }

    /// Chain id as reported by the endpoint
    pub async fn chain_id(&self) -> Result<u64> {
        let result = self.send("eth_chainId", json!([])).await?;
        parse_quantity_u64(&result)
    }

    /// Transaction receipt, or `None` while the transaction is pending
    /// (signed call)
    pub async fn get_transaction_receipt(&self, tx_hash: &str) -> Result<Option<Value>> {
        let result = self
            .send("eth_getTransactionReceipt", json!([tx_hash]))
            .await?;
        Ok(match result {
            Value::Null => None,
            receipt => Some(receipt),
        })
    }

    /// Gas estimate for a transaction request
    pub async fn estimate_gas(&self, tx: &Value) -> Result<u64> {
        let result = self.send("eth_estimateGas", json!([tx])).await?;
        parse_quantity_u64(&result)
    }

    /// Current fee data as `(max_priority_fee_per_gas, max_fee_per_gas)`,
    /// with `max_fee = priority + 2 * base_fee` headroom
    pub async fn fee_data(&self) -> Result<(u128, u128)> {
        let (priority, block) = tokio::try_join!(
            self.send("eth_maxPriorityFeePerGas", json!([])),
            self.send("eth_getBlockByNumber", json!(["latest", false])),
        )?;

        let max_priority_fee = parse_quantity(&priority)?;
        let base_fee = parse_quantity(block.get("baseFeePerGas").ok_or_else(|| {
            SilentDataError::InvalidResponse("latest block has no baseFeePerGas".to_string())
        })?)?;

        Ok((max_priority_fee, max_priority_fee + base_fee * 2))
    }

    /// Broadcast a signed raw transaction, returning its hash
    pub async fn send_raw_transaction(&self, signed_tx: &str) -> Result<String> {
        let result = self.send("eth_sendRawTransaction", json!([signed_tx])).await?;
        result
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| SilentDataError::InvalidResponse("expected transaction hash".to_string()))
    }
}
