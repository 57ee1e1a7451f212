//! Binding to the deployed NFT contract.

use alloy_dyn_abi::{DynSolValue, EventExt, JsonAbiExt};
use alloy_json_abi::{Event, Function, JsonAbi};
use alloy_primitives::{Address, TxHash, U256};
use alloy_rpc_types_eth::{Filter, Log, TransactionInput, TransactionRequest};
use minter_config::MinterConfig;
use minter_wallets::{Eip1193Provider, ProviderError};
use std::{path::PathBuf, sync::Arc, time::Duration};
use tokio::{task::JoinHandle, time::MissedTickBehavior};

/// Shortest interval a binding polls at.
const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// ABI used when no `abi_path` is configured.
pub const DEFAULT_ABI: &str = r#"[
  {
    "type": "function",
    "name": "makeAnEpicNFT",
    "inputs": [],
    "outputs": [],
    "stateMutability": "nonpayable"
  },
  {
    "type": "event",
    "name": "NewEpicNFTMinted",
    "inputs": [
      { "name": "sender", "type": "address", "indexed": false },
      { "name": "tokenId", "type": "uint256", "indexed": false }
    ],
    "anonymous": false
  }
]"#;

#[derive(Debug, thiserror::Error)]
pub enum ContractError {
    #[error(transparent)]
    Provider(#[from] ProviderError),
    /// The transaction was included but its execution reverted.
    #[error("transaction failed")]
    Reverted { hash: String },
    #[error("function `{0}` not found in contract ABI")]
    MissingFunction(String),
    #[error("function `{0}` takes arguments, a zero-argument mint function is required")]
    UnexpectedArguments(String),
    #[error("event `{0}` not found in contract ABI")]
    MissingEvent(String),
    #[error("event `{0}` does not carry an address and a token id")]
    MalformedEvent(String),
    #[error("failed to read contract ABI at {path:?}: {source}")]
    ReadAbi {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid contract ABI: {0}")]
    InvalidAbi(#[from] serde_json::Error),
    #[error(transparent)]
    Abi(#[from] alloy_dyn_abi::Error),
}

/// Parses either a bare ABI array or a compiler artifact carrying an `abi` field.
pub fn parse_abi(json: &str) -> Result<JsonAbi, ContractError> {
    let mut value: serde_json::Value = serde_json::from_str(json)?;
    if let Some(abi) = value.get_mut("abi") {
        value = abi.take();
    }
    Ok(serde_json::from_value(value)?)
}

/// The NFT contract: its address, the mint function and the mint-completed event.
#[derive(Clone, Debug)]
pub struct MintContract {
    address: Address,
    function: Function,
    event: Event,
}

impl MintContract {
    pub fn new(
        address: Address,
        abi: &JsonAbi,
        function: &str,
        event: &str,
    ) -> Result<Self, ContractError> {
        let functions =
            abi.function(function).ok_or_else(|| ContractError::MissingFunction(function.into()))?;
        let function = functions
            .iter()
            .find(|f| f.inputs.is_empty())
            .cloned()
            .ok_or_else(|| ContractError::UnexpectedArguments(function.into()))?;
        let event = abi
            .event(event)
            .and_then(|events| events.first())
            .cloned()
            .ok_or_else(|| ContractError::MissingEvent(event.into()))?;
        Ok(Self { address, function, event })
    }

    /// Builds the contract from the configured address, ABI and member names.
    pub fn from_config(config: &MinterConfig) -> Result<Self, ContractError> {
        let abi = match &config.abi_path {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .map_err(|source| ContractError::ReadAbi { path: path.clone(), source })?;
                parse_abi(&json)?
            }
            None => parse_abi(DEFAULT_ABI)?,
        };
        Self::new(config.contract_address, &abi, &config.mint_function, &config.mint_event)
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn function(&self) -> &Function {
        &self.function
    }

    pub fn event(&self) -> &Event {
        &self.event
    }

    /// Binds the contract to `signer`, sending through `provider`.
    pub fn bind(
        self: &Arc<Self>,
        provider: Arc<dyn Eip1193Provider>,
        signer: Address,
        poll_interval: Duration,
    ) -> ContractBinding {
        let poll_interval = poll_interval.max(MIN_POLL_INTERVAL);
        ContractBinding { contract: self.clone(), provider, signer, poll_interval }
    }

    /// Decodes a mint-completed log.
    pub fn decode_mint_completed(&self, log: &Log) -> Result<MintCompleted, ContractError> {
        let data = &log.inner.data;
        let decoded = self.event.decode_log_parts(data.topics().iter().copied(), &data.data)?;

        // restore declaration order, indexed and body params are decoded separately
        let mut indexed = decoded.indexed.into_iter();
        let mut body = decoded.body.into_iter();
        let values: Vec<DynSolValue> = self
            .event
            .inputs
            .iter()
            .filter_map(|param| if param.indexed { indexed.next() } else { body.next() })
            .collect();

        let from = values.iter().find_map(DynSolValue::as_address);
        let token_id = values.iter().find_map(|value| value.as_uint().map(|(uint, _)| uint));
        match (from, token_id) {
            (Some(from), Some(token_id)) => {
                Ok(MintCompleted { from, token_id, transaction_hash: log.transaction_hash })
            }
            _ => Err(ContractError::MalformedEvent(self.event.name.clone())),
        }
    }
}

/// A mint-completed event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MintCompleted {
    pub from: Address,
    pub token_id: U256,
    pub transaction_hash: Option<TxHash>,
}

/// [`MintContract`] bound to a signing account.
#[derive(Clone, Debug)]
pub struct ContractBinding {
    contract: Arc<MintContract>,
    provider: Arc<dyn Eip1193Provider>,
    signer: Address,
    poll_interval: Duration,
}

impl ContractBinding {
    pub fn signer(&self) -> Address {
        self.signer
    }

    pub fn contract(&self) -> &MintContract {
        &self.contract
    }

    /// Sends the mint transaction, returning once the wallet has broadcast it.
    pub async fn mint(&self) -> Result<PendingMint, ContractError> {
        let input = self.contract.function.abi_encode_input(&[])?;
        let tx = TransactionRequest::default()
            .from(self.signer)
            .to(self.contract.address)
            .input(TransactionInput::both(input.into()));

        let hash = self.provider.send_transaction(&tx).await?;
        debug!(%hash, "Mining...please wait.");
        Ok(PendingMint { hash, provider: self.provider.clone(), poll_interval: self.poll_interval })
    }

    /// Invokes `on_mint` for every mint-completed event emitted from now on, by any account.
    ///
    /// Events are polled for until the returned [`Subscription`] is dropped.
    pub fn subscribe_mint_completed<F>(&self, on_mint: F) -> Subscription
    where
        F: Fn(MintCompleted) + Send + Sync + 'static,
    {
        let contract = self.contract.clone();
        let provider = self.provider.clone();
        let poll_interval = self.poll_interval;
        let filter = Filter::new().address(contract.address).event_signature(contract.event.selector());

        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(poll_interval);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // first block not yet searched for events
            let mut next_block = None;

            loop {
                interval.tick().await;
                let latest = match provider.block_number().await {
                    Ok(latest) => latest,
                    Err(err) => {
                        warn!(%err, "failed to poll block number");
                        continue;
                    }
                };
                let from_block = match next_block {
                    None => {
                        next_block = Some(latest + 1);
                        continue;
                    }
                    Some(next) if next > latest => continue,
                    Some(next) => next,
                };

                let filter = filter.clone().from_block(from_block).to_block(latest);
                let logs = match provider.logs(&filter).await {
                    Ok(logs) => logs,
                    Err(err) => {
                        warn!(%err, from_block, to_block = latest, "failed to poll mint events");
                        continue;
                    }
                };
                for log in &logs {
                    match contract.decode_mint_completed(log) {
                        Ok(event) => on_mint(event),
                        Err(err) => warn!(%err, "skipping undecodable mint event"),
                    }
                }
                next_block = Some(latest + 1);
            }
        });

        Subscription { task }
    }
}

/// A broadcast mint transaction.
#[derive(Clone, Debug)]
pub struct PendingMint {
    hash: String,
    provider: Arc<dyn Eip1193Provider>,
    poll_interval: Duration,
}

impl PendingMint {
    /// The transaction hash, as reported by the wallet.
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Waits until the transaction is included, returning its hash.
    ///
    /// Waits indefinitely; the first provider error ends the wait.
    pub async fn confirmation(self) -> Result<String, ContractError> {
        loop {
            if let Some(receipt) = self.provider.transaction_receipt(&self.hash).await? {
                trace!(hash = %self.hash, block = ?receipt.block_number, "transaction included");
                return if receipt.succeeded() {
                    Ok(self.hash)
                } else {
                    Err(ContractError::Reverted { hash: self.hash })
                };
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}

/// A running event listener, stopped when dropped.
#[derive(Debug)]
#[must_use = "the listener stops when the subscription is dropped"]
pub struct Subscription {
    task: JoinHandle<()>,
}

impl Subscription {
    pub fn is_active(&self) -> bool {
        !self.task.is_finished()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.task.abort();
    }
}
