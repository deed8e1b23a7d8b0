use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::Deserialize;

use crate::blockchain::Block;
use crate::error::PeerError;

/// Route where every node publishes its full chain.
pub const CHAIN_ROUTE: &str = "/api/v1/chain/";

/// Source of peer chains for conflict resolution.
#[async_trait]
pub trait PeerClient: Send + Sync {
    /// Fetch the full chain reported by `node` (`host[:port]`).
    async fn fetch_chain(&self, node: &str) -> Result<Vec<Block>, PeerError>;
}

#[derive(Deserialize)]
struct PeerChainResponse {
    length: usize,
    chain: Vec<Block>,
}

/// Fetches peer chains over plain HTTP.
#[derive(Debug, Clone)]
pub struct HttpPeerClient {
    client: Client,
}

impl HttpPeerClient {
    /// `timeout` bounds connecting to and reading from a single peer.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .user_agent(format!("pow-ledger-node/{}", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PeerClient for HttpPeerClient {
    async fn fetch_chain(&self, node: &str) -> Result<Vec<Block>, PeerError> {
        let url = format!("http://{node}{CHAIN_ROUTE}");
        debug!("PEER - GET {url}");

        let request_failed = |source| PeerError::Request {
            node: node.to_string(),
            source,
        };

        let response = self.client.get(&url).send().await.map_err(request_failed)?;
        let status = response.status();
        if !status.is_success() {
            return Err(PeerError::Status {
                node: node.to_string(),
                status: status.as_u16(),
            });
        }

        let body: PeerChainResponse = response.json().await.map_err(request_failed)?;
        if body.length != body.chain.len() {
            return Err(PeerError::LengthMismatch {
                node: node.to_string(),
                reported: body.length,
                actual: body.chain.len(),
            });
        }
        Ok(body.chain)
    }
}
