use serde::{Deserialize, Serialize};

use crate::blockchain::Block;
use crate::transaction::Transaction;

/* ---------- Chain API Models ---------- */

#[derive(Serialize)]
pub struct ChainResponse<'a> {
    pub chain: &'a [Block],
    pub length: usize,
}

#[derive(Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub length: usize,
    pub difficulty: usize,
}

#[derive(Serialize)]
pub struct MineResponse<'a> {
    pub message: &'static str,
    pub index: u64,
    pub transactions: &'a [Transaction],
    pub proof: u64,
    pub previous_hash: &'a str,
}

/* ---------- TX API Models ---------- */

#[derive(Deserialize)]
pub struct NewTxRequest {
    pub sender: String,
    pub recipient: String,
    pub amount: i64,
}

#[derive(Serialize)]
pub struct NewTxResponse {
    pub message: String,
    pub index: u64,
}

#[derive(Serialize)]
pub struct MempoolResponse {
    pub size: usize,
    pub transactions: Vec<Transaction>,
}

/* ---------- Node API Models ---------- */

#[derive(Deserialize)]
pub struct RegisterNodesRequest {
    pub nodes: Option<Vec<String>>,
}

#[derive(Serialize)]
pub struct RegisterNodesResponse {
    pub message: &'static str,
    pub total_nodes: Vec<String>,
}

#[derive(Serialize)]
pub struct ResolveResponse<'a> {
    pub message: &'static str,
    pub replaced: bool,
    pub chain: &'a [Block],
}

#[derive(Serialize)]
pub struct StatusResponse<'a> {
    pub node_id: &'a str,
    pub length: usize,
    pub difficulty: usize,
    pub pending: usize,
    pub peers: usize,
    pub mining: bool,
}
