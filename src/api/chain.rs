use actix_web::{HttpResponse, Responder, get, web};
use log::{error, info, warn};

use super::models::{ChainResponse, MineResponse, ValidateResponse};
use crate::error::LedgerError;
use crate::ledger::Ledger;

/// Get the full blockchain.
#[get("/chain/")]
pub async fn get_chain(ledger: web::Data<Ledger>) -> impl Responder {
    let view = ledger.get_chain();
    HttpResponse::Ok().json(ChainResponse {
        chain: &view.chain,
        length: view.length,
    })
}

/// Validate the local chain with the rules applied to peer chains.
#[get("/validate/")]
pub async fn validate_chain(ledger: web::Data<Ledger>) -> impl Responder {
    HttpResponse::Ok().json(ValidateResponse {
        valid: ledger.is_chain_valid(),
        length: ledger.get_chain().length,
        difficulty: ledger.difficulty().leading_zeros(),
    })
}

/// Mine a new block from the pending pool.
/// The proof search runs on the blocking pool so other requests keep flowing.
#[get("/mine/")]
pub async fn mine_block(ledger: web::Data<Ledger>) -> impl Responder {
    let worker = ledger.clone();
    match web::block(move || worker.mine()).await {
        Ok(Ok(block)) => {
            info!("GET /mine/ - forged block #{}", block.index);
            HttpResponse::Ok().json(MineResponse {
                message: "New Block Forged",
                index: block.index,
                transactions: &block.transactions,
                proof: block.proof,
                previous_hash: &block.previous_hash,
            })
        }
        Ok(Err(e @ (LedgerError::MiningCancelled | LedgerError::StaleProof))) => {
            warn!("GET /mine/ - {e}");
            HttpResponse::Conflict().body(e.to_string())
        }
        Ok(Err(e)) => HttpResponse::BadRequest().body(e.to_string()),
        Err(e) => {
            error!("GET /mine/ - mining worker failed: {e}");
            HttpResponse::InternalServerError().body("mining worker failed")
        }
    }
}
