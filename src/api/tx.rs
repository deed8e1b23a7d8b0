use actix_web::{HttpResponse, Responder, get, post, web};
use log::warn;

use super::models::{MempoolResponse, NewTxRequest, NewTxResponse};
use crate::ledger::Ledger;

/// Submit a new transaction into the pending pool.
/// Missing fields are rejected by the JSON extractor before we get here.
#[post("/transactions/new/")]
pub async fn post_transaction(
    ledger: web::Data<Ledger>,
    body: web::Json<NewTxRequest>,
) -> impl Responder {
    match ledger.submit_transaction(&body.sender, &body.recipient, body.amount) {
        Ok(index) => HttpResponse::Created().json(NewTxResponse {
            message: format!("Transaction will be added to block {index}"),
            index,
        }),
        Err(e) => {
            warn!("POST /transactions/new/ - rejected: {e}");
            HttpResponse::BadRequest().body(e.to_string())
        }
    }
}

/// List the pending pool.
#[get("/mempool/")]
pub async fn get_mempool(ledger: web::Data<Ledger>) -> impl Responder {
    let transactions = ledger.pending_transactions();
    HttpResponse::Ok().json(MempoolResponse {
        size: transactions.len(),
        transactions,
    })
}
