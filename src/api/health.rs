use actix_web::{HttpResponse, Responder, get, web};

use super::models::StatusResponse;
use crate::ledger::Ledger;

#[get("/health/")]
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().body("API is up and running 🦀")
}

/// Lightweight snapshot of this node.
#[get("/status/")]
pub async fn get_status(ledger: web::Data<Ledger>) -> impl Responder {
    HttpResponse::Ok().json(StatusResponse {
        node_id: ledger.node_id(),
        length: ledger.get_chain().length,
        difficulty: ledger.difficulty().leading_zeros(),
        pending: ledger.pending_len(),
        peers: ledger.peer_count(),
        mining: ledger.is_mining(),
    })
}
