use actix_web::{HttpResponse, Responder, get, post, web};
use log::{info, warn};

use super::models::{RegisterNodesRequest, RegisterNodesResponse, ResolveResponse};
use crate::consensus::{HttpPeerClient, normalize_address};
use crate::ledger::Ledger;

/// Register a batch of peers. All addresses are checked before any is added.
#[post("/nodes/register/")]
pub async fn register_nodes(
    ledger: web::Data<Ledger>,
    body: web::Json<RegisterNodesRequest>,
) -> impl Responder {
    let Some(nodes) = body.nodes.as_deref() else {
        return HttpResponse::BadRequest().body("Error: Please supply a valid list of nodes");
    };

    if let Err(e) = nodes
        .iter()
        .try_for_each(|n| normalize_address(n).map(|_| ()))
    {
        warn!("POST /nodes/register/ - rejected: {e}");
        return HttpResponse::BadRequest().body(e.to_string());
    }

    for node in nodes {
        if let Err(e) = ledger.register_node(node) {
            // Already validated above
            warn!("POST /nodes/register/ - {e}");
        }
    }

    HttpResponse::Created().json(RegisterNodesResponse {
        message: "New nodes have been added",
        total_nodes: ledger.nodes(),
    })
}

/// Run consensus against every registered peer.
#[get("/nodes/resolve/")]
pub async fn resolve(ledger: web::Data<Ledger>, peers: web::Data<HttpPeerClient>) -> impl Responder {
    let resolution = ledger.resolve_conflicts(peers.get_ref()).await;
    let message = if resolution.replaced {
        "Our chain was replaced"
    } else {
        "Our chain is authoritative"
    };
    info!(
        "GET /nodes/resolve/ - {message} (length={})",
        resolution.chain.len()
    );

    HttpResponse::Ok().json(ResolveResponse {
        message,
        replaced: resolution.replaced,
        chain: &resolution.chain,
    })
}
