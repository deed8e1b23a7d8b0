mod chain;
mod health;
pub mod models;
mod nodes;
mod tx;

use actix_web::web::{self, ServiceConfig};

pub fn init_routes(cfg: &mut ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .service(health::health_check)
            .service(health::get_status)
            .service(chain::get_chain)
            .service(chain::validate_chain)
            .service(chain::mine_block)
            .service(tx::post_transaction)
            .service(tx::get_mempool)
            .service(nodes::register_nodes)
            .service(nodes::resolve),
    );
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use actix_web::http::StatusCode;
    use actix_web::{App, test, web};
    use serde_json::{Value, json};

    use super::init_routes;
    use crate::blockchain::Difficulty;
    use crate::consensus::HttpPeerClient;
    use crate::consensus::peer::CHAIN_ROUTE;
    use crate::ledger::Ledger;

    macro_rules! app {
        ($ledger:expr) => {
            test::init_service(
                App::new()
                    .app_data($ledger.clone())
                    .app_data(web::Data::new(
                        HttpPeerClient::new(Duration::from_millis(200)).unwrap(),
                    ))
                    .configure(init_routes),
            )
            .await
        };
    }

    fn ledger() -> web::Data<Ledger> {
        web::Data::new(Ledger::new("node-a", Difficulty::new(2)))
    }

    #[actix_web::test]
    async fn chain_route_reports_genesis() {
        let app = app!(ledger());
        let req = test::TestRequest::get().uri(CHAIN_ROUTE).to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["length"], 1);
        assert_eq!(body["chain"][0]["index"], 1);
        assert_eq!(body["chain"][0]["previous_hash"], "1");
        assert_eq!(body["chain"][0]["proof"], 100);
    }

    #[actix_web::test]
    async fn submitting_a_transaction_returns_the_next_index() {
        let ledger = ledger();
        let app = app!(ledger);
        let req = test::TestRequest::post()
            .uri("/api/v1/transactions/new/")
            .set_json(json!({ "sender": "A", "recipient": "B", "amount": 10 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["index"], 2);
        assert_eq!(body["message"], "Transaction will be added to block 2");
        assert_eq!(ledger.pending_len(), 1);
    }

    #[actix_web::test]
    async fn missing_transaction_field_is_a_bad_request() {
        let ledger = ledger();
        let app = app!(ledger);
        let req = test::TestRequest::post()
            .uri("/api/v1/transactions/new/")
            .set_json(json!({ "sender": "A", "amount": 10 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ledger.pending_len(), 0);
    }

    #[actix_web::test]
    async fn fractional_amount_is_a_bad_request() {
        let ledger = ledger();
        let app = app!(ledger);
        let req = test::TestRequest::post()
            .uri("/api/v1/transactions/new/")
            .set_json(json!({ "sender": "A", "recipient": "B", "amount": 10.5 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ledger.pending_len(), 0);
    }

    #[actix_web::test]
    async fn mining_forges_a_block_and_empties_the_mempool() {
        let ledger = ledger();
        let app = app!(ledger);
        ledger.submit_transaction("A", "B", 10).unwrap();

        let req = test::TestRequest::get().uri("/api/v1/mine/").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["message"], "New Block Forged");
        assert_eq!(body["index"], 2);
        assert_eq!(body["transactions"].as_array().unwrap().len(), 2);
        assert_eq!(body["transactions"][1]["sender"], "0");
        assert_eq!(body["transactions"][1]["recipient"], "node-a");

        let req = test::TestRequest::get().uri("/api/v1/mempool/").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["size"], 0);

        let req = test::TestRequest::get().uri("/api/v1/validate/").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["valid"], true);
        assert_eq!(body["length"], 2);
    }

    #[actix_web::test]
    async fn node_registration_is_all_or_nothing() {
        let ledger = ledger();
        let app = app!(ledger);

        let req = test::TestRequest::post()
            .uri("/api/v1/nodes/register/")
            .set_json(json!({ "nodes": ["http://127.0.0.1:5001", "http://"] }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ledger.peer_count(), 0);

        let req = test::TestRequest::post()
            .uri("/api/v1/nodes/register/")
            .set_json(json!({ "nodes": ["http://127.0.0.1:5001", "127.0.0.1:5001"] }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["total_nodes"], json!(["127.0.0.1:5001"]));
    }

    #[actix_web::test]
    async fn registering_without_nodes_is_rejected() {
        let app = app!(ledger());
        let req = test::TestRequest::post()
            .uri("/api/v1/nodes/register/")
            .set_json(json!({}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn resolve_without_peers_keeps_local_chain() {
        let app = app!(ledger());
        let req = test::TestRequest::get().uri("/api/v1/nodes/resolve/").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["replaced"], false);
        assert_eq!(body["message"], "Our chain is authoritative");
        assert_eq!(body["chain"].as_array().unwrap().len(), 1);
    }

    #[actix_web::test]
    async fn status_reports_node_state() {
        let ledger = ledger();
        let app = app!(ledger);
        ledger.register_node("127.0.0.1:5001").unwrap();
        ledger.submit_transaction("A", "B", 1).unwrap();

        let req = test::TestRequest::get().uri("/api/v1/status/").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["node_id"], "node-a");
        assert_eq!(body["length"], 1);
        assert_eq!(body["difficulty"], 2);
        assert_eq!(body["pending"], 1);
        assert_eq!(body["peers"], 1);
        assert_eq!(body["mining"], false);
    }
}
