mod api;
mod blockchain;
mod config;
mod consensus;
mod error;
mod ledger;
mod transaction;

use actix_web::{App, HttpServer, rt, web};
use dotenvy::dotenv;
use log::{info, warn};

use config::Settings;
use consensus::HttpPeerClient;
use ledger::Ledger;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let _ = dotenv();
    env_logger::init();

    let settings = Settings::from_env();

    let ledger = web::Data::new(Ledger::new(settings.node_id.clone(), settings.difficulty));
    for peer in &settings.peers {
        if let Err(e) = ledger.register_node(peer) {
            warn!("ignoring seed peer: {e}");
        }
    }

    let peers = web::Data::new(
        HttpPeerClient::new(settings.peer_timeout).map_err(std::io::Error::other)?,
    );

    if let Some(every) = settings.resolve_interval {
        let ledger = ledger.clone();
        let peers = peers.clone();
        rt::spawn(async move {
            let mut ticker = rt::time::interval(every);
            loop {
                ticker.tick().await;
                let resolution = ledger.resolve_conflicts(peers.get_ref()).await;
                if resolution.replaced {
                    info!("periodic resolve adopted a chain of {} blocks", resolution.chain.len());
                }
            }
        });
    }

    info!(
        "⛓️ Starting ledger node {} at http://{}:{} (difficulty={}, peers={})",
        ledger.node_id(),
        settings.host,
        settings.port,
        settings.difficulty.leading_zeros(),
        ledger.peer_count()
    );

    HttpServer::new(move || {
        App::new()
            .app_data(ledger.clone())
            .app_data(peers.clone())
            .configure(api::init_routes)
    })
    .bind((settings.host.as_str(), settings.port))?
    .run()
    .await
}
