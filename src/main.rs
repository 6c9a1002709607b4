use std::sync::Arc;

use actix_files::Files;
use actix_web::{App, HttpServer, middleware, web};
use dotenvy::dotenv;
use pushkind_common::db::establish_connection_pool;

use pushkind_inventory::config::ServerConfig;
use pushkind_inventory::domain::station::Station;
use pushkind_inventory::printer::{EscPosPrinter, ReceiptPrinter, ReceiptRenderer};
use pushkind_inventory::repository::DieselRepository;
use pushkind_inventory::routes;
use pushkind_inventory::services::locations::ensure_station_location;
use pushkind_inventory::services::sync::restore_dirty_flag;
use pushkind_inventory::sync::{HttpSyncTransport, SyncState, SyncTransport};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    dotenv().ok(); // Load .env file

    let config = ServerConfig::from_env();

    let pool = match establish_connection_pool(&config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };
    if let Err(e) = pushkind_inventory::run_migrations(&pool) {
        log::error!("Failed to run migrations: {e}");
        std::process::exit(1);
    }
    let repo = DieselRepository::new(pool);

    let location = match ensure_station_location(&repo, config.location_id, &config.location_name)
    {
        Ok(location) => location,
        Err(e) => {
            log::error!("Location {} is not available: {e}", config.location_id);
            std::process::exit(1);
        }
    };
    log::info!("Serving location {} ({})", location.id, location.name);
    let station = web::Data::new(Station::new(location.id, config.operator_name.clone()));

    let sync_state = web::Data::new(SyncState::new(true));
    match restore_dirty_flag(&repo, &station, &sync_state) {
        Ok(true) => log::info!("Unsynced records found; the next sync pass will push them"),
        Ok(false) => {}
        Err(e) => log::error!("Failed to read the sync queue: {e}"),
    }
    let sync_transport: Option<web::Data<dyn SyncTransport>> =
        config.sync_api_url.as_deref().map(|url| {
            let transport: Arc<dyn SyncTransport> = Arc::new(HttpSyncTransport::new(url));
            web::Data::from(transport)
        });
    if sync_transport.is_none() {
        log::warn!("SYNC_API_URL is not set; sync is disabled");
    }

    let renderer = match ReceiptRenderer::new(&config.currency_symbol, config.receipt_width) {
        Ok(renderer) => renderer,
        Err(e) => {
            log::error!("Failed to load receipt template: {e}");
            std::process::exit(1);
        }
    };
    let printer: Option<web::Data<dyn ReceiptPrinter>> =
        config.printer_device.as_deref().map(|device| {
            let printer: Arc<dyn ReceiptPrinter> = Arc::new(EscPosPrinter::new(device, renderer));
            web::Data::from(printer)
        });

    let repo = web::Data::new(repo);

    HttpServer::new(move || {
        let mut app = App::new()
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .app_data(repo.clone())
            .app_data(station.clone())
            .app_data(sync_state.clone());
        if let Some(transport) = &sync_transport {
            app = app.app_data(transport.clone());
        }
        if let Some(printer) = &printer {
            app = app.app_data(printer.clone());
        }
        app.service(web::scope("/api/v1").configure(routes::configure))
            .service(Files::new("/", "./assets").index_file("index.html"))
    })
    .bind((config.address.clone(), config.port))?
    .run()
    .await
}
