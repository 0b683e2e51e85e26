use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing::info;

use pms_api::middleware::create_cors;
use pms_api::telemetry::init_logging;
use pms_api::{create_app, AppState};
use pms_core::services::{
    DeliveryDispatcher, DispatcherConfig, DocumentService, KeyValueCache, OtpService,
    OtpServiceConfig, OtpStore, StorageSigner, UploadConfig,
};
use pms_infra::delivery::{mail_transport, message_transport, TwilioChannel};
use pms_infra::{
    DatabasePool, GcsSigner, MemoryCache, MySqlDocumentRepository, MySqlPatientRepository,
    RedisCache, RedisClient,
};
use pms_shared::{AppConfig, CacheBackend};

type Documents = DocumentService<MySqlDocumentRepository, MySqlPatientRepository>;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    init_logging(&config.logging)?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    info!(environment = %config.environment, "Starting clinic PMS API server");

    let database = DatabasePool::new(&config.database)
        .await
        .context("Failed to connect to the database")?;
    let document_service = Arc::new(DocumentService::new(
        Arc::new(MySqlDocumentRepository::new(database.get_pool().clone())),
        Arc::new(MySqlPatientRepository::new(database.get_pool().clone())),
        signer(&config)?,
        UploadConfig::from(&config.storage),
    ));

    let environment = config.environment;
    let dispatcher = Arc::new(DeliveryDispatcher::new(
        DispatcherConfig::new(&config.delivery, &config.otp),
        mail_transport(environment, config.delivery.smtp.as_ref())?,
        message_transport(environment, TwilioChannel::Sms, &config.delivery.sms)?,
        message_transport(environment, TwilioChannel::Whatsapp, &config.delivery.whatsapp)?,
    ));

    match config.cache.backend {
        CacheBackend::Redis => {
            let client = RedisClient::new(&config.cache)
                .await
                .context("Failed to connect to Redis")?;
            serve(&config, Arc::new(RedisCache::new(client)), dispatcher, document_service).await
        }
        CacheBackend::Memory => {
            tracing::warn!("Using in-memory OTP cache; state is not shared between instances");
            serve(&config, Arc::new(MemoryCache::new()), dispatcher, document_service).await
        }
    }
}

async fn serve<C>(
    config: &AppConfig,
    cache: Arc<C>,
    dispatcher: Arc<DeliveryDispatcher>,
    document_service: Arc<Documents>,
) -> anyhow::Result<()>
where
    C: KeyValueCache + 'static,
{
    let otp_config =
        OtpServiceConfig::from(&config.otp).with_key_prefix(config.cache.key_prefix.clone());
    let otp_service = Arc::new(OtpService::new(OtpStore::new(cache, otp_config), dispatcher));
    let app_state = web::Data::new(AppState::new(otp_service, document_service));

    let environment = config.environment;
    let server_config = config.server.clone();
    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let mut server = HttpServer::new(move || {
        create_app(app_state.clone(), create_cors(environment, &server_config))
    });
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run()
        .await
        .context("Server error")
}

fn signer(config: &AppConfig) -> anyhow::Result<Arc<dyn StorageSigner>> {
    let signer: Arc<dyn StorageSigner> = Arc::new(GcsSigner::from_config(&config.storage)?);
    Ok(signer)
}
