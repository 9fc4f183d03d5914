use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::{NotificationsConfig, StaticConfig};
use crate::services::{CatalogService, ContactService, GeographyService, NotificationDispatcher};
use crate::storage::{SeaOrmStorage, StorageFactory};

pub struct StartupContext {
    pub storage: Arc<SeaOrmStorage>,
    pub geography: Arc<GeographyService>,
    pub catalog: Arc<CatalogService>,
    pub contact: Arc<ContactService>,
}

impl StartupContext {
    /// 基于已连接的 storage 组装各 service
    pub fn new(storage: Arc<SeaOrmStorage>, dispatcher: NotificationDispatcher) -> Self {
        Self {
            geography: Arc::new(GeographyService::new(storage.clone())),
            catalog: Arc::new(CatalogService::new(storage.clone())),
            contact: Arc::new(ContactService::new(storage.clone(), dispatcher)),
            storage,
        }
    }
}

fn log_notification_setup(config: &NotificationsConfig) {
    if !config.email.enabled && !config.whatsapp.enabled {
        warn!("No notification channel enabled; contact requests will only be stored");
        return;
    }
    if config.email.enabled {
        info!(
            "Email notifications enabled via {}:{} ({} recipients)",
            config.email.smtp_host,
            config.email.smtp_port,
            config.email.recipients.len()
        );
    }
    if config.whatsapp.enabled {
        info!(
            "WhatsApp notifications enabled (template '{}')",
            config.whatsapp.template_name
        );
    }
}

/// 安装 rustls 加密后端（SMTP TLS 与 WhatsApp HTTPS 共用）
pub fn install_crypto_provider() -> Result<()> {
    if rustls::crypto::CryptoProvider::get_default().is_some() {
        return Ok(());
    }
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|e| anyhow::anyhow!("Failed to install rustls crypto provider: {:?}", e))
}

/// 连接数据库（含迁移）
pub async fn connect_storage(config: &StaticConfig) -> Result<Arc<SeaOrmStorage>> {
    let storage = StorageFactory::create(&config.database)
        .await
        .context("Failed to create storage backend")?;
    info!("Using storage backend: {}", storage.backend_name());
    Ok(storage)
}

/// 准备服务器启动的上下文
pub async fn prepare_server_startup() -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    install_crypto_provider()?;

    let config = crate::config::get_config();
    let storage = connect_storage(&config).await?;

    log_notification_setup(&config.notifications);
    let dispatcher = NotificationDispatcher::from_config(&config.notifications);

    if config.api.admin_token.trim().is_empty() {
        info!("Admin API is disabled (api.admin_token not set)");
    } else {
        info!(
            "Admin API available at: {}{}",
            config.routes.api_prefix, config.routes.admin_prefix
        );
    }

    debug!("Pre-startup processing completed in {:?}", start_time.elapsed());
    Ok(StartupContext::new(storage, dispatcher))
}
