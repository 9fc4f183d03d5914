//! SeaORM storage backend
//!
//! Database storage for the geography registry, the catalog and contact
//! capture, supporting SQLite, MySQL/MariaDB and PostgreSQL.

mod catalog;
mod connection;
mod contact;
pub mod converters;
mod geography;
mod mutations;
pub mod retry;
mod scope;
mod seed;

use sea_orm::{DatabaseConnection, EntityTrait, Select};
use tracing::info;

use crate::config::DatabaseConfig;
use crate::errors::{Result, TravelError};

pub use connection::{connect_generic, connect_sqlite, run_migrations};
pub use contact::ContactSubmission;
pub use seed::{SeedReport, default_countries};

/// 从数据库 URL 推断数据库类型
pub fn infer_backend_from_url(database_url: &str) -> Result<String> {
    if database_url.starts_with("sqlite:")
        || database_url.ends_with(".db")
        || database_url.ends_with(".sqlite")
    {
        Ok("sqlite".to_string())
    } else if database_url.starts_with("mysql://") || database_url.starts_with("mariadb://") {
        Ok("mysql".to_string())
    } else if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        Ok("postgres".to_string())
    } else {
        Err(TravelError::database_config(format!(
            "无法从 URL 推断数据库类型: {}. 支持的 URL 格式: sqlite://, mysql://, mariadb://, postgres://",
            database_url
        )))
    }
}

/// 带上下文的 DbErr 转换；唯一约束冲突保留为 Conflict
pub(crate) fn db_err(context: &str, err: sea_orm::DbErr) -> TravelError {
    match TravelError::from(err) {
        TravelError::DatabaseOperation(msg) => {
            TravelError::database_operation(format!("{}: {}", context, msg))
        }
        other => other,
    }
}

/// SeaORM-based storage backend
#[derive(Clone)]
pub struct SeaOrmStorage {
    db: DatabaseConnection,
    backend_name: String,
    retry_config: retry::RetryConfig,
}

impl SeaOrmStorage {
    /// 连接数据库并运行迁移
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        let database_url = config.database_url.trim();
        if database_url.is_empty() {
            return Err(TravelError::database_config("database_url 未设置"));
        }
        let backend_name = infer_backend_from_url(database_url)?;

        let db = if backend_name == "sqlite" {
            connect_sqlite(database_url).await?
        } else {
            connect_generic(database_url, &backend_name, config).await?
        };

        run_migrations(&db).await?;

        info!("{} storage initialized", backend_name.to_uppercase());
        Ok(SeaOrmStorage {
            db,
            backend_name,
            retry_config: retry::RetryConfig::from(config),
        })
    }

    pub fn backend_name(&self) -> &str {
        &self.backend_name
    }

    /// 获取数据库连接
    pub fn get_db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// 带重试的列表查询
    async fn fetch_all<E>(&self, op: &str, select: Select<E>) -> Result<Vec<E::Model>>
    where
        E: EntityTrait,
    {
        let db = &self.db;
        retry::with_retry(op, self.retry_config, || {
            let select = select.clone();
            async move { select.all(db).await }
        })
        .await
        .map_err(|e| db_err(op, e))
    }

    /// 带重试的单行查询
    async fn fetch_one<E>(&self, op: &str, select: Select<E>) -> Result<Option<E::Model>>
    where
        E: EntityTrait,
    {
        let db = &self.db;
        retry::with_retry(op, self.retry_config, || {
            let select = select.clone();
            async move { select.one(db).await }
        })
        .await
        .map_err(|e| db_err(op, e))
    }

    /// 健康检查用的轻量探测
    pub async fn ping(&self) -> Result<()> {
        self.db
            .ping()
            .await
            .map_err(|e| TravelError::database_connection(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_backend_from_url() {
        assert_eq!(
            infer_backend_from_url("sqlite://travel.db?mode=rwc").unwrap(),
            "sqlite"
        );
        assert_eq!(infer_backend_from_url("sqlite::memory:").unwrap(), "sqlite");
        assert_eq!(infer_backend_from_url("data/travel.db").unwrap(), "sqlite");
        assert_eq!(
            infer_backend_from_url("mariadb://u:p@localhost/travel").unwrap(),
            "mysql"
        );
        assert_eq!(
            infer_backend_from_url("postgresql://localhost/travel").unwrap(),
            "postgres"
        );
        assert!(infer_backend_from_url("redis://localhost").is_err());
    }

    #[test]
    fn test_db_err_keeps_context() {
        let err = db_err("listar", sea_orm::DbErr::Custom("boom".into()));
        assert!(matches!(err, TravelError::DatabaseOperation(ref m) if m.starts_with("listar")));
    }
}
