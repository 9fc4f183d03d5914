//! Contact capture persistence
//!
//! 客户以 email 为自然键去重：在 savepoint 里做普通 INSERT，唯一约束冲突
//! 说明是老客户，回滚 savepoint 后覆盖姓名和电话，email 不变。
//! 不依赖 `ON CONFLICT` / `ON DUPLICATE KEY`，三种后端生成同样的语句。

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, Insert, QueryFilter, QueryOrder, SqlErr,
    TransactionTrait,
};
use tracing::{debug, info};

use super::converters::{
    contact_message_to_active_model, model_to_contact_message, model_to_contact_request,
    model_to_customer,
};
use super::{SeaOrmStorage, db_err, retry};
use crate::errors::{Result, TravelError};
use crate::storage::models::{
    CapturedContact, ContactMessage, ContactRequest, CustomerWithRequests,
};

use migration::entities::{contact_message, contact_request, customer};

/// 已校验的联系表单
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

/// 新客户的普通 INSERT
pub(super) fn customer_insert(
    submission: &ContactSubmission,
    now: DateTime<Utc>,
) -> Insert<customer::ActiveModel> {
    customer::Entity::insert(customer::ActiveModel {
        id: NotSet,
        full_name: Set(submission.full_name.clone()),
        email: Set(submission.email.clone()),
        phone: Set(submission.phone.clone()),
        registered_at: Set(now),
    })
}

pub(super) fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

impl SeaOrmStorage {
    /// 在一个事务内完成客户 upsert 和请求记录
    ///
    /// 事务只包含数据库操作；通知由调用方在提交之后发送。
    pub async fn capture_contact(&self, submission: &ContactSubmission) -> Result<CapturedContact> {
        let db = &self.db;

        let result = retry::with_retry(
            &format!("capture_contact({})", submission.email),
            self.retry_config,
            || async {
                let txn = db.begin().await?;
                let now = Utc::now();

                let savepoint = txn.begin().await?;
                let created = match customer_insert(submission, now).exec(&savepoint).await {
                    Ok(_) => {
                        savepoint.commit().await?;
                        true
                    }
                    Err(err) if is_unique_violation(&err) => {
                        savepoint.rollback().await?;
                        false
                    }
                    Err(err) => return Err(err),
                };

                if !created {
                    customer::Entity::update_many()
                        .col_expr(
                            customer::Column::FullName,
                            Expr::val(submission.full_name.clone()),
                        )
                        .col_expr(customer::Column::Phone, Expr::val(submission.phone.clone()))
                        .filter(customer::Column::Email.eq(submission.email.as_str()))
                        .exec(&txn)
                        .await?;
                }

                // 冲突后仍然找不到这一行：并发写入方尚未提交或已被删除
                let customer = customer::Entity::find()
                    .filter(customer::Column::Email.eq(submission.email.as_str()))
                    .one(&txn)
                    .await?
                    .ok_or_else(|| DbErr::RecordNotFound(submission.email.clone()))?;

                let request = contact_request::ActiveModel {
                    id: NotSet,
                    customer_id: Set(customer.id),
                    message: Set(submission.message.clone()),
                    created_at: Set(now),
                    handled: Set(false),
                }
                .insert(&txn)
                .await?;

                txn.commit().await?;
                Ok::<_, DbErr>((customer, request, created))
            },
        )
        .await;

        match result {
            Ok((customer, request, created)) => {
                info!(
                    "Contact captured: customer={} request={} new={}",
                    customer.id, request.id, created
                );
                Ok(CapturedContact {
                    customer: model_to_customer(customer),
                    request: model_to_contact_request(request),
                    created,
                })
            }
            Err(DbErr::RecordNotFound(email)) => Err(TravelError::conflict(format!(
                "Cliente con email {} modificado concurrentemente; reintente",
                email
            ))),
            Err(e) => Err(db_err("capture_contact", e)),
        }
    }

    /// 所有客户及其请求，均按时间从新到旧
    pub async fn list_customers_with_requests(&self) -> Result<Vec<CustomerWithRequests>> {
        let customers = self
            .fetch_all(
                "list_customers",
                customer::Entity::find()
                    .order_by_desc(customer::Column::RegisteredAt)
                    .order_by_desc(customer::Column::Id),
            )
            .await?;
        let requests = self
            .fetch_all(
                "list_contact_requests",
                contact_request::Entity::find()
                    .order_by_desc(contact_request::Column::CreatedAt)
                    .order_by_desc(contact_request::Column::Id),
            )
            .await?;

        let mut by_customer: HashMap<i64, Vec<ContactRequest>> = HashMap::new();
        for request in requests {
            by_customer
                .entry(request.customer_id)
                .or_default()
                .push(model_to_contact_request(request));
        }

        Ok(customers
            .into_iter()
            .map(|c| CustomerWithRequests {
                requests: by_customer.remove(&c.id).unwrap_or_default(),
                customer: model_to_customer(c),
            })
            .collect())
    }

    /// 标记请求已处理 / 未处理
    pub async fn set_request_handled(&self, id: i64, handled: bool) -> Result<ContactRequest> {
        let model = self
            .fetch_one("get_contact_request", contact_request::Entity::find_by_id(id))
            .await?
            .ok_or_else(|| TravelError::not_found(format!("Solicitud {} no encontrada", id)))?;

        let mut active: contact_request::ActiveModel = model.into();
        active.handled = Set(handled);
        let updated = active
            .update(&self.db)
            .await
            .map_err(|e| db_err("set_request_handled", e))?;

        debug!("Contact request {} handled={}", id, handled);
        Ok(model_to_contact_request(updated))
    }

    pub async fn insert_contact_message(&self, message: &ContactMessage) -> Result<ContactMessage> {
        let model = contact_message_to_active_model(message)
            .insert(&self.db)
            .await
            .map_err(|e| db_err("insert_contact_message", e))?;
        Ok(model_to_contact_message(model))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DbBackend, QueryTrait};

    fn submission() -> ContactSubmission {
        ContactSubmission {
            full_name: "Ana Ruiz".into(),
            email: "ana@x.com".into(),
            phone: "0991234567".into(),
            message: "hola".into(),
        }
    }

    #[test]
    fn test_customer_insert_is_portable() {
        for backend in [DbBackend::Sqlite, DbBackend::Postgres, DbBackend::MySql] {
            let sql = customer_insert(&submission(), Utc::now()).build(backend).sql;
            assert!(sql.starts_with("INSERT INTO"), "{:?}: {}", backend, sql);
            assert!(!sql.contains("ON CONFLICT"), "{:?}: {}", backend, sql);
            assert!(!sql.contains("ON DUPLICATE"), "{:?}: {}", backend, sql);
            assert!(!sql.contains("IGNORE"), "{:?}: {}", backend, sql);
        }
    }

    #[test]
    fn test_unique_violation_detection() {
        assert!(!is_unique_violation(&DbErr::RecordNotFound("x".into())));
        assert!(!is_unique_violation(&DbErr::Custom("UNIQUE constraint failed".into())));
    }
}
