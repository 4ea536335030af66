//! Report store backed by Supabase (PostgREST).
//!
//! Reads paid orders from the order schema and keeps per-report bookkeeping
//! in the public schema: the status RPC and the generation log table.

use std::collections::HashSet;

use async_trait::async_trait;
use futures::future::join_all;
use postgrest::{Builder, Postgrest};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;

use crate::config::SupabaseConfig;
use crate::student::models::{ReportStatus, Student, StudentRecord};

pub const ORDERS_TABLE: &str = "payment_orders";
pub const CUSTOMERS_TABLE: &str = "customers";
pub const REPORT_LOG_TABLE: &str = "isis_report_logs";
pub const STATUS_RPC: &str = "dnawakes_update_report_status";

const ORDER_COLUMNS: &str =
    "id,order_number,buyer_name,buyer_email,amount,plan_type,created_at,customer_id";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("request to Supabase failed: {0}")]
    Request(String),
    #[error("Supabase responded with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("unexpected Supabase response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl StoreError {
    fn request(e: impl std::fmt::Display) -> Self {
        StoreError::Request(e.to_string())
    }
}

#[async_trait]
pub trait ReportStore: Send + Sync {
    /// Paid report orders, newest first.
    async fn fetch_pending_reports(&self) -> Result<Vec<StudentRecord>, StoreError>;

    async fn update_report_status(
        &self,
        order_number: &str,
        status: ReportStatus,
    ) -> Result<(), StoreError>;

    async fn log_generation(
        &self,
        student: &Student,
        content_length: usize,
    ) -> Result<(), StoreError>;
}

#[derive(Debug, Deserialize)]
pub(crate) struct PaymentOrderRow {
    pub id: Value,
    pub order_number: String,
    #[serde(default)]
    pub buyer_name: Option<String>,
    #[serde(default)]
    pub buyer_email: Option<String>,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub plan_type: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub customer_id: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct CustomerRow {
    #[serde(default)]
    custom_fields: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct ReportLogRow {
    order_number: String,
}

pub struct SupabaseReportStore {
    orders: Postgrest,
    public: Postgrest,
    plan_types: Vec<String>,
}

impl SupabaseReportStore {
    pub fn new(config: SupabaseConfig) -> Self {
        let rest_url = config.rest_url();
        let key = config.service_role_key.clone();
        let client = |schema: Option<&str>| {
            let mut client = Postgrest::new(rest_url.clone());
            if let Some(schema) = schema {
                client = client.schema(schema);
            }
            client
                .insert_header("apikey", key.clone())
                .insert_header("Authorization", format!("Bearer {}", key))
        };

        Self {
            orders: client(Some(config.schema.as_str())),
            public: client(None),
            plan_types: config.plan_types,
        }
    }

    async fn birth_date(&self, customer_id: &Value) -> Option<String> {
        let id = value_as_key(customer_id)?;
        let query = self
            .orders
            .from(CUSTOMERS_TABLE)
            .select("custom_fields")
            .eq("id", &id)
            .single();

        match fetch::<CustomerRow>(query).await {
            Ok(row) => row
                .custom_fields
                .as_ref()
                .and_then(|fields| fields.get("birth_date"))
                .and_then(Value::as_str)
                .map(str::to_string),
            Err(e) => {
                log::debug!("No birth date for customer {}: {}", id, e);
                None
            }
        }
    }

    async fn sent_orders(&self, order_numbers: &[String]) -> HashSet<String> {
        if order_numbers.is_empty() {
            return HashSet::new();
        }

        let query = self
            .public
            .from(REPORT_LOG_TABLE)
            .select("order_number")
            .eq("status", "completed")
            .in_("order_number", order_numbers);

        match fetch::<Vec<ReportLogRow>>(query).await {
            Ok(rows) => rows.into_iter().map(|r| r.order_number).collect(),
            Err(e) => {
                log::warn!("Could not read report log, assuming pending: {}", e);
                HashSet::new()
            }
        }
    }
}

#[async_trait]
impl ReportStore for SupabaseReportStore {
    async fn fetch_pending_reports(&self) -> Result<Vec<StudentRecord>, StoreError> {
        let query = self
            .orders
            .from(ORDERS_TABLE)
            .select(ORDER_COLUMNS)
            .eq("payment_status", "completed")
            .in_("plan_type", &self.plan_types)
            .order("created_at.desc");
        let orders: Vec<PaymentOrderRow> = fetch(query).await?;
        log::info!("Fetched {} paid report orders", orders.len());

        let birth_dates = join_all(orders.iter().map(|order| async move {
            match &order.customer_id {
                Some(id) if !id.is_null() => self.birth_date(id).await,
                _ => None,
            }
        }))
        .await;

        let order_numbers: Vec<String> = orders.iter().map(|o| o.order_number.clone()).collect();
        let sent = self.sent_orders(&order_numbers).await;

        Ok(orders
            .into_iter()
            .zip(birth_dates)
            .map(|(order, birth_date)| to_record(order, birth_date, &sent))
            .collect())
    }

    async fn update_report_status(
        &self,
        order_number: &str,
        status: ReportStatus,
    ) -> Result<(), StoreError> {
        let params = json!({
            "p_order_number": order_number,
            "p_status": status.as_str(),
        });
        execute(self.public.rpc(STATUS_RPC, params.to_string())).await?;
        log::info!("Report status for {} set to {}", order_number, status.as_str());
        Ok(())
    }

    async fn log_generation(
        &self,
        student: &Student,
        content_length: usize,
    ) -> Result<(), StoreError> {
        let row = generation_log_row(student, content_length, chrono::Utc::now());
        execute(self.public.from(REPORT_LOG_TABLE).insert(row.to_string())).await?;
        log::info!("Logged report generation for {}", student.order_number);
        Ok(())
    }
}

/// Send the request and return the body of a 2xx response.
async fn execute(query: Builder) -> Result<String, StoreError> {
    let response = query.execute().await.map_err(StoreError::request)?;
    let status = response.status();
    let body = response.text().await.map_err(StoreError::request)?;

    if !status.is_success() {
        return Err(StoreError::Status {
            status: status.as_u16(),
            body,
        });
    }
    Ok(body)
}

async fn fetch<T: DeserializeOwned>(query: Builder) -> Result<T, StoreError> {
    let body = execute(query).await?;
    Ok(serde_json::from_str(&body)?)
}

/// PostgREST filter value for an id column that may be numeric or text.
fn value_as_key(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

pub(crate) fn to_record(
    order: PaymentOrderRow,
    birth_date: Option<String>,
    sent: &HashSet<String>,
) -> StudentRecord {
    let report_status = if sent.contains(&order.order_number) {
        ReportStatus::Sent
    } else {
        ReportStatus::Pending
    };

    StudentRecord {
        id: order.id,
        name: order.buyer_name.unwrap_or_default(),
        email: order.buyer_email.unwrap_or_default(),
        amount: order.amount.unwrap_or_default(),
        plan: order.plan_type.unwrap_or_default(),
        birth_date,
        created_at: order.created_at,
        report_status,
        order_number: order.order_number,
    }
}

pub(crate) fn generation_log_row(
    student: &Student,
    content_length: usize,
    generated_at: chrono::DateTime<chrono::Utc>,
) -> Value {
    json!({
        "order_number": student.order_number,
        "student_name": student.name,
        "student_email": student.email,
        "plan_type": student.plan,
        "report_content_length": content_length,
        "generated_at": generated_at.to_rfc3339(),
        "status": "completed",
    })
}
