//! Shared application state.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::layout::LayoutEngine;
use crate::notifier::{DeliveryNotifier, WebhookNotifier};
use crate::store::{ReportStore, SupabaseReportStore};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ReportStore>,
    pub notifier: Arc<dyn DeliveryNotifier>,
    pub engine: LayoutEngine,
}

impl AppState {
    pub fn new_with_config(config: &AppConfig) -> anyhow::Result<Self> {
        let http_client = WebhookNotifier::build_client()?;
        let store = Arc::new(SupabaseReportStore::new(config.supabase.clone()));
        let notifier = Arc::new(WebhookNotifier::new(config.webhook.clone(), http_client));

        log::info!(
            "Report store at {} (schema {}), webhook at {}",
            config.supabase.supabase_url,
            config.supabase.schema,
            notifier.url()
        );

        Ok(Self::new_with_services(store, notifier))
    }

    pub fn new_with_services(
        store: Arc<dyn ReportStore>,
        notifier: Arc<dyn DeliveryNotifier>,
    ) -> Self {
        Self {
            store,
            notifier,
            engine: LayoutEngine::default(),
        }
    }
}
