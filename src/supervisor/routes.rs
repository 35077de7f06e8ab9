use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::client::Ack;
use crate::config::{Endpoints, JobConfig, SupervisorConfig, HEALTH_PATH};
use crate::status::StatusSnapshot;

use super::browser::BrowserLauncher;
use super::error::SupervisorError;
use super::slot::{LogLimits, ProcessSlot};

/// Shared state behind every route.
#[derive(Clone)]
pub struct SupervisorContext {
    slot: ProcessSlot,
    scraper: Arc<JobConfig>,
    export: Arc<JobConfig>,
    browser: Arc<BrowserLauncher>,
}

impl SupervisorContext {
    pub fn from_config(config: &SupervisorConfig) -> Self {
        Self {
            slot: ProcessSlot::new(LogLimits::from(config)),
            scraper: Arc::new(config.scraper.clone()),
            export: Arc::new(config.export.clone()),
            browser: Arc::new(BrowserLauncher::from_config(&config.browser)),
        }
    }

    pub fn slot(&self) -> ProcessSlot {
        self.slot.clone()
    }
}

pub fn build_router(context: SupervisorContext, endpoints: &Endpoints) -> Router {
    Router::new()
        .route(HEALTH_PATH, get(health))
        .route(&endpoints.status, get(status))
        .route(&endpoints.start, post(run_scraper))
        .route(&endpoints.export, post(run_export))
        .route(&endpoints.enter, post(send_enter))
        .route(&endpoints.toggle_scroll, post(toggle_scroll))
        .route(&endpoints.stop, post(stop))
        .route(&endpoints.open_browser, post(open_browser))
        .with_state(context)
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "scrape-console",
    }))
}

async fn status(State(context): State<SupervisorContext>) -> Json<StatusSnapshot> {
    Json(context.slot.snapshot())
}

async fn run_scraper(
    State(context): State<SupervisorContext>,
) -> Result<Json<Ack>, SupervisorError> {
    context.slot.launch(&context.scraper).await?;
    Ok(Json(Ack::ok()))
}

async fn run_export(
    State(context): State<SupervisorContext>,
) -> Result<Json<Ack>, SupervisorError> {
    context.slot.launch(&context.export).await?;
    Ok(Json(Ack::ok()))
}

async fn send_enter(
    State(context): State<SupervisorContext>,
) -> Result<Json<Ack>, SupervisorError> {
    context.slot.send_enter().await?;
    Ok(Json(Ack::ok_with("Enter sent")))
}

async fn toggle_scroll(
    State(context): State<SupervisorContext>,
) -> Result<Json<Ack>, SupervisorError> {
    let active = context.slot.toggle_auto_scroll().await?;
    Ok(Json(Ack {
        ok: true,
        active: Some(active),
        msg: None,
    }))
}

async fn stop(State(context): State<SupervisorContext>) -> Result<Json<Ack>, SupervisorError> {
    context.slot.stop()?;
    Ok(Json(Ack::ok()))
}

async fn open_browser(
    State(context): State<SupervisorContext>,
) -> Result<Json<Ack>, SupervisorError> {
    let path = context.browser.launch()?;
    context.slot.push_log(format!(
        "[BROWSER] Opened {}. Log in manually.",
        path.display()
    ));
    Ok(Json(Ack::ok_with("Browser opened")))
}
