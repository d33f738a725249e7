// crates/caremesh-rpc/src/handlers/credits.rs

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use caremesh_credits::CreditLedger;

use crate::handlers::care::CreditEventView;

/// How many events the dashboard's recent view carries.
const RECENT_EVENTS: usize = 5;

/// Request for the credits dashboard. No parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct CreditsDashboardRequest {}

/// The credits dashboard: per-participant totals and the most recent
/// events, newest first.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditsDashboardResponse {
    pub credits_by_participant: HashMap<String, u64>,
    pub recent_events: Vec<CreditEventView>,
}

/// Handle a credits dashboard query.
pub async fn handle_dashboard(
    ledger: &CreditLedger,
    _request: CreditsDashboardRequest,
) -> Result<CreditsDashboardResponse, String> {
    let credits_by_participant = ledger.totals().await.map_err(|e| e.to_string())?;
    let recent = ledger
        .recent_events(RECENT_EVENTS)
        .await
        .map_err(|e| e.to_string())?;
    Ok(CreditsDashboardResponse {
        credits_by_participant,
        recent_events: recent.iter().map(CreditEventView::from).collect(),
    })
}
