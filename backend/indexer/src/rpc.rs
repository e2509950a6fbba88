//! Soroban RPC client — polls `getEvents` and decodes escrow contract events.
//!
//! Events are requested with `xdrFormat: "json"` so topics and payloads arrive
//! as ScVal JSON (`{"symbol":"contrib"}`, `{"u64":"3"}`, `{"map":[...]}`)
//! instead of base64 XDR.
//!
//! ## Resilience
//!
//! * Exponential back-off is applied when the RPC returns an error or rate-limit
//!   response, up to [`MAX_BACKOFF_SECS`] seconds.
//! * Transient network errors (connection reset, timeout) are retried silently.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::errors::{IndexerError, Result};
use crate::events::{EscrowEvent, EventKind};

const MAX_BACKOFF_SECS: u64 = 60;
const INITIAL_BACKOFF_SECS: u64 = 2;

// ─────────────────────────────────────────────────────────
// JSON-RPC response shapes
// ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RpcResponse {
    pub result: Option<EventsResult>,
    pub error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct EventsResult {
    pub events: Vec<RawEvent>,
    pub cursor: Option<String>,
    #[serde(rename = "latestLedger")]
    pub latest_ledger: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
#[allow(dead_code)]
pub struct RawEvent {
    /// ScVal JSON topic list
    #[serde(rename = "topicJson", default)]
    pub topic: Vec<Value>,
    /// ScVal JSON event payload
    #[serde(rename = "valueJson", default)]
    pub value: Value,
    #[serde(rename = "contractId")]
    pub contract_id: Option<String>,
    #[serde(rename = "txHash")]
    pub tx_hash: Option<String>,
    pub id: Option<String>,
    pub ledger: Option<u64>,
    #[serde(rename = "ledgerClosedAt")]
    pub ledger_closed_at: Option<String>,
    #[serde(rename = "inSuccessfulContractCall")]
    pub in_successful_contract_call: Option<bool>,
    #[serde(rename = "pagingToken")]
    pub paging_token: Option<String>,
}

// ─────────────────────────────────────────────────────────
// Public API
// ─────────────────────────────────────────────────────────

/// Fetch a page of events from the RPC.
///
/// * `start_ledger` — the ledger sequence to scan from (inclusive).
/// * `cursor`       — optional opaque pagination cursor from a previous response.
/// * `limit`        — maximum number of events to return.
///
/// Returns `(events, next_cursor, latest_ledger)`.
pub async fn fetch_events(
    client: &Client,
    rpc_url: &str,
    contract_id: &str,
    start_ledger: u32,
    cursor: Option<&str>,
    limit: u32,
) -> Result<(Vec<RawEvent>, Option<String>, Option<u64>)> {
    let mut backoff = INITIAL_BACKOFF_SECS;
    let request = json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "getEvents",
        "params": build_params(contract_id, start_ledger, cursor, limit),
    });

    loop {
        let resp = match client.post(rpc_url).json(&request).send().await {
            Ok(resp) => resp,
            Err(e) => {
                warn!("RPC request failed (will retry in {backoff}s): {e}");
                backoff = wait(backoff).await;
                continue;
            }
        };

        if resp.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            warn!("Rate-limited by RPC (will retry in {backoff}s)");
            backoff = wait(backoff).await;
            continue;
        }

        let body: RpcResponse = resp.json().await?;

        if let Some(err) = body.error {
            // Invalid request / unknown method will not heal by retrying.
            if err.code == -32600 || err.code == -32601 {
                return Err(IndexerError::EventParse(format!(
                    "RPC hard error {}: {}",
                    err.code, err.message
                )));
            }
            warn!(
                "RPC soft error (will retry in {backoff}s): {} {}",
                err.code, err.message
            );
            backoff = wait(backoff).await;
            continue;
        }

        let result = body
            .result
            .ok_or_else(|| IndexerError::EventParse("Empty result from getEvents".to_string()))?;

        debug!(
            "Fetched {} events (latest_ledger={:?})",
            result.events.len(),
            result.latest_ledger
        );

        return Ok((result.events, result.cursor, result.latest_ledger));
    }
}

/// Sleep for `backoff` seconds and return the next back-off value.
async fn wait(backoff: u64) -> u64 {
    tokio::time::sleep(Duration::from_secs(backoff)).await;
    (backoff * 2).min(MAX_BACKOFF_SECS)
}

fn build_params(contract_id: &str, start_ledger: u32, cursor: Option<&str>, limit: u32) -> Value {
    let mut params = json!({
        "filters": [
            {
                "type": "contract",
                "contractIds": [contract_id]
            }
        ],
        "pagination": {
            "limit": limit
        },
        "xdrFormat": "json"
    });

    if let Some(cur) = cursor {
        params["pagination"]["cursor"] = json!(cur);
    } else {
        params["startLedger"] = json!(start_ledger);
    }

    params
}

// ─────────────────────────────────────────────────────────
// Event decoding
// ─────────────────────────────────────────────────────────

/// Decode a list of raw RPC events into [`EscrowEvent`] structs.
///
/// Events from failed contract calls are dropped: the ledger rolled them back.
pub fn decode_events(raw: &[RawEvent], contract_id: &str) -> Vec<EscrowEvent> {
    raw.iter()
        .filter(|e| e.in_successful_contract_call != Some(false))
        .filter_map(|e| decode_single(e, contract_id))
        .collect()
}

fn decode_single(raw: &RawEvent, contract_id: &str) -> Option<EscrowEvent> {
    let kind = EventKind::from_topic(&symbol_of(raw.topic.first()?)?);

    let timestamp = raw
        .ledger_closed_at
        .as_deref()
        .and_then(parse_iso_to_unix)
        .unwrap_or(0);

    let campaign_id = raw.topic.get(1).and_then(scalar_to_string);
    let (actor, amount) = decode_payload(&raw.value, kind);

    let ledger = raw.ledger.unwrap_or(0) as i64;
    let event_id = event_key(raw, ledger, kind, campaign_id.as_deref(), actor.as_deref());

    Some(EscrowEvent {
        event_id,
        event_type: kind.as_str().to_string(),
        campaign_id,
        actor,
        amount,
        ledger,
        timestamp,
        contract_id: raw
            .contract_id
            .clone()
            .unwrap_or_else(|| contract_id.to_string()),
        tx_hash: raw.tx_hash.clone(),
    })
}

/// Identity of an event across polls: the RPC's own event id when present,
/// else the paging token, else the decoded fields with gaps rendered empty.
fn event_key(
    raw: &RawEvent,
    ledger: i64,
    kind: EventKind,
    campaign_id: Option<&str>,
    actor: Option<&str>,
) -> String {
    if let Some(id) = raw.id.as_ref().or(raw.paging_token.as_ref()) {
        return id.clone();
    }
    format!(
        "{ledger}:{}:{}:{}:{}",
        raw.tx_hash.as_deref().unwrap_or(""),
        kind.as_str(),
        campaign_id.unwrap_or(""),
        actor.unwrap_or("")
    )
}

/// Pick the actor address and the amount out of the payload struct.
fn decode_payload(value: &Value, kind: EventKind) -> (Option<String>, Option<String>) {
    let (actor_key, amount_key) = match kind {
        EventKind::CampaignCreated => (Some("creator"), Some("goal")),
        EventKind::Contributed => (Some("contributor"), Some("amount")),
        EventKind::GoalReached => (None, Some("raised")),
        EventKind::ProofSubmitted => (Some("creator"), None),
        EventKind::ProofVerified => (None, None),
        EventKind::FundsWithdrawn => (Some("creator"), Some("amount")),
        EventKind::CampaignFailed => (None, Some("raised")),
        EventKind::RefundIssued => (Some("contributor"), Some("amount")),
        EventKind::Unknown => (None, None),
    };
    let field = |key: Option<&str>| key.and_then(|k| map_field(value, k)).and_then(scalar_to_string);
    (field(actor_key), field(amount_key))
}

/// Look up `key` in an ScMap encoded as `{"map":[{"key":{"symbol":k},"val":v}, ...]}`.
/// Plain JSON objects are accepted too.
fn map_field<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    if let Some(entries) = value.get("map").and_then(Value::as_array) {
        return entries
            .iter()
            .find(|entry| entry.get("key").and_then(symbol_value) == Some(key))
            .and_then(|entry| entry.get("val"));
    }
    value.get(key)
}

fn symbol_value(v: &Value) -> Option<&str> {
    v.get("symbol").and_then(Value::as_str)
}

/// Extract the symbol of a topic entry; bare strings are taken as-is.
fn symbol_of(topic: &Value) -> Option<String> {
    match topic {
        Value::String(s) => Some(s.clone()),
        other => symbol_value(other).map(String::from),
    }
}

/// Render a scalar ScVal (`u64`, `i128`, `address`, `string`, `bool`, ...) as text.
fn scalar_to_string(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Object(map) => {
            let (tag, inner) = map.iter().next()?;
            match (tag.as_str(), inner) {
                ("i128" | "u128", Value::Object(parts)) => i128_from_parts(parts),
                _ => scalar_to_string(inner),
            }
        }
        _ => None,
    }
}

/// Older XDR-JSON renders 128-bit integers as `{"hi": .., "lo": ..}`.
fn i128_from_parts(parts: &serde_json::Map<String, Value>) -> Option<String> {
    let hi = parts.get("hi")?.as_i64()?;
    let lo = parts.get("lo")?.as_u64()?;
    Some((((hi as i128) << 64) | lo as i128).to_string())
}

/// Parse an ISO-8601 timestamp string into a Unix epoch (seconds).
fn parse_iso_to_unix(s: &str) -> Option<i64> {
    chrono::DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.timestamp())
}

// ─────────────────────────────────────────────────────────
// Unit tests
// ─────────────────────────────────────────────────────────
