//! # REST API
//!
//! Builds the axum router that exposes the ledger node's HTTP interface.
//! All endpoints share application state through axum's `State` extractor.
//!
//! ## Endpoints
//!
//! | Method | Path                      | Description                       |
//! |--------|---------------------------|-----------------------------------|
//! | GET    | `/health`                 | Liveness probe                    |
//! | GET    | `/status`                 | Node and ledger status summary    |
//! | POST   | `/stakes`                 | Create a stake                    |
//! | POST   | `/stakes/:id/close`       | Close a matured stake             |
//! | POST   | `/stakes/:id/claim`       | Claim accrued rewards             |
//! | GET    | `/accounts/:account/stakes/:id` | Stake snapshot              |
//! | GET    | `/accounts/:account/total`| Account's active staked total     |
//! | GET    | `/totals`                 | Global staked total               |
//! | GET    | `/leaderboard`            | Top scoring accounts              |
//! | POST   | `/governance/rate`        | Set the yield rate (admin)        |
//! | POST   | `/governance/min-stake`   | Set the minimum stake (admin)     |
//! | POST   | `/governance/max-stake`   | Set the maximum stake (admin)     |
//! | POST   | `/governance/paused`      | Pause or resume admission (admin) |
//!
//! Caller identity rides in the request body as an `account`/`caller`
//! field; authenticating that identity is the deployment environment's
//! job, upstream of this service.
//!
//! ## Error mapping
//!
//! [`LedgerError`] categories map onto HTTP status classes: validation
//! failures are 400, authorization failures 403, lifecycle conflicts 409
//! (with missing stakes as 404), and invariant violations 500.

use axum::{
    extract::{Path, State},
    http::{Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use haven_collab::scoring::ScoreBoard;
use haven_ledger::{Account, ErrorCategory, LedgerError, StakeId, StakeView, StakingLedger};

use crate::metrics::SharedMetrics;

// ---------------------------------------------------------------------------
// Application State
// ---------------------------------------------------------------------------

/// Shared application state available to all request handlers.
///
/// Cheap to clone — everything behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// The node's reported version string.
    pub version: String,
    /// The custody ledger.
    pub ledger: Arc<StakingLedger>,
    /// The scoring collaborator, also wired into the ledger as its sink.
    pub board: Arc<ScoreBoard>,
    /// Reference to Prometheus metrics for in-handler recording.
    pub metrics: SharedMetrics,
    /// When this node process started.
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Resynchronizes the staked-total gauges from the ledger. Called
    /// after every mutation so the gauges never drift from the book.
    fn sync_gauges(&self) {
        self.metrics
            .total_staked
            .set(self.ledger.total_staked_global() as i64);
        self.metrics
            .active_stakes
            .set(self.ledger.active_stakes() as i64);
    }
}

// ---------------------------------------------------------------------------
// Router Construction
// ---------------------------------------------------------------------------

/// Builds the full axum [`Router`] with all API routes, CORS, and tracing.
///
/// The returned router is ready to be served on the configured API port.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route("/status", get(status_handler))
        .route("/stakes", post(create_stake_handler))
        .route("/stakes/:id/close", post(close_stake_handler))
        .route("/stakes/:id/claim", post(claim_rewards_handler))
        .route("/accounts/:account/stakes/:id", get(stake_handler))
        .route("/accounts/:account/total", get(account_total_handler))
        .route("/totals", get(totals_handler))
        .route("/leaderboard", get(leaderboard_handler))
        .route("/governance/rate", post(set_rate_handler))
        .route("/governance/min-stake", post(set_min_stake_handler))
        .route("/governance/max-stake", post(set_max_stake_handler))
        .route("/governance/paused", post(set_paused_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Request / Response Types
// ---------------------------------------------------------------------------

/// Request body for `POST /stakes`.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateStakeRequest {
    /// The staking account.
    pub account: Account,
    /// Principal to lock.
    pub amount: u64,
    /// Lock duration in days.
    pub duration_days: u32,
}

/// Response payload for `POST /stakes`.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateStakeResponse {
    /// Id of the newly admitted stake.
    pub stake_id: StakeId,
}

/// Request body for close and claim: the acting account.
#[derive(Debug, Serialize, Deserialize)]
pub struct CallerRequest {
    /// The account performing the operation.
    pub account: Account,
}

/// Response payload for `POST /stakes/:id/close`.
#[derive(Debug, Serialize, Deserialize)]
pub struct CloseStakeResponse {
    /// Principal returned to the account.
    pub principal: u64,
    /// Final reward delta paid at close.
    pub rewards: u64,
}

/// Response payload for `POST /stakes/:id/claim`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ClaimResponse {
    /// Reward delta paid by this claim (possibly zero).
    pub rewards: u64,
}

/// Response payload for `GET /accounts/:account/total`.
#[derive(Debug, Serialize, Deserialize)]
pub struct AccountTotalResponse {
    /// The queried account.
    pub account: Account,
    /// Sum of its active principals.
    pub total_staked: u64,
}

/// Response payload for `GET /totals`.
#[derive(Debug, Serialize, Deserialize)]
pub struct TotalsResponse {
    /// Sum of active principals across all accounts.
    pub total_staked: u64,
    /// Number of open stakes.
    pub active_stakes: usize,
}

/// Response payload for `GET /status`.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Node software version.
    pub version: String,
    /// Current yield rate in basis points.
    pub rate_bps: u32,
    /// Minimum admissible principal.
    pub min_stake: u64,
    /// Maximum admissible principal.
    pub max_stake: u64,
    /// Whether new admissions are paused.
    pub paused: bool,
    /// Sum of active principals across all accounts.
    pub total_staked: u64,
    /// Seconds since the node started.
    pub uptime_secs: u64,
    /// ISO-8601 timestamp of the response.
    pub timestamp: String,
}

/// One row of `GET /leaderboard`.
#[derive(Debug, Serialize, Deserialize)]
pub struct LeaderboardRow {
    /// The ranked account.
    pub account: Account,
    /// Its current score.
    pub score: u64,
}

/// Request body for `POST /governance/rate`.
#[derive(Debug, Serialize, Deserialize)]
pub struct SetRateRequest {
    /// The calling identity; must be the administrator.
    pub caller: Account,
    /// The new yield rate in basis points.
    pub rate_bps: u32,
}

/// Request body for `POST /governance/min-stake` and `.../max-stake`.
#[derive(Debug, Serialize, Deserialize)]
pub struct SetBoundRequest {
    /// The calling identity; must be the administrator.
    pub caller: Account,
    /// The new bound value.
    pub value: u64,
}

/// Request body for `POST /governance/paused`.
#[derive(Debug, Serialize, Deserialize)]
pub struct SetPausedRequest {
    /// The calling identity; must be the administrator.
    pub caller: Account,
    /// Whether admission should be paused.
    pub paused: bool,
}

/// Generic error body returned by all endpoints on failure.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error description.
    pub error: String,
}

/// Maps a ledger error to its HTTP response.
fn error_response(err: LedgerError) -> (StatusCode, Json<ErrorResponse>) {
    let status = match (&err, err.category()) {
        (LedgerError::NotFound { .. }, _) => StatusCode::NOT_FOUND,
        (_, ErrorCategory::Validation) => StatusCode::BAD_REQUEST,
        (_, ErrorCategory::Authorization) => StatusCode::FORBIDDEN,
        (_, ErrorCategory::Lifecycle) => StatusCode::CONFLICT,
        (_, ErrorCategory::Invariant) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status == StatusCode::INTERNAL_SERVER_ERROR {
        tracing::error!(error = %err, "ledger invariant violation surfaced to API");
    }
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// `GET /health` — returns 200 if the node is alive.
///
/// This is the liveness probe for orchestrators (k8s, systemd, etc.).
/// It intentionally does not check internal subsystem health — that
/// belongs in `/status`.
async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({ "status": "ok" })))
}

/// `GET /status` — node and ledger status summary.
async fn status_handler(State(state): State<AppState>) -> impl IntoResponse {
    let params = state.ledger.params();
    let resp = StatusResponse {
        version: state.version.clone(),
        rate_bps: params.rate_bps,
        min_stake: params.min_stake,
        max_stake: params.max_stake,
        paused: params.paused,
        total_staked: state.ledger.total_staked_global(),
        uptime_secs: (Utc::now() - state.started_at).num_seconds().max(0) as u64,
        timestamp: Utc::now().to_rfc3339(),
    };
    Json(resp)
}

/// `POST /stakes` — admits a new stake.
async fn create_stake_handler(
    State(state): State<AppState>,
    Json(req): Json<CreateStakeRequest>,
) -> impl IntoResponse {
    let timer = state.metrics.operation_latency_seconds.start_timer();
    let result = state
        .ledger
        .create(&req.account, req.amount, req.duration_days);
    timer.observe_duration();

    match result {
        Ok(stake_id) => {
            state.metrics.stakes_created_total.inc();
            state.sync_gauges();
            (StatusCode::CREATED, Json(CreateStakeResponse { stake_id })).into_response()
        }
        Err(err) => error_response(err).into_response(),
    }
}

/// `POST /stakes/:id/close` — closes a matured stake.
async fn close_stake_handler(
    State(state): State<AppState>,
    Path(stake_id): Path<StakeId>,
    Json(req): Json<CallerRequest>,
) -> impl IntoResponse {
    let timer = state.metrics.operation_latency_seconds.start_timer();
    let result = state.ledger.close(&req.account, stake_id);
    timer.observe_duration();

    match result {
        Ok((principal, rewards)) => {
            state.metrics.stakes_closed_total.inc();
            state.metrics.reward_claims_total.inc();
            state.metrics.rewards_paid_total.inc_by(rewards);
            state.sync_gauges();
            Json(CloseStakeResponse { principal, rewards }).into_response()
        }
        Err(err) => error_response(err).into_response(),
    }
}

/// `POST /stakes/:id/claim` — claims accrued rewards without closing.
async fn claim_rewards_handler(
    State(state): State<AppState>,
    Path(stake_id): Path<StakeId>,
    Json(req): Json<CallerRequest>,
) -> impl IntoResponse {
    let timer = state.metrics.operation_latency_seconds.start_timer();
    let result = state.ledger.claim_partial(&req.account, stake_id);
    timer.observe_duration();

    match result {
        Ok(rewards) => {
            state.metrics.reward_claims_total.inc();
            state.metrics.rewards_paid_total.inc_by(rewards);
            Json(ClaimResponse { rewards }).into_response()
        }
        Err(err) => error_response(err).into_response(),
    }
}

/// `GET /accounts/:account/stakes/:id` — stake snapshot, owner-gated.
async fn stake_handler(
    State(state): State<AppState>,
    Path((account, stake_id)): Path<(String, StakeId)>,
) -> impl IntoResponse {
    match state.ledger.stake(&Account::new(account), stake_id) {
        Ok(view) => Json::<StakeView>(view).into_response(),
        Err(err) => error_response(err).into_response(),
    }
}

/// `GET /accounts/:account/total` — the account's active staked total.
///
/// Accounts that never staked read as zero; this endpoint does not leak
/// whether an account exists.
async fn account_total_handler(
    State(state): State<AppState>,
    Path(account): Path<String>,
) -> impl IntoResponse {
    let account = Account::new(account);
    let total_staked = state.ledger.total_staked(&account);
    Json(AccountTotalResponse {
        account,
        total_staked,
    })
}

/// `GET /totals` — global staked totals.
async fn totals_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(TotalsResponse {
        total_staked: state.ledger.total_staked_global(),
        active_stakes: state.ledger.active_stakes(),
    })
}

/// `GET /leaderboard` — top scoring accounts, best first.
async fn leaderboard_handler(State(state): State<AppState>) -> impl IntoResponse {
    let rows: Vec<LeaderboardRow> = state
        .board
        .top(10)
        .into_iter()
        .map(|e| LeaderboardRow {
            account: e.account,
            score: e.score,
        })
        .collect();
    Json(rows)
}

/// `POST /governance/rate` — sets the yield rate for future stakes.
async fn set_rate_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRateRequest>,
) -> impl IntoResponse {
    match state.ledger.set_rate(&req.caller, req.rate_bps) {
        Ok(()) => Json(state.ledger.params()).into_response(),
        Err(err) => error_response(err).into_response(),
    }
}

/// `POST /governance/min-stake` — sets the minimum admissible principal.
async fn set_min_stake_handler(
    State(state): State<AppState>,
    Json(req): Json<SetBoundRequest>,
) -> impl IntoResponse {
    match state.ledger.set_min_stake(&req.caller, req.value) {
        Ok(()) => Json(state.ledger.params()).into_response(),
        Err(err) => error_response(err).into_response(),
    }
}

/// `POST /governance/max-stake` — sets the maximum admissible principal.
async fn set_max_stake_handler(
    State(state): State<AppState>,
    Json(req): Json<SetBoundRequest>,
) -> impl IntoResponse {
    match state.ledger.set_max_stake(&req.caller, req.value) {
        Ok(()) => Json(state.ledger.params()).into_response(),
        Err(err) => error_response(err).into_response(),
    }
}

/// `POST /governance/paused` — pauses or resumes admission.
async fn set_paused_handler(
    State(state): State<AppState>,
    Json(req): Json<SetPausedRequest>,
) -> impl IntoResponse {
    match state.ledger.set_paused(&req.caller, req.paused) {
        Ok(()) => Json(state.ledger.params()).into_response(),
        Err(err) => error_response(err).into_response(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use haven_ledger::LedgerConfig;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    /// Creates a test AppState with a fresh ledger wired to a scoreboard.
    fn test_app_state() -> AppState {
        let board = Arc::new(ScoreBoard::new(10));
        let ledger = StakingLedger::new(
            LedgerConfig {
                admin: Account::new("hvn:admin"),
                rate_bps: 300,
                min_stake: 100,
                max_stake: 1_000_000,
            },
            Arc::clone(&board) as _,
        )
        .expect("valid config");

        AppState {
            version: "0.1.0-test".into(),
            ledger: Arc::new(ledger),
            board,
            metrics: Arc::new(crate::metrics::NodeMetrics::new()),
            started_at: Utc::now(),
        }
    }

    /// Sends a GET request and returns the (status, body_bytes).
    async fn get(router: &Router, path: &str) -> (StatusCode, Vec<u8>) {
        let req = Request::builder().uri(path).body(Body::empty()).unwrap();
        let resp = router.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let body = resp
            .into_body()
            .collect()
            .await
            .unwrap()
            .to_bytes()
            .to_vec();
        (status, body)
    }

    /// Sends a POST request with JSON body and returns (status, body_bytes).
    async fn post_json(
        router: &Router,
        path: &str,
        body: serde_json::Value,
    ) -> (StatusCode, Vec<u8>) {
        let req = Request::builder()
            .method("POST")
            .uri(path)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap();
        let resp = router.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let body = resp
            .into_body()
            .collect()
            .await
            .unwrap()
            .to_bytes()
            .to_vec();
        (status, body)
    }

    /// Creates a stake via the API and returns its id.
    async fn create_stake(router: &Router, account: &str, amount: u64) -> StakeId {
        let (status, body) = post_json(
            router,
            "/stakes",
            serde_json::json!({ "account": account, "amount": amount, "duration_days": 30 }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let resp: CreateStakeResponse = serde_json::from_slice(&body).unwrap();
        resp.stake_id
    }

    // -- 1. Health endpoint ----------------------------------------------------

    #[tokio::test]
    async fn health_endpoint_returns_ok() {
        let router = create_router(test_app_state());
        let (status, body) = get(&router, "/health").await;

        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
    }

    // -- 2. Status reflects governance parameters -------------------------------

    #[tokio::test]
    async fn status_reports_ledger_parameters() {
        let router = create_router(test_app_state());
        let (status, body) = get(&router, "/status").await;

        assert_eq!(status, StatusCode::OK);
        let resp: StatusResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(resp.version, "0.1.0-test");
        assert_eq!(resp.rate_bps, 300);
        assert_eq!(resp.total_staked, 0);
        assert!(!resp.paused);
    }

    // -- 3. Stake creation happy path -------------------------------------------

    #[tokio::test]
    async fn create_stake_returns_id_and_moves_totals() {
        let state = test_app_state();
        let router = create_router(state.clone());

        let id = create_stake(&router, "hvn:alice", 1_000).await;
        assert_eq!(id, 1);

        let (status, body) = get(&router, "/totals").await;
        assert_eq!(status, StatusCode::OK);
        let totals: TotalsResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(totals.total_staked, 1_000);
        assert_eq!(totals.active_stakes, 1);

        // Gauges were synced after the mutation.
        assert_eq!(state.metrics.total_staked.get(), 1_000);
        assert_eq!(state.metrics.stakes_created_total.get(), 1);
    }

    // -- 4. Validation failures are 400 ------------------------------------------

    #[tokio::test]
    async fn out_of_window_amount_is_bad_request() {
        let router = create_router(test_app_state());
        let (status, body) = post_json(
            &router,
            "/stakes",
            serde_json::json!({ "account": "hvn:alice", "amount": 5, "duration_days": 30 }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let err: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert!(err.error.contains("out of range"));
    }

    #[tokio::test]
    async fn out_of_window_duration_is_bad_request() {
        let router = create_router(test_app_state());
        let (status, _) = post_json(
            &router,
            "/stakes",
            serde_json::json!({ "account": "hvn:alice", "amount": 1_000, "duration_days": 7 }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    // -- 5. Lifecycle failures are 409, missing stakes 404 ------------------------

    #[tokio::test]
    async fn close_before_maturity_is_conflict() {
        let router = create_router(test_app_state());
        let id = create_stake(&router, "hvn:alice", 1_000).await;

        let (status, body) = post_json(
            &router,
            &format!("/stakes/{id}/close"),
            serde_json::json!({ "account": "hvn:alice" }),
        )
        .await;

        assert_eq!(status, StatusCode::CONFLICT);
        let err: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert!(err.error.contains("not matured"));
    }

    #[tokio::test]
    async fn unknown_stake_is_not_found() {
        let router = create_router(test_app_state());
        let (status, _) = post_json(
            &router,
            "/stakes/99/close",
            serde_json::json!({ "account": "hvn:alice" }),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = get(&router, "/accounts/hvn:alice/stakes/99").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    // -- 6. Ownership failures are 403 --------------------------------------------

    #[tokio::test]
    async fn foreign_stake_is_forbidden() {
        let router = create_router(test_app_state());
        let id = create_stake(&router, "hvn:alice", 1_000).await;

        let (status, _) = post_json(
            &router,
            &format!("/stakes/{id}/claim"),
            serde_json::json!({ "account": "hvn:bob" }),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = get(&router, &format!("/accounts/hvn:bob/stakes/{id}")).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    // -- 7. Claim right after creation pays zero -----------------------------------

    #[tokio::test]
    async fn immediate_claim_pays_zero() {
        let state = test_app_state();
        let router = create_router(state.clone());
        let id = create_stake(&router, "hvn:alice", 1_000).await;

        let (status, body) = post_json(
            &router,
            &format!("/stakes/{id}/claim"),
            serde_json::json!({ "account": "hvn:alice" }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let resp: ClaimResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(resp.rewards, 0);
        assert_eq!(state.metrics.reward_claims_total.get(), 1);
        assert_eq!(state.metrics.rewards_paid_total.get(), 0);
    }

    // -- 8. Stake snapshot -----------------------------------------------------------

    #[tokio::test]
    async fn stake_snapshot_reports_locked_rate() {
        let router = create_router(test_app_state());
        let id = create_stake(&router, "hvn:alice", 1_000).await;

        let (status, body) = get(&router, &format!("/accounts/hvn:alice/stakes/{id}")).await;
        assert_eq!(status, StatusCode::OK);
        let view: StakeView = serde_json::from_slice(&body).unwrap();
        assert_eq!(view.amount, 1_000);
        assert_eq!(view.rate_bps, 300);
        assert_eq!(view.claimed_rewards, 0);
    }

    // -- 9. Account totals ------------------------------------------------------------

    #[tokio::test]
    async fn account_total_reads_zero_for_strangers() {
        let router = create_router(test_app_state());
        create_stake(&router, "hvn:alice", 1_000).await;

        let (status, body) = get(&router, "/accounts/hvn:alice/total").await;
        assert_eq!(status, StatusCode::OK);
        let resp: AccountTotalResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(resp.total_staked, 1_000);

        let (status, body) = get(&router, "/accounts/hvn:nobody/total").await;
        assert_eq!(status, StatusCode::OK);
        let resp: AccountTotalResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(resp.total_staked, 0);
    }

    // -- 10. Governance over the API ----------------------------------------------------

    #[tokio::test]
    async fn admin_can_set_rate() {
        let router = create_router(test_app_state());
        let (status, _) = post_json(
            &router,
            "/governance/rate",
            serde_json::json!({ "caller": "hvn:admin", "rate_bps": 450 }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (_, body) = get(&router, "/status").await;
        let resp: StatusResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(resp.rate_bps, 450);
    }

    #[tokio::test]
    async fn over_cap_rate_is_bad_request_and_unchanged() {
        let router = create_router(test_app_state());
        let (status, body) = post_json(
            &router,
            "/governance/rate",
            serde_json::json!({ "caller": "hvn:admin", "rate_bps": 6_000 }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let err: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert!(err.error.contains("rate too high"));

        let (_, body) = get(&router, "/status").await;
        let resp: StatusResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(resp.rate_bps, 300);
    }

    #[tokio::test]
    async fn non_admin_governance_is_forbidden() {
        let router = create_router(test_app_state());
        let (status, _) = post_json(
            &router,
            "/governance/paused",
            serde_json::json!({ "caller": "hvn:mallory", "paused": true }),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn pause_blocks_new_stakes_over_the_api() {
        let router = create_router(test_app_state());
        let (status, _) = post_json(
            &router,
            "/governance/paused",
            serde_json::json!({ "caller": "hvn:admin", "paused": true }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = post_json(
            &router,
            "/stakes",
            serde_json::json!({ "account": "hvn:alice", "amount": 1_000, "duration_days": 30 }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let err: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert!(err.error.contains("paused"));
    }

    // -- 11. Leaderboard mirrors staking activity ----------------------------------------

    #[tokio::test]
    async fn leaderboard_mirrors_staked_amounts() {
        let router = create_router(test_app_state());
        create_stake(&router, "hvn:alice", 1_000).await;
        create_stake(&router, "hvn:bob", 5_000).await;

        let (status, body) = get(&router, "/leaderboard").await;
        assert_eq!(status, StatusCode::OK);
        let rows: Vec<LeaderboardRow> = serde_json::from_slice(&body).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].account, Account::new("hvn:bob"));
        assert_eq!(rows[0].score, 5_000);
    }
}
