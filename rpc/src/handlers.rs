//! RPC request handlers.

use crate::{RpcError, RpcState};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::Json;
use campaign_enrollment::{Intent, Invocation, Outcome};
use campaign_types::EnrollmentRecord;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Deserialize)]
pub struct AddressQuery {
    pub address: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct VerifyTaskRequest {
    pub address: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TaskResponse {
    pub address: String,
    pub code: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyTaskResponse {
    pub address: String,
    pub reward: u64,
    pub balance: u64,
}

fn required(address: Option<String>) -> Result<String, RpcError> {
    address
        .map(|a| a.trim().to_string())
        .filter(|a| !a.is_empty())
        .ok_or(RpcError::MissingParameter("address"))
}

fn unexpected(outcome: Outcome) -> RpcError {
    RpcError::Server(format!("unexpected workflow outcome: {outcome:?}"))
}

/// `GET /get-subscription?address=`
pub async fn get_subscription(
    State(state): State<Arc<RpcState>>,
    query: Result<Query<AddressQuery>, QueryRejection>,
) -> Result<Json<EnrollmentRecord>, RpcError> {
    let Query(query) = query?;
    let address = required(query.address)?;
    debug!(address, "subscription lookup");
    state
        .workflow
        .record_by_address(&address)
        .await
        .map(Json)
        .ok_or(RpcError::SubscriptionNotFound)
}

/// `GET /task?address=`
pub async fn issue_task(
    State(state): State<Arc<RpcState>>,
    query: Result<Query<AddressQuery>, QueryRejection>,
) -> Result<Json<TaskResponse>, RpcError> {
    let Query(query) = query?;
    let address = required(query.address)?;
    let invocation = Invocation::by_address(address.clone());
    match state.workflow.execute(&invocation, Intent::Task).await? {
        Outcome::TaskIssued { code } => Ok(Json(TaskResponse { address, code })),
        other => Err(unexpected(other)),
    }
}

/// `POST /verifytask {"address": "..."}`
pub async fn verify_task(
    State(state): State<Arc<RpcState>>,
    body: Result<Json<VerifyTaskRequest>, JsonRejection>,
) -> Result<Json<VerifyTaskResponse>, RpcError> {
    let Json(body) = body?;
    let address = required(body.address)?;
    let invocation = Invocation::by_address(address.clone());
    match state.workflow.execute(&invocation, Intent::VerifyTask).await? {
        Outcome::TaskRewarded { reward, balance } => Ok(Json(VerifyTaskResponse {
            address,
            reward,
            balance,
        })),
        other => Err(unexpected(other)),
    }
}
