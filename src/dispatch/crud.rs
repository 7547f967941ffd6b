//! CRUD Dispatch
//!
//! Thin orchestration over the store capability: operation routing, input
//! validation, and the cache population policy (which results may be cached).
//!
//! Writes deliberately never touch the cache, so List/Get entries written
//! before a mutation stay visible until their TTL lapses. The configured TTL
//! is the maximum staleness bound.

use std::sync::Arc;

use async_trait::async_trait;

use crate::db::UserStore;
use crate::dispatch::{Dispatch, DispatchReply, DispatchRequest, Operation};
use crate::error::{ApiError, Result};
use crate::models::UserPayload;

// == CRUD Dispatch ==
/// The innermost dispatch unit; everything else wraps this.
pub struct CrudDispatch {
    /// The backing store capability
    store: Arc<dyn UserStore>,
}

impl CrudDispatch {
    /// Creates a dispatcher over the given store.
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    async fn list(&self) -> Result<DispatchReply> {
        let users = self.store.list().await?;
        // Whole-collection result under one key; an empty store yields []
        DispatchReply::json(&users, true)
    }

    async fn create(&self, payload: UserPayload) -> Result<DispatchReply> {
        validate(&payload)?;
        let user = self.store.insert(&payload.name).await?;
        DispatchReply::json(&user, false)
    }

    async fn get(&self, raw_id: &str) -> Result<DispatchReply> {
        let id = parse_id(raw_id)?;
        match self.store.fetch(id).await? {
            Some(user) => DispatchReply::json(&user, true),
            None => Err(ApiError::NotFound(format!("user {id}"))),
        }
    }

    async fn update(&self, raw_id: &str, payload: UserPayload) -> Result<DispatchReply> {
        let id = parse_id(raw_id)?;
        validate(&payload)?;
        match self.store.update(id, &payload.name).await? {
            Some(user) => DispatchReply::json(&user, false),
            None => Err(ApiError::NotFound(format!("user {id}"))),
        }
    }

    async fn delete(&self, raw_id: &str) -> Result<DispatchReply> {
        let id = parse_id(raw_id)?;
        if self.store.delete(id).await? {
            Ok(DispatchReply::no_content())
        } else {
            Err(ApiError::NotFound(format!("user {id}")))
        }
    }
}

#[async_trait]
impl Dispatch for CrudDispatch {
    async fn call(&self, req: DispatchRequest) -> Result<DispatchReply> {
        match req.op {
            Operation::List => self.list().await,
            Operation::Create { payload } => self.create(payload).await,
            Operation::Get { id } => self.get(&id).await,
            Operation::Update { id, payload } => self.update(&id, payload).await,
            Operation::Delete { id } => self.delete(&id).await,
        }
    }
}

// == Input Parsing ==
/// Parses a path identifier as a non-negative integer.
///
/// Failure is a client error, distinct from not-found.
fn parse_id(raw: &str) -> Result<i64> {
    let id: i64 = raw
        .parse()
        .map_err(|_| ApiError::InvalidInput(format!("invalid user id '{raw}'")))?;
    if id < 0 {
        return Err(ApiError::InvalidInput(format!("invalid user id '{raw}'")));
    }
    Ok(id)
}

fn validate(payload: &UserPayload) -> Result<()> {
    match payload.validate() {
        Some(message) => Err(ApiError::InvalidInput(message)),
        None => Ok(()),
    }
}
