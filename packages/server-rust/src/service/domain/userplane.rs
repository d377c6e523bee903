//! In-memory userplane collection and its CRUD handlers.
//!
//! All four handlers are bound to the `userplanes` action, one per method,
//! and share a single `UserplaneStore`.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use http::{Method, StatusCode};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use userplane_core::{
    required_param, ErrorCode, HandlerError, Outcome, Params, RequestHandler, Response,
};

use crate::service::dispatcher::RegistryError;
use crate::service::gateway::Gateway;

/// Action name shared by the userplane handlers.
pub const USERPLANES_ACTION: &str = "userplanes";

const CONTENT_TYPE_JSON: (&str, &str) = ("content-type", "application/json");

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// Gateway role served by a userplane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpFunction {
    #[serde(rename = "SGW")]
    Sgw,
    #[serde(rename = "PGW")]
    Pgw,
    #[serde(rename = "SAEGW")]
    Saegw,
}

impl FromStr for UpFunction {
    type Err = HandlerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SGW" => Ok(Self::Sgw),
            "PGW" => Ok(Self::Pgw),
            "SAEGW" => Ok(Self::Saegw),
            other => Err(HandlerError::with_detail(
                ErrorCode::InvalidUerplaneFunction,
                format!("unknown function `{other}`"),
            )),
        }
    }
}

impl fmt::Display for UpFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Sgw => "SGW",
            Self::Pgw => "PGW",
            Self::Saegw => "SAEGW",
        })
    }
}

/// One managed userplane.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Userplane {
    pub id: String,
    pub function: UpFunction,
}

/// Wire shape of a POST body. `function` stays a string so an unknown role
/// is reported as such rather than as a schema error.
#[derive(Debug, Deserialize)]
struct CreateBody {
    id: String,
    function: String,
}

/// Wire shape of a PATCH body. Absent fields are left unchanged.
#[derive(Debug, Deserialize)]
struct PatchBody {
    function: Option<String>,
}

fn parse_body<'de, T: Deserialize<'de>>(raw: &'de str) -> Result<T, HandlerError> {
    serde_json::from_str(raw)
        .map_err(|e| HandlerError::with_detail(ErrorCode::InvalidDataSchema, e.to_string()))
}

fn not_found(id: &str) -> HandlerError {
    HandlerError::with_detail(ErrorCode::UserplaneNotFound, format!("no userplane `{id}`"))
}

fn json_response(status: StatusCode, body: serde_json::Value) -> Result<Outcome, HandlerError> {
    let (name, value) = CONTENT_TYPE_JSON;
    Ok(Outcome::Response(
        Response::try_json(status, body)?.with_header(name, value),
    ))
}

fn record_response(status: StatusCode, up: &Userplane) -> Result<Outcome, HandlerError> {
    let body = serde_json::to_value(up)
        .map_err(|e| HandlerError::with_detail(ErrorCode::InternalSoftwareError, e.to_string()))?;
    json_response(status, body)
}

// ---------------------------------------------------------------------------
// UserplaneStore
// ---------------------------------------------------------------------------

/// Userplanes keyed by id, in id order.
#[derive(Debug, Default)]
pub struct UserplaneStore {
    entries: RwLock<BTreeMap<String, Userplane>>,
}

impl UserplaneStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a new userplane. Returns `false` if the id is taken.
    pub fn insert(&self, up: Userplane) -> bool {
        let mut entries = self.entries.write();
        if entries.contains_key(&up.id) {
            return false;
        }
        entries.insert(up.id.clone(), up);
        true
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<Userplane> {
        self.entries.read().get(id).cloned()
    }

    #[must_use]
    pub fn list(&self) -> Vec<Userplane> {
        self.entries.read().values().cloned().collect()
    }

    /// Applies `f` to the stored record and returns the updated copy.
    pub fn update<F>(&self, id: &str, f: F) -> Option<Userplane>
    where
        F: FnOnce(&mut Userplane),
    {
        let mut entries = self.entries.write();
        let up = entries.get_mut(id)?;
        f(up);
        Some(up.clone())
    }

    pub fn remove(&self, id: &str) -> Option<Userplane> {
        self.entries.write().remove(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST: creates a userplane from the JSON `body` parameter.
pub struct PostUserplanes {
    store: Arc<UserplaneStore>,
}

impl RequestHandler for PostUserplanes {
    fn handle(&self, params: &Params) -> Result<Outcome, HandlerError> {
        let body: CreateBody = parse_body(required_param(params, "body")?)?;
        if body.id.is_empty() {
            return Err(HandlerError::with_detail(
                ErrorCode::InvalidParameter,
                "empty userplane id",
            ));
        }
        let up = Userplane {
            function: body.function.parse()?,
            id: body.id,
        };
        let id = up.id.clone();
        if !self.store.insert(up) {
            return Err(HandlerError::with_detail(
                ErrorCode::InvalidParameter,
                format!("userplane `{id}` already exists"),
            ));
        }
        info!(id = %id, "userplane added");
        Ok(Outcome::Signal(ErrorCode::AddedUserplane))
    }
}

/// GET: one userplane by `id`, or the whole collection without it.
pub struct GetUserplanes {
    store: Arc<UserplaneStore>,
}

impl RequestHandler for GetUserplanes {
    fn handle(&self, params: &Params) -> Result<Outcome, HandlerError> {
        match params.get("id") {
            Some(id) => {
                let up = self.store.get(id).ok_or_else(|| not_found(id))?;
                record_response(StatusCode::OK, &up)
            }
            None => json_response(StatusCode::OK, json!({ "userplanes": self.store.list() })),
        }
    }
}

/// PATCH: updates the userplane named by `id` from the JSON `body`.
pub struct PatchUserplanes {
    store: Arc<UserplaneStore>,
}

impl RequestHandler for PatchUserplanes {
    fn handle(&self, params: &Params) -> Result<Outcome, HandlerError> {
        let id = required_param(params, "id")?;
        let body: PatchBody = parse_body(required_param(params, "body")?)?;
        let function: Option<UpFunction> = body
            .function
            .as_deref()
            .map(str::parse::<UpFunction>)
            .transpose()?;

        let up = self
            .store
            .update(id, |up| {
                if let Some(function) = function {
                    up.function = function;
                }
            })
            .ok_or_else(|| not_found(id))?;
        info!(id, function = %up.function, "userplane patched");
        record_response(StatusCode::OK, &up)
    }
}

/// DELETE: removes the userplane named by `id`.
pub struct DeleteUserplanes {
    store: Arc<UserplaneStore>,
}

impl RequestHandler for DeleteUserplanes {
    fn handle(&self, params: &Params) -> Result<Outcome, HandlerError> {
        let id = required_param(params, "id")?;
        self.store.remove(id).ok_or_else(|| not_found(id))?;
        info!(id, "userplane deleted");
        json_response(StatusCode::NO_CONTENT, json!({}))
    }
}

/// Binds the four userplane handlers to `gateway`, all sharing `store`.
///
/// # Errors
///
/// Returns `RegistryError` if any of the method/action pairs is already bound.
pub fn register_userplane_handlers(
    gateway: &mut Gateway,
    store: &Arc<UserplaneStore>,
) -> Result<(), RegistryError> {
    gateway.register_handler(
        Method::POST,
        USERPLANES_ACTION,
        PostUserplanes {
            store: Arc::clone(store),
        },
    )?;
    gateway.register_handler(
        Method::GET,
        USERPLANES_ACTION,
        GetUserplanes {
            store: Arc::clone(store),
        },
    )?;
    gateway.register_handler(
        Method::PATCH,
        USERPLANES_ACTION,
        PatchUserplanes {
            store: Arc::clone(store),
        },
    )?;
    gateway.register_handler(
        Method::DELETE,
        USERPLANES_ACTION,
        DeleteUserplanes {
            store: Arc::clone(store),
        },
    )?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
