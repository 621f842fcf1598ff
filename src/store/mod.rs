// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Thin client for the hosted PostgREST backend.
//!
//! Row-level security on the backend scopes every table to the signed-in
//! user; the client still filters by `user_id` explicitly on reads, the same
//! way the web app does. Every call is a single request and either fully
//! succeeds or returns a [`BackendError`].

pub mod admin;
pub mod categories;
pub mod transactions;

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::errors::BackendError;

pub type Query = Vec<(&'static str, String)>;

#[derive(Debug, Clone)]
pub struct StoreClient {
    http: Client,
    rest: Url,
    api_key: String,
    bearer: String,
}

/// Insert body with the owner column added to the caller's fields.
#[derive(Serialize)]
struct Owned<'a, T: Serialize> {
    user_id: &'a str,
    #[serde(flatten)]
    fields: &'a T,
}

impl StoreClient {
    /// `base_url` is the project root (e.g. `https://abc.supabase.co`); tables
    /// are served under `rest/v1/`. Without an access token the anon key is
    /// sent as the bearer, which row-level security treats as signed out.
    pub fn new(
        http: Client,
        base_url: &str,
        api_key: &str,
        access_token: Option<&str>,
    ) -> Result<Self, BackendError> {
        let rest = rest_url(base_url)?;
        Ok(Self {
            http,
            rest,
            api_key: api_key.to_string(),
            bearer: access_token.unwrap_or(api_key).to_string(),
        })
    }

    pub fn rest_base(&self) -> &Url {
        &self.rest
    }

    fn request(&self, method: Method, table: &str, query: &Query) -> Result<RequestBuilder, BackendError> {
        let url = self
            .rest
            .join(table)
            .map_err(|e| BackendError::InvalidUrl(e.to_string()))?;
        debug!(%method, table, params = query.len(), "backend request");
        Ok(self
            .http
            .request(method, url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.bearer)
            .query(query))
    }

    pub(crate) fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &Query,
    ) -> Result<Vec<T>, BackendError> {
        let req = self.request(Method::GET, table, query)?;
        send_json(req)
    }

    pub(crate) fn insert<B: Serialize, T: DeserializeOwned>(
        &self,
        table: &str,
        owner: &str,
        body: &B,
        query: &Query,
    ) -> Result<Vec<T>, BackendError> {
        let req = self
            .request(Method::POST, table, query)?
            .header("Prefer", "return=representation")
            .json(&Owned {
                user_id: owner,
                fields: body,
            });
        send_json(req)
    }

    pub(crate) fn update<B: Serialize, T: DeserializeOwned>(
        &self,
        table: &str,
        body: &B,
        query: &Query,
    ) -> Result<Vec<T>, BackendError> {
        let req = self
            .request(Method::PATCH, table, query)?
            .header("Prefer", "return=representation")
            .json(body);
        send_json(req)
    }

    pub(crate) fn delete<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &Query,
    ) -> Result<Vec<T>, BackendError> {
        let req = self
            .request(Method::DELETE, table, query)?
            .header("Prefer", "return=representation");
        send_json(req)
    }
}

fn send_json<T: DeserializeOwned>(req: RequestBuilder) -> Result<Vec<T>, BackendError> {
    let res = req.send()?;
    let status = res.status();
    let body = res.text()?;
    if !status.is_success() {
        return Err(BackendError::from_status(status.as_u16(), &body));
    }
    decode_rows(&body)
}

/// Decode a PostgREST success body (always a JSON array for our calls).
pub fn decode_rows<T: DeserializeOwned>(body: &str) -> Result<Vec<T>, BackendError> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(body).map_err(|e| BackendError::Decode(e.to_string()))
}

/// `https://host[/prefix]` -> `https://host[/prefix]/rest/v1/`.
pub fn rest_url(base_url: &str) -> Result<Url, BackendError> {
    let mut base = base_url.trim().to_string();
    if !base.ends_with('/') {
        base.push('/');
    }
    let url = Url::parse(&base).map_err(|e| BackendError::InvalidUrl(format!("{}: {}", base_url, e)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(BackendError::InvalidUrl(format!(
            "{}: unsupported scheme '{}'",
            base_url,
            url.scheme()
        )));
    }
    url.join("rest/v1/")
        .map_err(|e| BackendError::InvalidUrl(e.to_string()))
}

pub(crate) fn eq(v: &str) -> String {
    format!("eq.{}", v)
}

/// Exactly one row back from a mutation, or `NotFound`.
pub(crate) fn single<T>(rows: Vec<T>) -> Result<T, BackendError> {
    rows.into_iter().next().ok_or(BackendError::NotFound)
}
