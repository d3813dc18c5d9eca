//! HTTP gateway against the enrichment portal
//!
//! All three portal calls share the same session handling: cookies and the
//! user agent come from the [`SessionProvider`], and an authentication-expiry
//! signal (401/403, or an HTML login page in place of JSON) triggers exactly
//! one re-authentication followed by one retry. Transport failures are never
//! retried here.

use crate::error::{Error, Result};
use crate::gateway::wire::{
    EntriesResponse, MonthsResponse, SaveResponse, to_wire_clock, to_wire_date,
};
use crate::gateway::{EntryPayload, LogbookGateway};
use crate::session::{SessionProvider, SessionState};
use crate::types::{LogEntry, MonthEntries, MonthHeader};
use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, COOKIE, REFERER, USER_AGENT};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use url::Url;

/// Production portal base URL
pub const DEFAULT_BASE_URL: &str = "https://activity-enrichment.apps.binus.ac.id";

const MONTHS_PATH: &str = "/LogBook/GetMonths";
const ENTRIES_PATH: &str = "/LogBook/GetLogBook";
const SAVE_PATH: &str = "/LogBook/StudentSave";
const REFERER_PATH: &str = "/LearningPlan/StudentIndex";

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// What a portal response turned out to be
enum Reply {
    /// JSON body to deserialize
    Json(String),
    /// The portal rejected or redirected the session
    AuthExpired,
}

/// Gateway over the portal's logbook endpoints using reqwest
pub struct HttpGateway {
    client: Client,
    base_url: Url,
    session: Arc<dyn SessionProvider>,
    /// Bumped on every successful re-authentication so concurrent calls
    /// share one refresh instead of each performing their own.
    reauth_epoch: Mutex<u64>,
}

impl HttpGateway {
    /// Create a gateway against the production portal
    pub fn new(session: Arc<dyn SessionProvider>) -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL, session)
    }

    /// Create a gateway against `base_url` (tests point this at a local server)
    pub fn with_base_url(base_url: &str, session: Arc<dyn SessionProvider>) -> Result<Self> {
        let base_url =
            Url::parse(base_url).map_err(|e| Error::Gateway(format!("bad base url: {e}")))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| Client::new());

        Ok(Self {
            client,
            base_url,
            session,
            reauth_epoch: Mutex::new(0),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| Error::Gateway(format!("bad endpoint {path}: {e}")))
    }

    fn origin(&self) -> String {
        self.base_url.as_str().trim_end_matches('/').to_string()
    }

    fn portal_headers(&self, builder: RequestBuilder, state: &SessionState) -> RequestBuilder {
        builder
            .header(COOKIE, state.cookie_header())
            .header(USER_AGENT, state.user_agent())
            .header("X-Requested-With", "XMLHttpRequest")
            .header(REFERER, format!("{}{REFERER_PATH}", self.origin()))
    }

    /// Perform one portal call with the bounded auth-expiry recovery:
    /// first attempt, then at most one retry after re-authentication.
    async fn call<T, F>(&self, build: F) -> Result<T>
    where
        T: DeserializeOwned,
        F: Fn(&SessionState) -> RequestBuilder,
    {
        let mut retried = false;
        loop {
            let epoch = *self.reauth_epoch.lock().await;
            let state = self.session.session().await?;
            let response = self.portal_headers(build(&state), &state).send().await?;

            match Self::classify(response).await? {
                Reply::Json(body) => {
                    return serde_json::from_str(&body)
                        .map_err(|e| Error::Parse(format!("unexpected portal response: {e}")));
                }
                Reply::AuthExpired => {
                    if retried {
                        return Err(Error::AuthExpired);
                    }
                    self.recover_session(epoch).await?;
                    retried = true;
                }
            }
        }
    }

    async fn classify(response: Response) -> Result<Reply> {
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Ok(Reply::AuthExpired);
        }

        let html = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.contains("text/html"));

        let body = response.text().await?;

        if !status.is_success() {
            return Err(Error::Gateway(format!("portal returned {status}")));
        }

        // A successful status with an HTML body is the portal's login
        // redirect, not data.
        if html || body.trim_start().starts_with('<') {
            return Ok(Reply::AuthExpired);
        }

        Ok(Reply::Json(body))
    }

    /// Re-authenticate once, shared across concurrent callers: whoever holds
    /// the lock first refreshes; later callers that saw the same epoch find
    /// it already bumped and just retry.
    async fn recover_session(&self, seen_epoch: u64) -> Result<()> {
        let mut epoch = self.reauth_epoch.lock().await;
        if *epoch != seen_epoch {
            return Ok(());
        }

        tracing::debug!("portal session expired, re-authenticating");
        if self.session.reauthenticate().await? {
            *epoch += 1;
            Ok(())
        } else {
            Err(Error::AuthExpired)
        }
    }
}

#[async_trait]
impl LogbookGateway for HttpGateway {
    async fn list_months(&self, logbook_id: &str) -> Result<Vec<MonthHeader>> {
        let url = self.endpoint(MONTHS_PATH)?;
        tracing::debug!(%url, "listing logbook months");

        let response: MonthsResponse = self
            .call(|_| {
                self.client
                    .get(url.clone())
                    .query(&[("logBookId", logbook_id)])
            })
            .await?;

        let total = response.data.len();
        let headers: Vec<MonthHeader> = response
            .data
            .into_iter()
            .filter_map(|row| {
                let header = row.clone().into_header();
                if header.is_none() {
                    tracing::warn!(?row, "skipping month row with missing identifying fields");
                }
                header
            })
            .collect();

        tracing::debug!(usable = headers.len(), total, "month listing resolved");
        Ok(headers)
    }

    async fn list_entries(&self, header_id: &str) -> Result<MonthEntries> {
        if header_id.is_empty() {
            return Err(Error::InvalidHeader);
        }

        let url = self.endpoint(ENTRIES_PATH)?;
        tracing::debug!(%url, header_id, "fetching month entries");

        let response: EntriesResponse = self
            .call(|_| {
                self.client
                    .post(url.clone())
                    .form(&[("logBookHeaderID", header_id)])
            })
            .await?;

        response.into_month_entries()
    }

    async fn save_entry(
        &self,
        header_id: &str,
        payload: &EntryPayload,
        force: bool,
    ) -> Result<LogEntry> {
        if header_id.is_empty() {
            return Err(Error::InvalidHeader);
        }
        // Overwriting an existing entry always requires the caller's
        // explicit instruction.
        if !payload.id.is_nil() && !force {
            return Err(Error::AlreadyFilled(payload.date));
        }

        let url = self.endpoint(SAVE_PATH)?;
        tracing::debug!(%url, date = %payload.date, force, "saving entry");

        let form = [
            ("model[ID]", payload.id.to_string()),
            ("model[LogBookHeaderID]", header_id.to_string()),
            ("model[Date]", to_wire_date(payload.date)),
            ("model[Activity]", payload.activity.clone()),
            ("model[ClockIn]", to_wire_clock(&payload.clock_in)),
            ("model[ClockOut]", to_wire_clock(&payload.clock_out)),
            ("model[Description]", payload.description.clone()),
            ("model[flagjulyactive]", "false".to_string()),
        ];
        let origin = self.origin();

        let response: SaveResponse = self
            .call(|_| {
                self.client
                    .post(url.clone())
                    .header("Origin", origin.clone())
                    .form(&form)
            })
            .await?;

        if let Some(error) = response.error {
            return Err(Error::Gateway(error));
        }

        // The portal does not always echo the saved row; fall back to the
        // payload we sent.
        match response.data {
            Some(row) => row.into_entry(),
            None => Ok(LogEntry {
                id: payload.id,
                date: payload.date,
                activity: payload.activity.clone(),
                clock_in: payload.clock_in.clone(),
                clock_out: payload.clock_out.clone(),
                description: payload.description.clone(),
            }),
        }
    }
}
