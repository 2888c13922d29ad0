//! The authenticated citers page.
//!
//! [`CitersPage`] is the host page: on every request it runs the auth gate
//! first and only then loads citers from its [`CiterSource`]. Unauthenticated
//! requests get a redirect to the login view and nothing else.

mod command;
mod table;
mod view;

pub use command::{CommandError, TableCommand, HELP};
pub use table::CitersTable;
pub use view::{
    Caption, ColumnHeader, PageView, PaginationView, RowView, NO_RESULTS, PAGE_TITLE,
};

use http::HeaderMap;
use serde::Serialize;
use std::sync::Arc;

use crate::auth::{AuthError, AuthGate, User};
use crate::config::Config;
use crate::models::{Citer, QueryState};
use crate::query::query;
use crate::sources::{source_from_config, CiterSource, SourceError};

/// Temporary redirect issued to unauthenticated requests
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Redirect {
    pub destination: String,
    pub permanent: bool,
}

/// Either a redirect to the login view or the authorized content
#[derive(Debug, Clone, PartialEq)]
pub enum Gated<T> {
    Redirect(Redirect),
    Granted(T),
}

/// Response for a citers page request
pub type PageResponse = Gated<PageView>;

/// Host page wiring the auth gate to a data source
#[derive(Debug, Clone)]
pub struct CitersPage {
    gate: AuthGate,
    source: Arc<dyn CiterSource>,
    login_path: String,
}

impl CitersPage {
    pub fn new(gate: AuthGate, source: Arc<dyn CiterSource>) -> Self {
        Self {
            gate,
            source,
            login_path: "/login".to_string(),
        }
    }

    /// Page built from configuration
    pub fn from_config(config: &Config) -> Result<Self, AuthError> {
        let gate = AuthGate::from_config(&config.auth)?;
        Ok(Self::new(gate, source_from_config(config)).login_path(&config.auth.login_path))
    }

    /// Set the redirect target for unauthenticated requests
    pub fn login_path(mut self, path: impl Into<String>) -> Self {
        self.login_path = path.into();
        self
    }

    pub fn gate(&self) -> &AuthGate {
        &self.gate
    }

    pub fn source(&self) -> &Arc<dyn CiterSource> {
        &self.source
    }

    /// Render one page of citers for the request carrying `headers`
    ///
    /// A page index past the last page is clamped to it.
    pub async fn handle(
        &self,
        headers: &HeaderMap,
        state: &QueryState,
    ) -> Result<PageResponse, SourceError> {
        let user = match self.authorize(headers) {
            Gated::Granted(user) => user,
            Gated::Redirect(redirect) => return Ok(Gated::Redirect(redirect)),
        };

        let citers = self.source.list_citers().await?;
        let mut state = state.clone();
        let mut result = query(&citers, &state);
        state.clamp_page(result.total_pages);
        if state.page_index != result.page_index {
            tracing::debug!(
                requested = result.page_index,
                page_index = state.page_index,
                "Clamped page index"
            );
            result = query(&citers, &state);
        }
        Ok(Gated::Granted(PageView::build(&user, &state, &result)))
    }

    /// Open an interactive table for the request carrying `headers`
    pub async fn open_table(
        &self,
        headers: &HeaderMap,
        state: QueryState,
    ) -> Result<Gated<(User, CitersTable)>, SourceError> {
        let user = match self.authorize(headers) {
            Gated::Granted(user) => user,
            Gated::Redirect(redirect) => return Ok(Gated::Redirect(redirect)),
        };

        let citers = self.source.list_citers().await?;
        Ok(Gated::Granted((user, CitersTable::new(citers, state))))
    }

    /// Look up the citer behind a row's detail link
    pub async fn detail(&self, headers: &HeaderMap, id: &str) -> Result<Gated<Citer>, SourceError> {
        if let Gated::Redirect(redirect) = self.authorize(headers) {
            return Ok(Gated::Redirect(redirect));
        }
        Ok(Gated::Granted(self.source.get_citer(id).await?))
    }

    fn authorize(&self, headers: &HeaderMap) -> Gated<User> {
        match self.gate.check_auth(headers).user {
            Some(user) => Gated::Granted(user),
            None => {
                tracing::debug!(destination = %self.login_path, "Redirecting unauthenticated request");
                Gated::Redirect(Redirect {
                    destination: self.login_path.clone(),
                    permanent: false,
                })
            }
        }
    }
}
