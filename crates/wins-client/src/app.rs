//! Application state: who is logged in and which wins are loaded.

use crate::client::WinsClient;
use crate::config::ClientConfig;
use crate::error::{Result, WinsError};
use crate::session::{AuthSession, SessionStore};
use crate::types::{AddWinSchema, Credentials};
use spiral::{Milestone, SceneOptions, SpiralScene};
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Outcome of [`WinsApp::import`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub total: usize,
    pub added: usize,
    /// Input indices of the records that were not stored.
    pub failed: Vec<usize>,
}

/// Session, token and milestone list in one place.
///
/// The token is only read from the [`SessionStore`] in [`WinsApp::start`]
/// and only removed from it in [`WinsApp::logout`].
pub struct WinsApp<S> {
    client: WinsClient,
    store: S,
    session: Option<AuthSession>,
    milestones: Vec<Milestone>,
    add_win_schema: AddWinSchema,
}

impl<S: SessionStore> WinsApp<S> {
    pub fn new(config: &ClientConfig, store: S) -> Result<Self> {
        config.validate()?;
        let client = WinsClient::with_timeout(
            config.api_base_url.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )?;
        Ok(Self::from_parts(client, store, config.add_win_schema))
    }

    pub fn from_parts(client: WinsClient, store: S, add_win_schema: AddWinSchema) -> Self {
        Self {
            client,
            store,
            session: None,
            milestones: Vec::new(),
            add_win_schema,
        }
    }

    /// Load the stored session and, if there is one, the wins.
    ///
    /// A failed fetch is logged and leaves the list empty. A session issued
    /// by a different backend is ignored.
    pub async fn start(&mut self) -> Result<()> {
        let Some(session) = self.store.load()? else {
            debug!("no stored session");
            return Ok(());
        };
        if !session.matches_base_url(self.client.base_url()) {
            warn!(
                stored = %session.base_url,
                current = %self.client.base_url(),
                "stored session belongs to another backend, ignoring it"
            );
            return Ok(());
        }
        self.activate(session);
        if let Err(err) = self.refresh().await {
            debug!(error = %err, "initial fetch failed");
        }
        Ok(())
    }

    fn activate(&mut self, session: AuthSession) {
        self.client.set_token(Some(session.access_token.clone()));
        self.session = Some(session);
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&AuthSession> {
        self.session.as_ref()
    }

    pub fn client(&self) -> &WinsClient {
        &self.client
    }

    pub fn milestones(&self) -> &[Milestone] {
        &self.milestones
    }

    /// Log in, persist the token and load the wins.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<()> {
        let credentials = credentials(email, password)?;
        let token = self.client.login(&credentials).await?;
        let session = AuthSession::new(self.client.base_url(), token.access_token)
            .with_email(credentials.email);
        self.store.persist(&session)?;
        info!(email = session.email.as_deref().unwrap_or_default(), "logged in");
        // A previous account's wins must not outlive its token.
        self.milestones.clear();
        self.activate(session);
        if let Err(err) = self.refresh().await {
            debug!(error = %err, "fetch after login failed");
        }
        Ok(())
    }

    /// Create an account. Does not log in; returns the server message.
    pub async fn register(&self, email: &str, password: &str) -> Result<String> {
        let credentials = credentials(email, password)?;
        let response = self.client.register(&credentials).await?;
        Ok(response.msg.unwrap_or_else(|| "Registered".to_string()))
    }

    /// Forget the token everywhere and drop the loaded wins.
    pub fn logout(&mut self) -> Result<()> {
        self.store.clear()?;
        self.client.set_token(None);
        self.session = None;
        self.milestones.clear();
        info!("logged out");
        Ok(())
    }

    /// Reload wins from the backend. On failure the current list is kept.
    pub async fn refresh(&mut self) -> Result<&[Milestone]> {
        if !self.is_authenticated() {
            return Err(WinsError::Unauthenticated);
        }
        match self.client.fetch_wins().await {
            Ok(milestones) => {
                self.milestones = milestones;
                Ok(&self.milestones)
            }
            Err(err) => {
                error!(error = %err, status = ?err.status(), "failed to fetch wins");
                Err(err)
            }
        }
    }

    /// Validate, store remotely, then append locally. Nothing is added
    /// locally if the backend rejects the win.
    pub async fn add(&mut self, date: &str, desc: &str) -> Result<&Milestone> {
        if !self.is_authenticated() {
            return Err(WinsError::Unauthenticated);
        }
        let milestone = Milestone::new(date, desc)?;
        if let Err(err) = self.client.add_win(&milestone, self.add_win_schema).await {
            error!(error = %err, date = %milestone.date, "failed to save win");
            return Err(err);
        }
        self.milestones.push(milestone);
        Ok(&self.milestones[self.milestones.len() - 1])
    }

    /// Add every record in order, continuing past failures.
    ///
    /// Each failure is logged with its index; the report says what made it.
    pub async fn import(&mut self, milestones: &[Milestone]) -> Result<ImportReport> {
        if !self.is_authenticated() {
            return Err(WinsError::Unauthenticated);
        }
        let mut report = ImportReport {
            total: milestones.len(),
            ..ImportReport::default()
        };
        for (index, milestone) in milestones.iter().enumerate() {
            match self.add(&milestone.date, &milestone.desc).await {
                Ok(_) => report.added += 1,
                Err(err) => {
                    error!(index, date = %milestone.date, error = %err, "import record failed");
                    report.failed.push(index);
                }
            }
        }
        info!(added = report.added, total = report.total, "import finished");
        Ok(report)
    }

    /// Lay out the loaded wins.
    pub fn scene(&self, options: &SceneOptions) -> SpiralScene {
        SpiralScene::build(&self.milestones, options)
    }
}

fn credentials(email: &str, password: &str) -> Result<Credentials> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(WinsError::MissingCredentials);
    }
    Ok(Credentials {
        email: email.to_string(),
        password: password.to_string(),
    })
}
