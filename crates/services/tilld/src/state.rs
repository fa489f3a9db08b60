//! Shared state of the HTTP handlers.

use till_models::principal::PrincipalKind;
use till_web::{prelude::Result as WebResult, session::SessionService};

/// State of one principal kind's routes.
#[derive(Clone, Debug)]
pub struct ApiState {
    pub session: SessionService,
    pub kind: PrincipalKind,
}

impl ApiState {
    pub fn new(session: SessionService, kind: PrincipalKind) -> Self {
        Self { session, kind }
    }

    /// Runs a session operation on the blocking pool.
    ///
    /// Store round-trips and argon2 must not stall the async workers.
    pub async fn run<T, F>(&self, op: F) -> WebResult<T>
    where
        F: FnOnce(&SessionService, PrincipalKind) -> WebResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let session = self.session.clone();
        let kind = self.kind;
        tokio::task::spawn_blocking(move || op(&session, kind)).await?
    }
}
