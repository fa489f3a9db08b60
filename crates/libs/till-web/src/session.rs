//! The session service: registration, login, token resolution and revocation.
//!
//! Every method is synchronous and may block on the stores or on argon2, so the
//! HTTP layer calls them through `tokio::task::spawn_blocking`.

use std::{fmt, sync::Arc};

use chrono::{DateTime, TimeDelta, Utc};
use till_auth::{
    auth_body::AuthBody,
    secret_hash::{HashCost, MAX_SECRET_LEN, SecretHasher},
    session_token::{generate_token, is_well_formed, token_digest},
};
use till_models::{
    principal::{NewPrincipal, Principal, PrincipalKind},
    session::SessionRecord,
    store::{CredentialStore, TokenStore},
};
use tracing::{debug, info, warn};

use crate::{
    ctx::{Ctx, resolver::KindResolver},
    prelude::*,
};

/// Longest login accepted, in bytes, after trimming.
pub const MAX_LOGIN_LEN: usize = 64;

/// Longest display name accepted, in bytes.
pub const MAX_NAME_LEN: usize = 255;

pub const DEFAULT_MIN_PASSWORD_LEN: usize = 6;

/// Session lifetime used when none is configured.
pub const DEFAULT_TOKEN_TTL: TimeDelta = TimeDelta::hours(24);

/// Tunables of a [`SessionService`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionConfig {
    /// Lifetime of issued tokens. `None` issues tokens that never expire.
    pub token_ttl: Option<TimeDelta>,
    /// Shortest password accepted at registration.
    pub min_password_len: usize,
    pub hash_cost: HashCost,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            token_ttl: Some(DEFAULT_TOKEN_TTL),
            min_password_len: DEFAULT_MIN_PASSWORD_LEN,
            hash_cost: HashCost::default(),
        }
    }
}

/// Profile fields supplied at registration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Profile {
    pub name: String,
}

/// Registration, authentication and token lifecycle for both principal kinds.
///
/// Cheap to clone; clones share the stores and the hasher.
///
/// # Examples
///
/// ```rust
/// use till_auth::secret_hash::HashCost;
/// use till_models::{principal::PrincipalKind, store::MemoryStore};
/// use till_web::session::{Profile, SessionConfig, SessionService};
///
/// let store = MemoryStore::new();
/// let config = SessionConfig {
///     hash_cost: HashCost::minimal(),
///     ..Default::default()
/// };
/// let service = SessionService::from_store(store, config).unwrap();
///
/// let bob = service
///     .register(PrincipalKind::Customer, "bob", "s3cret", Profile::default())
///     .unwrap();
/// let body = service
///     .authenticate(PrincipalKind::Customer, "bob", "s3cret")
///     .unwrap();
/// let ctx = service.resolve(&body.access_token).unwrap();
/// assert_eq!(ctx.principal_id, bob.id);
/// ```
#[derive(Clone)]
pub struct SessionService {
    credentials: Arc<dyn CredentialStore>,
    tokens: Arc<dyn TokenStore>,
    hasher: Arc<SecretHasher>,
    token_ttl: Option<TimeDelta>,
    min_password_len: usize,
    /// Verified against when a login does not exist, so both failure paths
    /// cost one argon2 verification.
    decoy_hash: Arc<str>,
}

impl fmt::Debug for SessionService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionService")
            .field("token_ttl", &self.token_ttl)
            .field("min_password_len", &self.min_password_len)
            .field("hasher", &self.hasher)
            .finish_non_exhaustive()
    }
}

impl SessionService {
    pub fn new(
        credentials: Arc<dyn CredentialStore>,
        tokens: Arc<dyn TokenStore>,
        config: SessionConfig,
    ) -> Result<Self> {
        let hasher = SecretHasher::new(config.hash_cost)?;
        let decoy_hash = hasher.hash(&generate_token()?)?;
        Ok(Self {
            credentials,
            tokens,
            hasher: Arc::new(hasher),
            token_ttl: config.token_ttl,
            min_password_len: config.min_password_len,
            decoy_hash: decoy_hash.into(),
        })
    }

    /// Builds a service whose principals and sessions live in the same store.
    pub fn from_store<S>(store: S, config: SessionConfig) -> Result<Self>
    where
        S: CredentialStore + TokenStore + 'static,
    {
        let store = Arc::new(store);
        Self::new(store.clone(), store, config)
    }

    pub fn token_ttl(&self) -> Option<TimeDelta> {
        self.token_ttl
    }

    /// Creates a new active principal.
    ///
    /// Fails with [`Error::LoginTaken`] when the login exists for `kind`; the
    /// store decides this atomically with the insert.
    pub fn register(
        &self,
        kind: PrincipalKind,
        login: &str,
        password: &str,
        profile: Profile,
    ) -> Result<Principal> {
        let login = normalize_login(login)?;
        check_password(password)?;
        if password.len() < self.min_password_len {
            return Err(till_auth::error::Error::PasswordTooShort {
                min: self.min_password_len,
            }
            .into());
        }
        if profile.name.len() > MAX_NAME_LEN {
            return Err(till_auth::error::Error::InputTooLong { max: MAX_NAME_LEN }.into());
        }

        let password_hash = self.hasher.hash(password)?;
        let new_principal = NewPrincipal {
            kind,
            login: login.to_string(),
            password_hash,
            name: profile.name,
        };

        match self.credentials.insert(new_principal) {
            Ok(principal) => {
                info!("Registered {} {} ({})", kind, principal.login, principal.id);
                Ok(principal)
            }
            Err(till_models::error::Error::Conflict) => {
                debug!("Registration rejected, {kind} login {login} already taken");
                Err(Error::LoginTaken)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Verifies a login/password pair and issues a new session token.
    ///
    /// Unknown logins, wrong passwords and inactive principals all fail with
    /// [`Error::InvalidCredentials`]; only the log tells them apart.
    pub fn authenticate(&self, kind: PrincipalKind, login: &str, password: &str) -> Result<AuthBody> {
        let login = normalize_login(login)?;
        check_password(password)?;

        let Some(principal) = self.credentials.find_by_login(kind, login)? else {
            self.hasher.verify(&self.decoy_hash, password)?;
            debug!("Login failed for {kind} {login}: no such login");
            return Err(Error::InvalidCredentials);
        };

        if !self.hasher.verify(&principal.password_hash, password)? {
            debug!("Login failed for {kind} {login}: wrong password");
            return Err(Error::InvalidCredentials);
        }

        if !principal.active {
            debug!("Login failed for {kind} {login}: principal inactive");
            return Err(Error::InvalidCredentials);
        }

        self.issue(&principal)
    }

    fn issue(&self, principal: &Principal) -> Result<AuthBody> {
        let token = generate_token()?;
        let issued_at = Utc::now();
        let expires_at = match self.token_ttl {
            Some(ttl) => Some(
                issued_at
                    .checked_add_signed(ttl)
                    .ok_or(Error::AuthTokenCreation)?,
            ),
            None => None,
        };

        let record = SessionRecord {
            token_hash: token_digest(&token),
            principal_id: principal.id,
            principal_kind: principal.kind,
            issued_at,
            expires_at,
        };
        debug!(
            "Issuing session {} for {} {}",
            short(&record.token_hash),
            principal.kind,
            principal.id
        );
        self.tokens.put(record)?;

        Ok(AuthBody::new(token, expires_at))
    }

    /// Resolves a token into the identity it was issued to.
    pub fn resolve(&self, token: &str) -> Result<Ctx> {
        self.resolve_at(token, Utc::now())
    }

    /// Resolves a token, evaluating expiry against `now`.
    ///
    /// An expired session is deleted on the way out. Failing to delete it is
    /// logged and otherwise ignored.
    pub fn resolve_at(&self, token: &str, now: DateTime<Utc>) -> Result<Ctx> {
        if !is_well_formed(token) {
            return Err(Error::TokenNotFound);
        }

        let digest = token_digest(token);
        let record = self.tokens.get(&digest)?.ok_or(Error::TokenNotFound)?;

        if record.is_expired_at(now) {
            debug!("Session {} expired", short(&digest));
            if let Err(err) = self.tokens.delete(&digest) {
                warn!("Failed to delete expired session {}: {err}", short(&digest));
            }
            return Err(Error::TokenExpired);
        }

        Ok(Ctx::new(record.principal_id, record.principal_kind))
    }

    /// Deletes the session of `token`. Unknown tokens are not an error.
    pub fn revoke(&self, token: &str) -> Result<()> {
        if !is_well_formed(token) {
            return Ok(());
        }
        let digest = token_digest(token);
        if self.tokens.delete(&digest)? {
            debug!("Revoked session {}", short(&digest));
        }
        Ok(())
    }

    /// Deletes every session of a principal. Returns how many were removed.
    pub fn revoke_all(&self, kind: PrincipalKind, principal_id: i64) -> Result<usize> {
        let revoked = self.tokens.delete_for_principal(kind, principal_id)?;
        info!("Revoked {revoked} session(s) of {kind} {principal_id}");
        Ok(revoked)
    }

    /// Deletes sessions that are past their expiry.
    ///
    /// Resolution rejects expired sessions on its own, this only reclaims space.
    pub fn purge_expired(&self) -> Result<usize> {
        let purged = self.tokens.delete_expired(Utc::now())?;
        if purged > 0 {
            info!("Purged {purged} expired session(s)");
        }
        Ok(purged)
    }

    /// Looks up a principal of the given kind.
    pub fn principal(&self, kind: PrincipalKind, id: i64) -> Result<Principal> {
        self.credentials
            .find_by_id(id)?
            .filter(|principal| principal.kind == kind)
            .ok_or(Error::PrincipalNotFound)
    }

    /// A gate resolver that only accepts tokens issued to `kind`.
    pub fn resolver(&self, kind: PrincipalKind) -> KindResolver {
        KindResolver::new(self.clone(), kind)
    }
}

fn normalize_login(login: &str) -> Result<&str> {
    let login = login.trim();
    if login.is_empty() {
        return Err(Error::MissingCredentials);
    }
    if login.len() > MAX_LOGIN_LEN {
        return Err(till_auth::error::Error::InputTooLong { max: MAX_LOGIN_LEN }.into());
    }
    Ok(login)
}

fn check_password(password: &str) -> Result<()> {
    if password.is_empty() {
        return Err(Error::MissingCredentials);
    }
    if password.len() > MAX_SECRET_LEN {
        return Err(till_auth::error::Error::InputTooLong {
            max: MAX_SECRET_LEN,
        }
        .into());
    }
    Ok(())
}

fn short(digest: &str) -> &str {
    digest.get(..8).unwrap_or(digest)
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use till_models::store::MemoryStore;

    use super::*;

    const CUSTOMER: PrincipalKind = PrincipalKind::Customer;
    const MANAGER: PrincipalKind = PrincipalKind::Manager;

    fn config(token_ttl: Option<TimeDelta>) -> SessionConfig {
        SessionConfig {
            token_ttl,
            min_password_len: DEFAULT_MIN_PASSWORD_LEN,
            hash_cost: HashCost::minimal(),
        }
    }

    fn service_with(token_ttl: Option<TimeDelta>) -> (SessionService, MemoryStore) {
        let store = MemoryStore::new();
        let service = SessionService::from_store(store.clone(), config(token_ttl)).unwrap();
        (service, store)
    }

    fn service() -> (SessionService, MemoryStore) {
        service_with(Some(DEFAULT_TOKEN_TTL))
    }

    fn profile(name: &str) -> Profile {
        Profile {
            name: name.to_string(),
        }
    }

    #[test]
    fn login_is_unique_per_kind() {
        let (service, _) = service();

        service
            .register(CUSTOMER, "alice", "password", profile("Alice"))
            .unwrap();
        let err = service
            .register(CUSTOMER, "alice", "another", profile("Alice"))
            .unwrap_err();
        assert!(matches!(err, Error::LoginTaken));

        let manager = service
            .register(MANAGER, "alice", "password", profile("Alice"))
            .unwrap();
        assert_eq!(manager.kind, MANAGER);
    }

    #[test]
    fn registration_stores_hash_only() {
        let (service, _) = service();

        let principal = service
            .register(CUSTOMER, "  carol ", "password", profile("Carol"))
            .unwrap();
        assert_eq!(principal.login, "carol");
        assert_eq!(principal.name, "Carol");
        assert!(principal.active);
        assert_ne!(principal.password_hash, "password");
        assert!(principal.password_hash.starts_with("$argon2id$"));
    }

    #[test]
    fn unknown_login_and_wrong_password_fail_alike() {
        let (service, _) = service();
        service
            .register(CUSTOMER, "alice", "password", profile(""))
            .unwrap();

        let wrong = service
            .authenticate(CUSTOMER, "alice", "wrong")
            .unwrap_err();
        let nobody = service.authenticate(CUSTOMER, "nobody", "x").unwrap_err();

        assert!(matches!(wrong, Error::InvalidCredentials));
        assert!(matches!(nobody, Error::InvalidCredentials));
        assert_eq!(wrong.to_string(), nobody.to_string());
    }

    fn median(mut samples: Vec<Duration>) -> Duration {
        samples.sort();
        samples[samples.len() / 2]
    }

    #[test]
    fn login_failures_take_similar_time() {
        let (service, _) = service();
        service
            .register(CUSTOMER, "alice", "password", profile(""))
            .unwrap();

        let mut wrong = Vec::with_capacity(1000);
        let mut nobody = Vec::with_capacity(1000);
        for _ in 0..1000 {
            let start = Instant::now();
            let _ = service.authenticate(CUSTOMER, "alice", "wrong");
            wrong.push(start.elapsed());

            let start = Instant::now();
            let _ = service.authenticate(CUSTOMER, "nobody", "x");
            nobody.push(start.elapsed());
        }

        let wrong = median(wrong).as_secs_f64();
        let nobody = median(nobody).as_secs_f64();
        let ratio = wrong.max(nobody) / wrong.min(nobody);
        assert!(
            ratio < 1.5,
            "median latencies diverge: wrong password {wrong:.6}s, unknown login {nobody:.6}s"
        );
    }

    #[test]
    fn token_expires_after_ttl() {
        let (service, store) = service_with(Some(TimeDelta::seconds(1)));
        let bob = service
            .register(CUSTOMER, "bob", "s3cret", profile(""))
            .unwrap();
        let body = service.authenticate(CUSTOMER, "bob", "s3cret").unwrap();

        let ctx = service.resolve(&body.access_token).unwrap();
        assert_eq!(ctx.principal_id, bob.id);

        let later = Utc::now() + TimeDelta::seconds(2);
        let err = service.resolve_at(&body.access_token, later).unwrap_err();
        assert!(matches!(err, Error::TokenExpired));
        assert_eq!(store.session_count(), 0);

        let err = service.resolve(&body.access_token).unwrap_err();
        assert!(matches!(err, Error::TokenNotFound));
    }

    #[test]
    fn token_expires_in_real_time() {
        let (service, _) = service_with(Some(TimeDelta::seconds(1)));
        service
            .register(CUSTOMER, "bob", "s3cret", profile(""))
            .unwrap();
        let body = service.authenticate(CUSTOMER, "bob", "s3cret").unwrap();
        assert!(service.resolve(&body.access_token).is_ok());

        std::thread::sleep(Duration::from_secs(2));

        let err = service.resolve(&body.access_token).unwrap_err();
        assert!(matches!(err, Error::TokenExpired));
    }

    #[test]
    fn expiry_boundary_is_exclusive() {
        let (service, _) = service_with(Some(TimeDelta::seconds(60)));
        service
            .register(CUSTOMER, "bob", "s3cret", profile(""))
            .unwrap();
        let body = service.authenticate(CUSTOMER, "bob", "s3cret").unwrap();
        let expiry = body.expires_at.unwrap();

        let before = expiry - TimeDelta::milliseconds(1);
        assert!(service.resolve_at(&body.access_token, before).is_ok());
        let err = service.resolve_at(&body.access_token, expiry).unwrap_err();
        assert!(matches!(err, Error::TokenExpired));
    }

    #[test]
    fn tokens_without_ttl_never_expire() {
        let (service, _) = service_with(None);
        service
            .register(CUSTOMER, "bob", "s3cret", profile(""))
            .unwrap();
        let body = service.authenticate(CUSTOMER, "bob", "s3cret").unwrap();
        assert_eq!(body.expires_at, None);

        let far_future = Utc::now() + TimeDelta::days(365 * 50);
        assert!(service.resolve_at(&body.access_token, far_future).is_ok());
    }

    #[test]
    fn revoke_is_idempotent() {
        let (service, _) = service();
        service
            .register(CUSTOMER, "bob", "s3cret", profile(""))
            .unwrap();
        let body = service.authenticate(CUSTOMER, "bob", "s3cret").unwrap();

        service.revoke(&body.access_token).unwrap();
        let err = service.resolve(&body.access_token).unwrap_err();
        assert!(matches!(err, Error::TokenNotFound));

        service.revoke(&body.access_token).unwrap();
        service.revoke(&generate_token().unwrap()).unwrap();
        service.revoke("not a token").unwrap();
    }

    #[test]
    fn bob_session_lifecycle() {
        let (service, _) = service();

        let bob = service
            .register(CUSTOMER, "bob", "s3cret", profile("Bob"))
            .unwrap();
        let body = service.authenticate(CUSTOMER, "bob", "s3cret").unwrap();
        assert_eq!(body.token_type, till_auth::CONNECTION_TOKEN_TYPE);

        let ctx = service.resolve(&body.access_token).unwrap();
        assert_eq!(ctx, Ctx::new(bob.id, CUSTOMER));

        service.revoke(&body.access_token).unwrap();
        assert!(service.resolve(&body.access_token).is_err());
    }

    #[test]
    fn every_login_gets_a_fresh_token() {
        let (service, store) = service();
        service
            .register(CUSTOMER, "bob", "s3cret", profile(""))
            .unwrap();

        let first = service.authenticate(CUSTOMER, "bob", "s3cret").unwrap();
        let second = service.authenticate(CUSTOMER, "bob", "s3cret").unwrap();
        assert_ne!(first.access_token, second.access_token);
        assert_eq!(store.session_count(), 2);
    }

    #[test]
    fn garbage_tokens_are_not_found() {
        let (service, _) = service();
        let uppercase = "Z".repeat(64);
        let unknown = generate_token().unwrap();
        for token in ["", "abc", uppercase.as_str(), unknown.as_str()] {
            let err = service.resolve(token).unwrap_err();
            assert!(matches!(err, Error::TokenNotFound), "{token}");
        }
    }

    #[test]
    fn inactive_principal_cannot_log_in() {
        let (service, store) = service();
        let bob = service
            .register(CUSTOMER, "bob", "s3cret", profile(""))
            .unwrap();
        assert!(store.set_active(bob.id, false));

        let err = service
            .authenticate(CUSTOMER, "bob", "s3cret")
            .unwrap_err();
        assert!(matches!(err, Error::InvalidCredentials));
    }

    #[test]
    fn password_policy() {
        let (service, _) = service();

        let err = service
            .register(CUSTOMER, "bob", "short", profile(""))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Auth(till_auth::error::Error::PasswordTooShort { min: 6 })
        ));

        let long = "x".repeat(MAX_SECRET_LEN + 1);
        let err = service
            .register(CUSTOMER, "bob", &long, profile(""))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Auth(till_auth::error::Error::InputTooLong { .. })
        ));

        let err = service
            .register(CUSTOMER, "   ", "s3cret", profile(""))
            .unwrap_err();
        assert!(matches!(err, Error::MissingCredentials));

        let err = service
            .register(CUSTOMER, &"b".repeat(MAX_LOGIN_LEN + 1), "s3cret", profile(""))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Auth(till_auth::error::Error::InputTooLong { max: MAX_LOGIN_LEN })
        ));

        let err = service.authenticate(CUSTOMER, "bob", "").unwrap_err();
        assert!(matches!(err, Error::MissingCredentials));
    }

    #[test]
    fn revoke_all_and_purge() {
        let (service, store) = service_with(Some(TimeDelta::seconds(1)));
        let bob = service
            .register(CUSTOMER, "bob", "s3cret", profile(""))
            .unwrap();
        service
            .register(CUSTOMER, "carol", "s3cret", profile(""))
            .unwrap();

        service.authenticate(CUSTOMER, "bob", "s3cret").unwrap();
        service.authenticate(CUSTOMER, "bob", "s3cret").unwrap();
        let carol = service.authenticate(CUSTOMER, "carol", "s3cret").unwrap();

        assert_eq!(service.revoke_all(CUSTOMER, bob.id).unwrap(), 2);
        assert_eq!(store.session_count(), 1);
        assert!(service.resolve(&carol.access_token).is_ok());

        assert_eq!(service.purge_expired().unwrap(), 0);
        std::thread::sleep(Duration::from_millis(1100));
        assert_eq!(service.purge_expired().unwrap(), 1);
        assert_eq!(store.session_count(), 0);
    }

    #[test]
    fn concurrent_registrations_have_one_winner() {
        const RACERS: usize = 16;
        let (service, _) = service();
        let start = std::sync::Barrier::new(RACERS);

        let results: Vec<Result<Principal>> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..RACERS)
                .map(|_| {
                    let service = service.clone();
                    let start = &start;
                    scope.spawn(move || {
                        start.wait();
                        service.register(CUSTOMER, "alice", "s3cret", profile(""))
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let winners = results.iter().filter(|r| r.is_ok()).count();
        let taken = results
            .iter()
            .filter(|r| matches!(r, Err(Error::LoginTaken)))
            .count();
        assert_eq!(winners, 1);
        assert_eq!(taken, RACERS - 1);
        assert!(service.authenticate(CUSTOMER, "alice", "s3cret").is_ok());
    }

    #[test]
    fn principal_lookup_is_kind_scoped() {
        let (service, _) = service();
        let bob = service
            .register(CUSTOMER, "bob", "s3cret", profile("Bob"))
            .unwrap();

        assert_eq!(service.principal(CUSTOMER, bob.id).unwrap().name, "Bob");
        assert!(matches!(
            service.principal(MANAGER, bob.id).unwrap_err(),
            Error::PrincipalNotFound
        ));
        assert!(matches!(
            service.principal(CUSTOMER, 999).unwrap_err(),
            Error::PrincipalNotFound
        ));
    }

    /// Token store whose deletes always fail.
    struct StuckTokens(MemoryStore);

    impl TokenStore for StuckTokens {
        fn get(&self, token_hash: &str) -> till_models::prelude::Result<Option<SessionRecord>> {
            self.0.get(token_hash)
        }

        fn put(&self, record: SessionRecord) -> till_models::prelude::Result<()> {
            self.0.put(record)
        }

        fn delete(&self, _token_hash: &str) -> till_models::prelude::Result<bool> {
            Err(till_models::error::Error::Migration("store offline".into()))
        }

        fn delete_for_principal(
            &self,
            kind: PrincipalKind,
            principal_id: i64,
        ) -> till_models::prelude::Result<usize> {
            self.0.delete_for_principal(kind, principal_id)
        }

        fn delete_expired(&self, now: DateTime<Utc>) -> till_models::prelude::Result<usize> {
            self.0.delete_expired(now)
        }
    }

    #[test]
    fn failed_cleanup_still_reports_expiry() {
        let store = MemoryStore::new();
        let service = SessionService::new(
            Arc::new(store.clone()),
            Arc::new(StuckTokens(store.clone())),
            config(Some(TimeDelta::seconds(1))),
        )
        .unwrap();
        service
            .register(CUSTOMER, "bob", "s3cret", profile(""))
            .unwrap();
        let body = service.authenticate(CUSTOMER, "bob", "s3cret").unwrap();

        let later = Utc::now() + TimeDelta::seconds(2);
        let err = service.resolve_at(&body.access_token, later).unwrap_err();
        assert!(matches!(err, Error::TokenExpired));
        assert_eq!(store.session_count(), 1);
    }

    /// Credential store that cannot be reached.
    struct OfflineCredentials;

    impl CredentialStore for OfflineCredentials {
        fn find_by_login(
            &self,
            _kind: PrincipalKind,
            _login: &str,
        ) -> till_models::prelude::Result<Option<Principal>> {
            Err(till_models::error::Error::Migration("store offline".into()))
        }

        fn find_by_id(&self, _id: i64) -> till_models::prelude::Result<Option<Principal>> {
            Err(till_models::error::Error::Migration("store offline".into()))
        }

        fn insert(&self, _principal: NewPrincipal) -> till_models::prelude::Result<Principal> {
            Err(till_models::error::Error::Migration("store offline".into()))
        }
    }

    #[test]
    fn store_faults_are_internal() {
        let service = SessionService::new(
            Arc::new(OfflineCredentials),
            Arc::new(MemoryStore::new()),
            config(None),
        )
        .unwrap();

        let err = service
            .authenticate(CUSTOMER, "bob", "s3cret")
            .unwrap_err();
        assert!(err.is_internal());

        let err = service
            .register(CUSTOMER, "bob", "s3cret", profile(""))
            .unwrap_err();
        assert!(err.is_internal());
    }
}
