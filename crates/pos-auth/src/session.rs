//! Session context: the signed-in user and company.

use crate::user::{Company, Role, User};
use crate::AuthError;
use pos_commerce::ids::{CompanyId, UserId};
use pos_store::{Cache, KeyValueStore};
use std::time::Duration;
use tracing::{debug, info};

/// Store key holding the signed-in user.
pub const USER_KEY: &str = "pos-user";

/// Store key holding the user's company.
pub const COMPANY_KEY: &str = "pos-company";

/// Simulated authentication latency.
pub const DEFAULT_LOGIN_DELAY: Duration = Duration::from_millis(1000);

/// Current user and company, mirrored to a key-value store.
///
/// Constructed empty; call [`restore`](Self::restore) to pick up a session
/// saved by an earlier process.
#[derive(Debug)]
pub struct SessionContext<S> {
    cache: Cache<S>,
    user: Option<User>,
    company: Option<Company>,
    login_delay: Duration,
}

impl<S: KeyValueStore> SessionContext<S> {
    pub fn new(store: S) -> Self {
        Self {
            cache: Cache::new(store),
            user: None,
            company: None,
            login_delay: DEFAULT_LOGIN_DELAY,
        }
    }

    /// Override the simulated login delay.
    pub fn with_login_delay(mut self, delay: Duration) -> Self {
        self.login_delay = delay;
        self
    }

    /// Load a saved session. Both the user and the company must be stored;
    /// a half-written session is ignored. Returns whether a session was restored.
    pub fn restore(&mut self) -> Result<bool, AuthError> {
        let user: Option<User> = self.cache.get(USER_KEY)?;
        let company: Option<Company> = self.cache.get(COMPANY_KEY)?;

        match (user, company) {
            (Some(user), Some(company)) => {
                debug!(user = %user.id, company = %company.id, "restored session");
                self.user = Some(user);
                self.company = Some(company);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Sign in.
    ///
    /// There is no credential check: any non-empty email and password
    /// succeed after the login delay and sign in as the store administrator.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<&User, AuthError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        tokio::time::sleep(self.login_delay).await;

        let company = default_company();
        let mut user = User::new(
            UserId::new("1"),
            email,
            "Administrador Principal",
            Role::Admin,
            company.id.clone(),
        );
        user.permissions = vec!["all".to_string()];

        self.cache.set(USER_KEY, &user)?;
        self.cache.set(COMPANY_KEY, &company)?;
        info!(user = %user.id, email = %user.email, "signed in");

        self.company = Some(company);
        Ok(&*self.user.insert(user))
    }

    /// Sign out, forgetting the session in memory and in the store.
    pub fn logout(&mut self) -> Result<(), AuthError> {
        if let Some(user) = self.user.take() {
            info!(user = %user.id, "signed out");
        }
        self.company = None;
        self.cache.delete(USER_KEY)?;
        self.cache.delete(COMPANY_KEY)?;
        Ok(())
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn company(&self) -> Option<&Company> {
        self.company.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// The signed-in user, or [`AuthError::NotAuthenticated`].
    pub fn require_user(&self) -> Result<&User, AuthError> {
        self.user.as_ref().ok_or(AuthError::NotAuthenticated)
    }

    pub fn cache(&self) -> &Cache<S> {
        &self.cache
    }
}

fn default_company() -> Company {
    Company {
        id: CompanyId::new("company-1"),
        name: "Mi Empresa POS".to_string(),
        rfc: "XAXX010101000".to_string(),
        address: "Av. Principal 123, Ciudad, Estado".to_string(),
        tax_regime: "Régimen General de Ley Personas Morales".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pos_store::{FileStore, MemoryStore};

    #[tokio::test(start_paused = true)]
    async fn test_login_waits_and_persists() {
        let mut session = SessionContext::new(MemoryStore::new());
        let started = tokio::time::Instant::now();

        let user = session.login("admin@empresa.com", "123456").await.unwrap();
        assert_eq!(user.email, "admin@empresa.com");
        assert_eq!(user.role, Role::Admin);
        assert!(started.elapsed() >= DEFAULT_LOGIN_DELAY);

        assert!(session.cache().exists(USER_KEY).unwrap());
        assert!(session.cache().exists(COMPANY_KEY).unwrap());
        assert_eq!(session.company().unwrap().rfc, "XAXX010101000");
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_credentials_rejected() {
        let mut session = SessionContext::new(MemoryStore::new());
        let err = session.login("", "123456").await.unwrap_err();
        assert!(matches!(err, AuthError::MissingCredentials));
        let err = session.login("admin@empresa.com", "").await.unwrap_err();
        assert!(err.is_input_error());
        assert!(!session.is_authenticated());
        assert!(session.cache().keys().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_logout_clears_store() {
        let mut session = SessionContext::new(MemoryStore::new());
        session.login("admin@empresa.com", "123456").await.unwrap();
        session.logout().unwrap();

        assert!(session.user().is_none());
        assert!(session.company().is_none());
        assert!(!session.cache().exists(USER_KEY).unwrap());
        assert!(!session.cache().exists(COMPANY_KEY).unwrap());
        assert!(matches!(
            session.require_user(),
            Err(AuthError::NotAuthenticated)
        ));
    }

    #[tokio::test]
    async fn test_restore_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let mut first = SessionContext::new(FileStore::open(&path).unwrap())
            .with_login_delay(Duration::ZERO);
        first.login("maria@empresa.com", "secret").await.unwrap();

        let mut second = SessionContext::new(FileStore::open(&path).unwrap());
        assert!(second.restore().unwrap());
        assert_eq!(second.user().unwrap().email, "maria@empresa.com");
        assert_eq!(second.company().unwrap().name, "Mi Empresa POS");
    }

    #[test]
    fn test_restore_requires_both_keys() {
        let mut session = SessionContext::new(MemoryStore::new());
        let user = User::new("1", "admin@empresa.com", "Admin", Role::Admin, "company-1");
        session.cache().set(USER_KEY, &user).unwrap();

        assert!(!session.restore().unwrap());
        assert!(!session.is_authenticated());
    }
}
