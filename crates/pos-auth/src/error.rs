//! Authentication errors.

use thiserror::Error;

/// Authentication error type.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Email or password left blank.
    #[error("email and password are required")]
    MissingCredentials,

    /// License name or key left blank.
    #[error("license name and key are required")]
    MissingLicenseFields,

    /// No user is signed in.
    #[error("not signed in")]
    NotAuthenticated,

    /// Session store failure.
    #[error("store error: {0}")]
    Store(#[from] pos_store::StoreError),
}

impl AuthError {
    /// Whether the error comes from user input rather than the store.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            AuthError::MissingCredentials | AuthError::MissingLicenseFields
        )
    }
}
