//! Session context for the point of sale.
//!
//! Tracks the signed-in user and their company, persisting both to a
//! key-value store so a later process can restore the session. Also holds
//! the license activation state shown on the activation screen.

mod error;
mod license;
mod session;
mod user;

pub use error::AuthError;
pub use license::{License, TimeRemaining, LICENSE_KEY, LICENSE_TERM_DAYS};
pub use session::{SessionContext, COMPANY_KEY, DEFAULT_LOGIN_DELAY, USER_KEY};
pub use user::{user_counts, Company, Role, User, UserCounts};
