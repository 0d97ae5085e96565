//! Identity provider seam.
//!
//! Credentials, sessions, and sign-in flows live in an external provider.
//! This engine only consumes an already-authenticated [`User`] snapshot.

use crate::error::GearbaseResult;
use crate::models::user::User;

pub trait IdentityProvider: Send + Sync {
    /// The signed-in user, or `None` when no session is active.
    fn current_user(&self) -> impl Future<Output = GearbaseResult<Option<User>>> + Send;

    fn sign_out(&self) -> impl Future<Output = GearbaseResult<()>> + Send;
}
