//! Tenant resolution and the active-tenant cell.
//!
//! Resolution selects which tenant a request acts within; the cell tracks
//! the selection across tenant switches and drops results that arrive for
//! a tenant the user has already switched away from.

use std::sync::Mutex;
use std::sync::PoisonError;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;
use uuid::Uuid;

use gearbase_core::error::{GearbaseError, GearbaseResult};
use gearbase_core::identity::IdentityProvider;
use gearbase_core::models::user::User;
use gearbase_core::store::TenantDirectory;

use crate::context::TenantContext;

/// Resolves the active tenant for an identity snapshot.
pub struct TenantResolver<S: TenantDirectory> {
    directory: S,
}

impl<S: TenantDirectory> TenantResolver<S> {
    pub fn new(directory: S) -> Self {
        Self { directory }
    }

    /// Resolve the active tenant.
    ///
    /// With a requested id, the id must appear in the identity's
    /// memberships or the call fails with `TenantNotAuthorized`;
    /// super-admins may resolve any tenant id without a membership (a
    /// deliberate design point). Without a requested id the deterministic
    /// default membership is used (earliest `joined_at`, sequence order on
    /// ties). `Ok(None)` is the explicit no-tenant state for identities
    /// with no memberships.
    ///
    /// # Errors
    ///
    /// `TenantNotAuthorized` for a requested tenant outside the caller's
    /// memberships; store errors propagate unchanged.
    pub async fn resolve(
        &self,
        identity: &User,
        requested: Option<Uuid>,
    ) -> GearbaseResult<Option<TenantContext>> {
        let target = match requested {
            Some(id) => {
                if identity.membership_for(id).is_none() {
                    if !identity.is_super_admin {
                        return Err(GearbaseError::TenantNotAuthorized { tenant_id: id });
                    }
                    debug!(user = %identity.id, tenant = %id, "super-admin tenant bypass");
                }
                id
            }
            None => match identity.default_membership() {
                Some(m) => m.tenant_id,
                None => return Ok(None),
            },
        };

        let tenant = self.directory.get_tenant(target).await?;
        Ok(Some(TenantContext::for_user(identity, tenant)))
    }

    /// Resolve straight from the identity provider's current session.
    /// No active session is the same outcome as no memberships: the
    /// explicit no-tenant state.
    pub async fn resolve_current(
        &self,
        provider: &impl IdentityProvider,
        requested: Option<Uuid>,
    ) -> GearbaseResult<Option<TenantContext>> {
        match provider.current_user().await? {
            Some(identity) => self.resolve(&identity, requested).await,
            None => Ok(None),
        }
    }
}

/// Observable state of the active tenant. Resolution in flight is
/// `Loading`; completion yields either a context or the explicit
/// `NoTenant` state — never a silently empty value.
#[derive(Debug, Clone)]
pub enum ResolutionState {
    Loading,
    NoTenant,
    Ready(TenantContext),
}

/// Ticket tying an in-flight resolution to the switch that started it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwitchTicket(u64);

/// Holds the current [`ResolutionState`] behind an epoch counter.
///
/// Every switch bumps the epoch; a completion only applies while its
/// ticket is still current, so a fetch outstanding when the user switches
/// tenants can never flash stale cross-tenant data into the view.
pub struct ActiveTenantCell {
    epoch: AtomicU64,
    state: Mutex<ResolutionState>,
}

impl ActiveTenantCell {
    pub fn new() -> Self {
        Self {
            epoch: AtomicU64::new(0),
            state: Mutex::new(ResolutionState::NoTenant),
        }
    }

    /// Start a tenant switch: invalidates all outstanding tickets and
    /// moves the cell to `Loading`.
    pub fn begin(&self) -> SwitchTicket {
        let epoch = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        *self.lock() = ResolutionState::Loading;
        SwitchTicket(epoch)
    }

    /// Apply a resolution outcome. Returns `false` (and changes nothing)
    /// when the ticket is stale — a newer switch has started since.
    pub fn complete(&self, ticket: SwitchTicket, outcome: Option<TenantContext>) -> bool {
        if self.epoch.load(Ordering::SeqCst) != ticket.0 {
            debug!(epoch = ticket.0, "dropping stale tenant resolution");
            return false;
        }
        *self.lock() = match outcome {
            Some(ctx) => ResolutionState::Ready(ctx),
            None => ResolutionState::NoTenant,
        };
        true
    }

    pub fn snapshot(&self) -> ResolutionState {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ResolutionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ActiveTenantCell {
    fn default() -> Self {
        Self::new()
    }
}
