//! Gearbase Authz — the tenant-scoped authorization and quota engine.
//!
//! Sits between a request ("user U wants to do action A on tenant T's
//! resource R") and an allow/deny/quota-warn outcome. Authorization
//! outcomes are plain values, never raised as control flow, so callers
//! branch without exception handling.

pub mod context;
pub mod modules;
pub mod quota;
pub mod resolver;

pub use context::TenantContext;
pub use modules::{ModuleAccess, module_access, module_access_in};
pub use quota::{MessagingTier, QuotaStatus, UsageState, evaluate};
pub use resolver::{ActiveTenantCell, ResolutionState, SwitchTicket, TenantResolver};
