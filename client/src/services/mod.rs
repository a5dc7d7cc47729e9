// client/src/services/mod.rs

//! Remote collaborators behind traits: the REST backend, the identity
//! provider and the notification provider.

pub mod backend;
pub mod identity;
pub mod notifications;

pub use backend::{MarketplaceApi, RestBackend};
pub use identity::{AuthUser, IdentityProvider, LocalIdentityProvider, RestIdentityProvider};
pub use notifications::{InProcessNotifier, LocalNotification, Notifier};
