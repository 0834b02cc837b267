//! Auth-domain identifiers, scope lists, secrets, and token grants.

pub mod grant;
pub mod id;
pub mod scope;
pub mod secret;

pub use grant::*;
pub use id::*;
pub use scope::*;
pub use secret::*;
