use crate::Result;
use serde::{Deserialize, Serialize};

/// Address fields resolved from a postal code. These land directly in the
/// corresponding form fields on the caller's side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub neighborhood: String,
    pub city: String,
    pub region: String,
}

/// Seam for postal-code resolution so callers and tests can swap the real
/// HTTP client for a canned implementation. `Ok(None)` means the code is
/// well formed but unknown to the service.
pub trait CepLookup {
    fn source_name(&self) -> &'static str;
    fn lookup(&self, cep: &str) -> Result<Option<Address>>;
}
