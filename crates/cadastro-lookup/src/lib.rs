pub mod error;
pub mod source;
pub mod viacep;

pub use error::{LookupError, Result};
pub use source::{Address, CepLookup};
#[cfg(feature = "viacep")]
pub use viacep::ViaCep;
