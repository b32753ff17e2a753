use crate::error::{LookupError, Result};
use crate::source::Address;
use cadastro_core::{strip_digits, CEP_LEN};
use serde::Deserialize;

/// Strips mask punctuation and insists on exactly 8 digits before any
/// request goes out.
pub fn normalize_cep(raw: &str) -> Result<String> {
    let stripped = strip_digits(raw);
    if stripped.len() != CEP_LEN {
        return Err(LookupError::InvalidCep(raw.to_string()));
    }
    Ok(stripped)
}

// ViaCEP signals an unknown code with an `erro` key; depending on API
// version its value is the boolean true or the string "true".
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorFlag {
    Bool(bool),
    Text(String),
}

impl ErrorFlag {
    fn is_set(&self) -> bool {
        match self {
            ErrorFlag::Bool(value) => *value,
            ErrorFlag::Text(value) => value == "true",
        }
    }
}

#[derive(Debug, Deserialize)]
struct ViaCepPayload {
    erro: Option<ErrorFlag>,
    #[serde(default)]
    logradouro: String,
    #[serde(default)]
    bairro: String,
    #[serde(default)]
    localidade: String,
    #[serde(default)]
    uf: String,
}

/// Parses a ViaCEP response body. Split out of the HTTP path so it can be
/// exercised without a network.
pub fn parse_response(body: &str) -> Result<Option<Address>> {
    let payload: ViaCepPayload =
        serde_json::from_str(body).map_err(|err| LookupError::Parse(err.to_string()))?;
    if payload.erro.as_ref().is_some_and(ErrorFlag::is_set) {
        return Ok(None);
    }
    Ok(Some(Address {
        street: payload.logradouro,
        neighborhood: payload.bairro,
        city: payload.localidade,
        region: payload.uf,
    }))
}

#[cfg(feature = "viacep")]
mod imp {
    use super::{normalize_cep, parse_response};
    use crate::error::Result;
    use crate::source::{Address, CepLookup};
    use reqwest::blocking::Client;
    use std::time::Duration;
    use url::Url;

    #[derive(Debug, Clone)]
    pub struct ViaCep {
        base_url: String,
        user_agent: Option<String>,
    }

    impl ViaCep {
        pub fn new(base_url: impl Into<String>) -> Self {
            Self {
                base_url: base_url.into(),
                user_agent: None,
            }
        }

        pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
            self.user_agent = Some(user_agent.into());
            self
        }
    }

    impl CepLookup for ViaCep {
        fn source_name(&self) -> &'static str {
            "viacep"
        }

        fn lookup(&self, cep: &str) -> Result<Option<Address>> {
            let cep = normalize_cep(cep)?;
            let url = Url::parse(&format!(
                "{}/{}/json/",
                self.base_url.trim_end_matches('/'),
                cep
            ))?;
            let client = Client::builder()
                .user_agent(self.user_agent.as_deref().unwrap_or("cadastro"))
                .timeout(Duration::from_secs(30))
                .connect_timeout(Duration::from_secs(10))
                .build()?;
            let body = client.get(url).send()?.error_for_status()?.text()?;
            parse_response(&body)
        }
    }
}

#[cfg(feature = "viacep")]
pub use imp::ViaCep;

#[cfg(test)]
mod tests {
    use super::{normalize_cep, parse_response};
    use crate::error::LookupError;

    #[test]
    fn normalize_cep_strips_mask() {
        assert_eq!(normalize_cep("01310-100").expect("valid"), "01310100");
    }

    #[test]
    fn normalize_cep_rejects_wrong_digit_count() {
        assert!(matches!(
            normalize_cep("0131010"),
            Err(LookupError::InvalidCep(_))
        ));
        assert!(matches!(normalize_cep(""), Err(LookupError::InvalidCep(_))));
    }

    #[test]
    fn parse_response_maps_address_fields() {
        let body = r#"{
            "cep": "01310-100",
            "logradouro": "Avenida Paulista",
            "complemento": "de 612 a 1510 - lado par",
            "bairro": "Bela Vista",
            "localidade": "Sao Paulo",
            "uf": "SP",
            "ibge": "3550308"
        }"#;
        let address = parse_response(body).expect("parse").expect("found");
        assert_eq!(address.street, "Avenida Paulista");
        assert_eq!(address.neighborhood, "Bela Vista");
        assert_eq!(address.city, "Sao Paulo");
        assert_eq!(address.region, "SP");
    }

    #[test]
    fn parse_response_treats_erro_as_not_found() {
        assert_eq!(parse_response(r#"{"erro": true}"#).expect("parse"), None);
        assert_eq!(parse_response(r#"{"erro": "true"}"#).expect("parse"), None);
    }

    #[test]
    fn parse_response_rejects_malformed_body() {
        assert!(matches!(
            parse_response("<html>not json</html>"),
            Err(LookupError::Parse(_))
        ));
    }
}
