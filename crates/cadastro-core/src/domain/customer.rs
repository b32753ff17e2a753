use crate::domain::cep::CEP_LEN;
use crate::domain::cpf::{is_valid_cpf, CPF_LEN};
use crate::domain::email::is_valid_email;
use crate::domain::ids::CustomerId;
use crate::error::CoreError;
use serde::{Deserialize, Serialize};

/// A persisted registry record. Identifier fields (`cpf`, `cep`) hold
/// digits only; display masking is applied at the edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub cpf: String,
    pub email: String,
    pub phone: String,
    pub cep: String,
    pub street: String,
    pub number: String,
    pub complement: String,
    pub neighborhood: String,
    pub city: String,
    pub region: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Customer {
    /// Record-level invariants enforced right before a write. Callers are
    /// expected to have run form validation first; this is the store's
    /// last line of defense against unnormalized data.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.name.trim().is_empty() {
            return Err(CoreError::EmptyName);
        }
        if self.cpf.len() != CPF_LEN
            || !self.cpf.chars().all(|ch| ch.is_ascii_digit())
            || !is_valid_cpf(&self.cpf)
        {
            return Err(CoreError::InvalidCpf(self.cpf.clone()));
        }
        if self.cep.len() != CEP_LEN || !self.cep.chars().all(|ch| ch.is_ascii_digit()) {
            return Err(CoreError::InvalidCep(self.cep.clone()));
        }
        if !is_valid_email(&self.email) {
            return Err(CoreError::InvalidEmail(self.email.clone()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Customer;
    use crate::domain::ids::CustomerId;
    use crate::error::CoreError;

    fn sample() -> Customer {
        Customer {
            id: CustomerId::new(),
            name: "Ada Lovelace".to_string(),
            cpf: "11144477735".to_string(),
            email: "ada@example.com".to_string(),
            phone: "11987654321".to_string(),
            cep: "01310100".to_string(),
            street: "Avenida Paulista".to_string(),
            number: "1000".to_string(),
            complement: String::new(),
            neighborhood: "Bela Vista".to_string(),
            city: "Sao Paulo".to_string(),
            region: "SP".to_string(),
            created_at: 1_700_000_000,
            updated_at: 1_700_000_000,
        }
    }

    #[test]
    fn validate_accepts_normalized_record() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn validate_rejects_masked_cpf() {
        let mut customer = sample();
        customer.cpf = "111.444.777-35".to_string();
        assert_eq!(
            customer.validate(),
            Err(CoreError::InvalidCpf("111.444.777-35".to_string()))
        );
    }

    #[test]
    fn validate_rejects_blank_name() {
        let mut customer = sample();
        customer.name = "   ".to_string();
        assert_eq!(customer.validate(), Err(CoreError::EmptyName));
    }

    #[test]
    fn validate_rejects_short_cep() {
        let mut customer = sample();
        customer.cep = "0131010".to_string();
        assert!(matches!(customer.validate(), Err(CoreError::InvalidCep(_))));
    }
}
