use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("name is required")]
    EmptyName,
    #[error("invalid cpf: {0}")]
    InvalidCpf(String),
    #[error("invalid cep: {0}")]
    InvalidCep(String),
    #[error("invalid email: {0}")]
    InvalidEmail(String),
}
