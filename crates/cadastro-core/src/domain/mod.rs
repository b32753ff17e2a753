pub mod cep;
pub mod cpf;
pub mod customer;
pub mod digits;
pub mod email;
pub mod ids;
pub mod phone;

pub use cep::{mask_cep, CEP_LEN};
pub use cpf::{is_valid_cpf, mask_cpf, CPF_LEN};
pub use customer::Customer;
pub use digits::strip_digits;
pub use email::is_valid_email;
pub use ids::CustomerId;
pub use phone::mask_phone;
