pub mod customers;

pub use customers::CustomersRepo;
