//! Repository abstractions for data access.

mod currency;
mod transaction;
mod user;

pub use currency::CurrencyRepository;
pub use transaction::{TransactionRepository, TransferError};
pub use user::{RegisterError, UserRepository};
