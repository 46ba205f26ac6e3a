//! Password hashing.

mod password;

pub use password::{DEFAULT_HASH_COST, PasswordError, hash_password, hash_password_with_cost,
    verify_password};
