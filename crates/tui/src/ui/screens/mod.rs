pub mod login;
pub mod overview;
pub mod register;
pub mod transactions;
