pub mod account;
pub mod order;
pub mod password;
pub mod registration;
pub mod review;
pub mod token;
pub mod verification;
