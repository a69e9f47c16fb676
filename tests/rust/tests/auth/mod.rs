//! Credential session tests against a mock login endpoint

mod lifecycle;
mod login;
