//! Tool dispatch tests against a mock DrugInfo upstream

mod dispatch;
mod reauth;
