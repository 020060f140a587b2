//! Terminal front end: one module per command plus shared presentation
//! helpers.

pub mod crypto;
pub mod currencies;
pub mod exchange;
pub mod glossary;
pub mod quiz;
pub mod setup;
pub mod tax;
pub mod theme;
pub mod trade;
pub mod ui;
pub mod watch;
