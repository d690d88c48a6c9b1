//! Turn Allure `*-result.json` files into a single portable HTML report,
//! patch the Allure landing page for `file://` viewing, and email the
//! result.

pub mod cli;
pub mod error;
pub mod logging;
pub mod mail;
pub mod paths;
pub mod report;
pub mod results;
pub mod site;

pub use error::{ReportError, Result};
