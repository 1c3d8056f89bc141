//! Page objects for the scooter rental app
//!
//! Each page borrows the session's driver and wait settings. Locator strings
//! live in `locators` submodules so they can be checked without a browser.

pub mod home;
pub mod order;

pub use home::HomePage;
pub use order::OrderPage;

/// XPath for an `<input>` identified by its placeholder text
pub(crate) fn input_by_placeholder(placeholder: &str) -> String {
    format!("//input[@placeholder='{}']", placeholder)
}
