//! Scooter Rental E2E Test Suite
//!
//! This crate drives a real browser over WebDriver against the scooter rental
//! web app and checks two user flows:
//! - the FAQ accordion reveals the right answer for every question
//! - the two-step order form ends in the confirmation dialog
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    E2E Test Runner (Rust)                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  TestRunner                                                 │
//! │    ├── DriverEndpoint::start() -> local or remote WebDriver │
//! │    ├── BrowserSession::open()  -> home page, cookies gone   │
//! │    ├── flows::faq_answer / flows::place_order               │
//! │    └── BrowserSession::quit()  (always)                     │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Pages                                                      │
//! │    ├── HomePage  { cookies, FAQ accordion, order buttons }  │
//! │    └── OrderPage { step one, step two, confirmation }       │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Scenarios (YAML)                                           │
//! │    ├── faq:    [{ index, expected_answer }]                 │
//! │    └── orders: [{ entry, customer, rental }]                │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod driver;
pub mod error;
pub mod flows;
pub mod pages;
pub mod runner;
pub mod scenario;
pub mod session;
pub mod wait;

pub use config::SuiteConfig;
pub use error::{E2eError, E2eResult};
pub use runner::TestRunner;
pub use scenario::{FaqCase, OrderCase, ScenarioFile};
pub use session::BrowserSession;
