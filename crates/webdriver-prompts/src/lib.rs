// Copyright 2026 Paul Adamson
// Licensed under the Apache License, Version 2.0

//! webdriver-prompts: Element Send Keys vs. user prompts, as a conformance suite
//!
//! Checks how a WebDriver remote end handles `POST
//! /session/{id}/element/{id}/value` while an alert, confirm or prompt is
//! open, under every `unhandledPromptBehavior` value and with the capability
//! unset.
//!
//! # Examples
//!
//! ## Running the whole table
//!
//! ```ignore
//! use webdriver_prompts::{SuiteOptions, run_suite};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let options = SuiteOptions::new().webdriver_url("http://127.0.0.1:4444");
//!     let report = run_suite(&options).await?;
//!     println!("{}", report);
//!     assert!(report.is_success());
//!     Ok(())
//! }
//! ```
//!
//! ## Running one check by hand
//!
//! ```ignore
//! use webdriver_prompts::{Capabilities, Check, DialogKind, HttpTransport, Poll, Retval, Session};
//! use webdriver_prompts::UnhandledPromptBehavior;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let transport = HttpTransport::new("http://127.0.0.1:4444")?;
//!     let caps = Capabilities::new()
//!         .unhandled_prompt_behavior(Some(UnhandledPromptBehavior::Accept));
//!     let session = Session::new(transport, &caps).await?;
//!
//!     Check::ClosedWithoutException { retval: Retval::Bool(true) }
//!         .run(&session, DialogKind::Confirm, &Poll::default())
//!         .await?;
//!
//!     session.delete().await?;
//!     Ok(())
//! }
//! ```

pub mod alert;
pub mod api;
pub mod asserts;
pub mod checks;
pub mod element;
mod error;
pub mod fixtures;
pub mod protocol;
pub mod scenarios;
pub mod session;
pub mod transport;

// Re-export error types
pub use error::{Error, Result};

// Re-export configuration
pub use api::{DEFAULT_WEBDRIVER_URL, SuiteOptions};

// Re-export client surface
pub use alert::Alert;
pub use element::Element;
pub use session::{RemoteStatus, Session};
pub use transport::{HttpTransport, Response};

// Re-export protocol vocabulary
pub use protocol::{Capabilities, DialogKind, ErrorStatus, Retval, UnhandledPromptBehavior};

// Re-export the suite
pub use checks::{Check, element_send_keys};
pub use fixtures::Poll;
pub use scenarios::{Scenario, ScenarioResult, SuiteReport, run_scenario, run_suite, table};
