// Copyright 2026 Paul Adamson
// Licensed under the Apache License, Version 2.0
//
// WebDriver protocol vocabulary
//
// Wire-level types shared by the client commands, the asserts and the
// scenario table. Error statuses and the element reference key come from the
// `webdriver` crate.

pub mod capabilities;
pub mod dialog;

pub use capabilities::{Capabilities, UNHANDLED_PROMPT_BEHAVIOR, UnhandledPromptBehavior};
pub use dialog::{DialogKind, Retval};
pub use webdriver::common::ELEMENT_KEY;
pub use webdriver::error::ErrorStatus;
