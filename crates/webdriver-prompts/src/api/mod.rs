// Copyright 2026 Paul Adamson
// Licensed under the Apache License, Version 2.0

pub mod suite_options;

pub use suite_options::{DEFAULT_WEBDRIVER_URL, SuiteOptions};
