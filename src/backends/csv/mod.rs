// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Delimited-file connectors.

mod output;
mod parser;
mod paths;
mod source;

pub use output::CsvOutput;
pub use parser::parse_line;
pub use paths::{candidates, resolve};
pub use source::CsvSource;
