// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

mod node;
mod validate;

pub const CRATE_NAME: &str = "sklad-schema";

pub use node::{SchemaError, SchemaNode};
pub use validate::Violation;
