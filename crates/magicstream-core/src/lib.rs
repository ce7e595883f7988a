// Copyright (c) 2026 Roman Barinov <rbarinov@gmail.com>
// Licensed under the FSL-1.1-NC.

pub mod codec;
pub mod endpoints;
pub mod error;
pub mod models;
pub mod request;

pub use codec::RequestKey;
pub use error::{Error, Result};
pub use models::*;
pub use request::*;
