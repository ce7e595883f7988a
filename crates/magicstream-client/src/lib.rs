// Copyright (c) 2026 Roman Barinov <rbarinov@gmail.com>
// Licensed under the FSL-1.1-NC.

pub mod client;
pub mod config;
pub mod gateway;
pub mod navigator;
pub mod pending;
pub mod services;
pub mod session;
pub mod transport;


pub use client::MagicStreamClient;
pub use gateway::{Gateway, RefreshPolicy, RequestAttempt};
