// Copyright (c) 2026 Roman Barinov <rbarinov@gmail.com>
// Licensed under the FSL-1.1-NC.

/// Moves the user to another route. Only used when the session cannot be
/// recovered.
pub trait Navigator: Send + Sync {
    fn redirect_to(&self, path: &str);
}
