// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::fmt;
use std::sync::Arc;

/// A key press fed to a debounced search box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keystroke {
    pub key: char,
    pub text: String,
}

impl Keystroke {
    pub fn new(key: char, text: impl Into<String>) -> Self {
        Self {
            key,
            text: text.into(),
        }
    }
}

pub fn keystroke_r() -> Keystroke {
    Keystroke::new('r', "r")
}

pub fn keystroke_ru() -> Keystroke {
    Keystroke::new('u', "ru")
}

pub fn keystroke_rust() -> Keystroke {
    Keystroke::new('t', "rust")
}

/// A receiver whose identity must survive a trip through a wrapper.
#[derive(Debug, PartialEq, Eq)]
pub struct Widget {
    pub name: String,
}

pub fn widget(name: &str) -> Arc<Widget> {
    Arc::new(Widget {
        name: name.to_string(),
    })
}

/// A receiver that runs a hook when it is dropped.
///
/// Used to check that wrappers never drop arguments while holding their own
/// lock: the hook is free to call back into the wrapper.
pub struct Teardown {
    pub id: u32,
    on_drop: Arc<dyn Fn() + Send + Sync>,
}

impl Teardown {
    pub fn new(id: u32, on_drop: Arc<dyn Fn() + Send + Sync>) -> Self {
        Self { id, on_drop }
    }
}

impl Drop for Teardown {
    fn drop(&mut self) {
        (self.on_drop)();
    }
}

impl fmt::Debug for Teardown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Teardown").field("id", &self.id).finish()
    }
}

/// Error returned by failing test targets.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Test error: {0}")]
pub struct TestError(pub String);

impl TestError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}
