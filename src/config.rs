//! Controller configuration
//!
//! Configuration arrives as JSON, either inline from the host or from a file.
//! Every field has a default so partial documents are fine.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::keyboard::Layout;

/// Open animation of a freshly shown keyboard
pub const DEFAULT_OPEN_ANIM_HINT: &str = "bottom_to_top";
/// Animation used when the host window has to move out of the way
pub const DEFAULT_SHIFT_ANIM_HINT: &str = "vtranslate";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Window resource names overriding [`Layout::default_name`]
    pub keyboards: HashMap<Layout, String>,
    pub open_anim_hint: String,
    pub close_anim_hint: String,
    /// Open and close hint used instead of the two above when the host
    /// window is shifted
    pub shift_anim_hint: String,
    /// Keep the keyboard around for one idle tick after focus loss
    pub defer_close: bool,
    /// Initial state of the keyboard's action button
    pub action_button: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            keyboards: HashMap::new(),
            open_anim_hint: DEFAULT_OPEN_ANIM_HINT.to_string(),
            close_anim_hint: String::new(),
            shift_anim_hint: DEFAULT_SHIFT_ANIM_HINT.to_string(),
            defer_close: true,
            action_button: true,
        }
    }
}

impl Config {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("invalid input method config")
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("while loading {}", path.display()))
    }

    /// Window resource name to open for `layout`
    pub fn keyboard_name(&self, layout: Layout) -> &str {
        self.keyboards
            .get(&layout)
            .map(String::as_str)
            .unwrap_or_else(|| layout.default_name())
    }
}
