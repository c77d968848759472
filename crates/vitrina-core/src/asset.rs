//! # Asset Decisions
//!
//! The per-field rule that decides what an asset-bearing field holds after
//! an admin write, and which AssetStore calls that implies.
//!
//! ## Decision Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 plan_asset(current, input, mode)                        │
//! │                                                                         │
//! │  input.upload present?                                                 │
//! │     YES ──► AssetPlan::Upload                                          │
//! │             replaced = current  (only in Replace mode, only if set)    │
//! │     NO                                                                  │
//! │      │                                                                  │
//! │  input.literal present and not blank?                                  │
//! │     YES ──► AssetPlan::Literal(literal)      no AssetStore call        │
//! │     NO                                                                  │
//! │      │                                                                  │
//! │      └──► AssetPlan::Keep(current or "")     no AssetStore call        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The rule is applied independently to every field: a slide with two
//! images gets two plans.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

// =============================================================================
// Asset Field
// =============================================================================

/// Every record field that holds an asset reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetField {
    ProductImage,
    SlideImage,
    SlideMobileImage,
    AboutImage,
    SiteLogo,
    SiteBackground,
}

impl AssetField {
    pub const fn as_str(&self) -> &'static str {
        match self {
            AssetField::ProductImage => "product image",
            AssetField::SlideImage => "slide image",
            AssetField::SlideMobileImage => "slide mobile image",
            AssetField::AboutImage => "about image",
            AssetField::SiteLogo => "site logo",
            AssetField::SiteBackground => "site background",
        }
    }
}

impl std::fmt::Display for AssetField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Inputs
// =============================================================================

/// A file received with an admin write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    /// Client-side file name; only its extension is used.
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl Upload {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Upload {
            file_name: file_name.into(),
            content_type: None,
            bytes: bytes.into(),
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// What the write request carried for one asset-bearing field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetInput {
    /// Newly uploaded binary.
    pub upload: Option<Upload>,
    /// Manually entered reference (URL typed into the form).
    pub literal: Option<String>,
}

impl AssetInput {
    /// Neither an upload nor a literal: the stored reference is preserved.
    pub fn none() -> Self {
        AssetInput::default()
    }

    pub fn upload(upload: Upload) -> Self {
        AssetInput {
            upload: Some(upload),
            literal: None,
        }
    }

    pub fn literal(reference: impl Into<String>) -> Self {
        AssetInput {
            upload: None,
            literal: Some(reference.into()),
        }
    }

    /// The literal exactly as supplied. Blank form fields count as absent.
    pub fn literal_reference(&self) -> Option<&str> {
        self.literal.as_deref().filter(|s| !s.trim().is_empty())
    }
}

// =============================================================================
// Plan
// =============================================================================

/// Whether the write creates a new record or replaces an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// First-time create: nothing is ever deleted.
    Create,
    /// Update of an existing record: an uploaded file supersedes the old one.
    Replace,
}

/// Outcome of [`plan_asset`] for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetPlan {
    /// Upload the new binary; delete `replaced` once the record is written.
    Upload { replaced: Option<String> },
    /// Store the literal verbatim.
    Literal(String),
    /// Leave the stored reference unchanged.
    Keep(String),
}

/// Decides the next value of an asset-bearing field.
///
/// `current` is the stored reference (None or empty when there is none).
pub fn plan_asset(current: Option<&str>, input: &AssetInput, mode: WriteMode) -> AssetPlan {
    let current = current.filter(|r| !r.trim().is_empty());

    if input.upload.is_some() {
        let replaced = match mode {
            WriteMode::Replace => current.map(str::to_string),
            WriteMode::Create => None,
        };
        return AssetPlan::Upload { replaced };
    }

    if let Some(literal) = input.literal_reference() {
        return AssetPlan::Literal(literal.to_string());
    }

    AssetPlan::Keep(current.unwrap_or_default().to_string())
}

// =============================================================================
// Unit Tests
// =============================================================================
