//! The narrative script: per-page copy, images, and action labels.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use lovenote_story::domain::gates::RevealGateSet;
use lovenote_story::domain::intents::Intent;
use lovenote_story::domain::page::{PAGE_COUNT, Page};
use lovenote_story::domain::policy::{self, Advancement};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::ContentError;

const BUILTIN_SCRIPT: &str = include_str!("../script/default.yaml");

/// An image reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Image {
    /// Where the image lives.
    pub url: String,
    /// Alternative text.
    pub alt: String,
}

/// Content shown only once the page's reveal gate is satisfied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Reveal {
    /// Image shown on reveal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<Image>,
    /// Lines shown on reveal.
    #[serde(default)]
    pub lines: Vec<String>,
}

/// The copy for one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PageContent {
    /// Which page this is.
    pub number: Page,
    /// Headline text.
    pub heading: String,
    /// Lines always shown.
    #[serde(default)]
    pub lines: Vec<String>,
    /// Image always shown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<Image>,
    /// Content behind the page's reveal gate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revealed: Option<Reveal>,
    /// Button labels keyed by intent.
    #[serde(default)]
    pub actions: BTreeMap<Intent, String>,
}

impl PageContent {
    /// The label for `intent`, if the script provides one.
    #[must_use]
    pub fn label(&self, intent: Intent) -> Option<&str> {
        self.actions.get(&intent).map(String::as_str)
    }
}

/// Script fields as written, before validation.
#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawScript {
    title: String,
    decline_feedback: String,
    pages: Vec<PageContent>,
}

/// A validated narrative script with exactly one entry per page.
///
/// Deserializing a `Script` runs the same validation as
/// [`Script::from_yaml`].
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "RawScript")]
pub struct Script {
    title: String,
    decline_feedback: String,
    pages: Vec<PageContent>,
    version_hash: String,
}

impl TryFrom<RawScript> for Script {
    type Error = ContentError;

    fn try_from(raw: RawScript) -> Result<Self, Self::Error> {
        validate(&raw.pages)?;
        let canonical = serde_json::to_vec(&raw)?;
        Ok(Self {
            title: raw.title,
            decline_feedback: raw.decline_feedback,
            pages: raw.pages,
            version_hash: format!("{:x}", Sha256::digest(&canonical)),
        })
    }
}

impl Script {
    /// Parses and validates a script from YAML source.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::Parse` if the YAML does not match the schema
    /// and `ContentError::Validation` if it does not describe the pages.
    pub fn from_yaml(source: &str) -> Result<Self, ContentError> {
        let raw: RawScript = serde_yaml::from_str(source)?;
        Self::try_from(raw)
    }

    /// Reads, parses, and validates a script file.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::Read` if the file cannot be read, otherwise as
    /// [`Script::from_yaml`].
    pub fn from_path(path: &Path) -> Result<Self, ContentError> {
        let source = std::fs::read_to_string(path).map_err(|source| ContentError::Read {
            path: path.to_owned(),
            source,
        })?;
        let script = Self::from_yaml(&source)?;
        debug!(path = %path.display(), version_hash = %script.version_hash, "loaded script");
        Ok(script)
    }

    /// The script bundled with the crate.
    ///
    /// # Errors
    ///
    /// Returns `ContentError` if the bundled script fails validation.
    pub fn builtin() -> Result<Self, ContentError> {
        Self::from_yaml(BUILTIN_SCRIPT)
    }

    /// The story title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Message shown when the doodle is declined.
    #[must_use]
    pub fn decline_feedback(&self) -> &str {
        &self.decline_feedback
    }

    /// Every page's content in order.
    #[must_use]
    pub fn pages(&self) -> &[PageContent] {
        &self.pages
    }

    /// The content for `page`.
    #[must_use]
    pub fn page(&self, page: Page) -> &PageContent {
        // Validation guarantees pages[n - 1] is page n.
        &self.pages[usize::from(page.number() - 1)]
    }

    /// Hex SHA-256 of the script's content. Formatting and comments in the
    /// source do not affect it.
    #[must_use]
    pub fn version_hash(&self) -> &str {
        &self.version_hash
    }
}

fn validate(pages: &[PageContent]) -> Result<(), ContentError> {
    if pages.len() != usize::from(PAGE_COUNT) {
        return Err(ContentError::Validation(format!(
            "expected {PAGE_COUNT} pages, found {}",
            pages.len()
        )));
    }
    for (content, expected) in pages.iter().zip(Page::ALL) {
        if content.number != expected {
            return Err(ContentError::Validation(format!(
                "page {expected} is out of order (found page {})",
                content.number
            )));
        }
        if content.heading.trim().is_empty() {
            return Err(ContentError::Validation(format!(
                "page {expected} has an empty heading"
            )));
        }
        let advancement = policy::advancement(expected);
        if content.revealed.is_some() && !matches!(advancement, Advancement::Gated(_)) {
            return Err(ContentError::Validation(format!(
                "page {expected} has revealed content but no reveal gate"
            )));
        }
        let allowed = allowed_intents(expected);
        if let Some(intent) = content.actions.keys().find(|i| !allowed.contains(*i)) {
            return Err(ContentError::Validation(format!(
                "page {expected} labels {intent}, which is never offered there"
            )));
        }
    }
    Ok(())
}

/// Every intent that can be offered on `page` in some gate state.
fn allowed_intents(page: Page) -> BTreeSet<Intent> {
    let mut allowed: BTreeSet<Intent> = policy::offered_intents(page, &RevealGateSet::new())
        .into_iter()
        .collect();
    if policy::advancement(page) != Advancement::Terminal {
        allowed.insert(Intent::Advance);
    }
    allowed
}
