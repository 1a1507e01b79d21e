//! Wikilink text
//!
//! ```text
//! ![[folder/Notes.pdf#page=5&offset=100,200,|see here]]
//! │   └─── path ───────┘└─── subpath ────────┘└ alias ┘
//! └ embed marker
//! ```

use std::fmt;
use std::str::FromStr;

use super::LinkError;
use crate::destination::{encode, DestinationRecord};

const LINK_PREFIX: &str = "[[";
const EMBED_PREFIX: &str = "![[";
const SUFFIX: &str = "]]";

/// Parsed `[[path#subpath|alias]]` link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wikilink {
    /// Link path, empty for a same-file link
    pub path: String,
    /// Text after the first `#`, without the `#`
    pub subpath: Option<String>,
    /// Display alias after `|`
    pub alias: Option<String>,
    /// `![[...]]` form
    pub embed: bool,
}

impl Wikilink {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            subpath: None,
            alias: None,
            embed: false,
        }
    }

    /// Link to `path` carrying `destination` as its subpath
    pub fn to_destination(path: impl Into<String>, destination: &DestinationRecord) -> Self {
        let token = encode(destination);
        Self {
            subpath: Some(token.trim_start_matches('#').to_string()),
            ..Self::new(path)
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn embedded(mut self) -> Self {
        self.embed = true;
        self
    }
}

impl FromStr for Wikilink {
    type Err = LinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let (embed, prefix_len) = if text.starts_with(EMBED_PREFIX) {
            (true, EMBED_PREFIX.len())
        } else if text.starts_with(LINK_PREFIX) {
            (false, LINK_PREFIX.len())
        } else {
            return Err(LinkError::MalformedWikilink(s.to_string()));
        };

        if !text.ends_with(SUFFIX) || text.len() < prefix_len + SUFFIX.len() {
            return Err(LinkError::MalformedWikilink(s.to_string()));
        }
        let inner = &text[prefix_len..text.len() - SUFFIX.len()];

        let (target, alias) = match inner.split_once('|') {
            Some((target, alias)) => (target, Some(alias.to_string())),
            None => (inner, None),
        };
        let (path, subpath) = match target.split_once('#') {
            Some((path, subpath)) => (path, Some(subpath.to_string())),
            None => (target, None),
        };

        Ok(Self {
            path: path.trim().to_string(),
            subpath,
            alias,
            embed,
        })
    }
}

impl fmt::Display for Wikilink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.embed {
            write!(f, "!")?;
        }
        write!(f, "{}{}", LINK_PREFIX, self.path)?;
        if let Some(ref subpath) = self.subpath {
            write!(f, "#{}", subpath)?;
        }
        if let Some(ref alias) = self.alias {
            write!(f, "|{}", alias)?;
        }
        write!(f, "{}", SUFFIX)
    }
}
