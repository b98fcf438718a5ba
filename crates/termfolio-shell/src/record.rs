//! Typed command output.
//!
//! Every executed command yields an ordered sequence of [`ResultRecord`]s;
//! the order is the display order. Records serialize to JSON for the
//! presentation boundary.

use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use termfolio_vfs::Node;

/// Display class of one output record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordKind {
    /// Recovered failure (the session stays interactive)
    Error,
    /// Completed operation
    Success,
    /// Plain output lines
    Info,
    /// Alarming-but-harmless output
    Warning,
    /// Instruction to the presentation layer (clear screen, end session)
    SystemNote,
}

/// Record payload: free text or a structured directory listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Payload {
    /// One block of text (may contain newlines)
    Text(String),
    /// A directory listing for the presentation layer to lay out
    Listing(Vec<ListingEntry>),
}

/// One entry of a structured listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingEntry {
    /// Entry name
    pub name: String,
    /// Is this a directory?
    pub is_dir: bool,
    /// Ten-character mode string (`d` or `-` plus the rwx triplets)
    pub mode: String,
    /// Owner identity
    pub owner: String,
    /// Group identity
    pub group: String,
    /// Apparent size in bytes (fixed 4096 for directories)
    pub size: u64,
    /// Last modified (ms since epoch)
    pub modified_at: u64,
}

impl ListingEntry {
    /// Build an entry from a named node. Sizes are computed from the
    /// English content variant so a locale switch never changes listings.
    pub fn from_node(name: &str, node: &Node) -> Self {
        let mut mode = String::with_capacity(10);
        mode.push(if node.is_directory() { 'd' } else { '-' });
        mode.push_str(node.mode().as_str());
        let size = match node {
            Node::File(f) => f.lines.en.iter().map(|l| l.len() as u64 + 1).sum(),
            Node::Directory(_) => 4096,
        };
        Self {
            name: String::from(name),
            is_dir: node.is_directory(),
            mode,
            owner: String::from(node.owner()),
            group: String::from(node.group()),
            size,
            modified_at: node.modified_at(),
        }
    }
}

/// One typed unit of command output.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    /// Display class
    pub kind: RecordKind,
    /// Content
    pub payload: Payload,
}

impl ResultRecord {
    /// SystemNote payload asking the presentation layer to clear.
    pub const CLEAR_SCREEN: &'static str = "clear";
    /// SystemNote payload asking the presentation layer to end the session.
    pub const END_SESSION: &'static str = "logout";

    fn text_record(kind: RecordKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            payload: Payload::Text(text.into()),
        }
    }

    /// A recovered error.
    pub fn error(text: impl Into<String>) -> Self {
        Self::text_record(RecordKind::Error, text)
    }

    /// A completed operation.
    pub fn success(text: impl Into<String>) -> Self {
        Self::text_record(RecordKind::Success, text)
    }

    /// Plain output.
    pub fn info(text: impl Into<String>) -> Self {
        Self::text_record(RecordKind::Info, text)
    }

    /// Alarming output.
    pub fn warning(text: impl Into<String>) -> Self {
        Self::text_record(RecordKind::Warning, text)
    }

    /// A presentation instruction.
    pub fn note(text: impl Into<String>) -> Self {
        Self::text_record(RecordKind::SystemNote, text)
    }

    /// A structured listing.
    pub fn listing(entries: Vec<ListingEntry>) -> Self {
        Self {
            kind: RecordKind::Success,
            payload: Payload::Listing(entries),
        }
    }

    /// The text payload, if this is a text record.
    pub fn text(&self) -> Option<&str> {
        match &self.payload {
            Payload::Text(s) => Some(s),
            Payload::Listing(_) => None,
        }
    }

    /// The listing payload, if this is a listing record.
    pub fn entries(&self) -> Option<&[ListingEntry]> {
        match &self.payload {
            Payload::Listing(entries) => Some(entries),
            Payload::Text(_) => None,
        }
    }

    /// JSON form for the presentation boundary.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_constructors_set_kind() {
        assert_eq!(ResultRecord::error("x").kind, RecordKind::Error);
        assert_eq!(ResultRecord::success("x").kind, RecordKind::Success);
        assert_eq!(ResultRecord::info("x").kind, RecordKind::Info);
        assert_eq!(ResultRecord::warning("x").kind, RecordKind::Warning);
        assert_eq!(ResultRecord::note("x").kind, RecordKind::SystemNote);
    }

    #[test]
    fn test_payload_accessors() {
        let record = ResultRecord::info("hello");
        assert_eq!(record.text(), Some("hello"));
        assert!(record.entries().is_none());

        let listing = ResultRecord::listing(vec![]);
        assert!(listing.text().is_none());
        assert_eq!(listing.entries(), Some(&[][..]));
    }

    #[test]
    fn test_json_roundtrip() {
        let record = ResultRecord::error("cat: x: No such file or directory");
        let json = record.to_json();
        let back: ResultRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
