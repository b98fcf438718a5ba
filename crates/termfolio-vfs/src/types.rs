//! Core types for the VFS layer.
//!
//! Defines Node, Mode, and the locale-variant file content container.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::VfsError;

/// Supported content locales.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Locale {
    /// English (default)
    #[default]
    En,
    /// Simplified Chinese
    Zh,
}

impl Locale {
    /// Two-letter code as accepted by the `lang` command.
    pub fn code(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Zh => "zh",
        }
    }

    /// Parse a two-letter locale code.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "en" => Some(Locale::En),
            "zh" => Some(Locale::Zh),
            _ => None,
        }
    }
}

/// Access kinds tested against a permission triplet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessKind {
    /// Read contents (file lines, directory listing)
    Read,
    /// Write/modify (always simulated at the shell layer)
    Write,
    /// Execute/traverse
    Execute,
}

impl AccessKind {
    /// Offset of this kind's bit within a triplet.
    pub fn offset(&self) -> usize {
        match self {
            AccessKind::Read => 0,
            AccessKind::Write => 1,
            AccessKind::Execute => 2,
        }
    }
}

/// Which column of the mode string applies to an actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PermClass {
    /// Actor is the node owner
    Owner,
    /// Actor shares the node group
    Group,
    /// Everyone else
    Other,
}

impl PermClass {
    /// Base offset of this column's triplet within the mode string.
    pub fn base(&self) -> usize {
        match self {
            PermClass::Owner => 0,
            PermClass::Group => 3,
            PermClass::Other => 6,
        }
    }
}

/// Unix-style permission mode: exactly nine characters drawn from
/// `{r,w,x,-}` in owner/group/other triplet order, e.g. `rwxr-xr--`.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Mode([u8; 9]);

impl Mode {
    /// Parse a nine-character mode string, validating position classes.
    pub fn parse(s: &str) -> Result<Self, VfsError> {
        let bytes = s.as_bytes();
        if bytes.len() != 9 {
            return Err(VfsError::invalid_mode(s));
        }
        let mut out = [0u8; 9];
        for (i, &b) in bytes.iter().enumerate() {
            let expected = match i % 3 {
                0 => b'r',
                1 => b'w',
                _ => b'x',
            };
            if b != expected && b != b'-' {
                return Err(VfsError::invalid_mode(s));
            }
            out[i] = b;
        }
        Ok(Mode(out))
    }

    /// Parse a three-digit octal mode such as `755`.
    pub fn parse_octal(s: &str) -> Result<Self, VfsError> {
        let bytes = s.as_bytes();
        if bytes.len() != 3 || !bytes.iter().all(|b| (b'0'..=b'7').contains(b)) {
            return Err(VfsError::invalid_mode(s));
        }
        let mut out = [b'-'; 9];
        for (i, &b) in bytes.iter().enumerate() {
            let digit = b - b'0';
            if digit & 0b100 != 0 {
                out[i * 3] = b'r';
            }
            if digit & 0b010 != 0 {
                out[i * 3 + 1] = b'w';
            }
            if digit & 0b001 != 0 {
                out[i * 3 + 2] = b'x';
            }
        }
        Ok(Mode(out))
    }

    /// Whether the given column grants the given access kind.
    pub fn allows(&self, class: PermClass, kind: AccessKind) -> bool {
        self.0[class.base() + kind.offset()] != b'-'
    }

    /// The mode as its nine-character string form.
    pub fn as_str(&self) -> &str {
        // Always ASCII by construction
        match core::str::from_utf8(&self.0) {
            Ok(s) => s,
            Err(_) => "---------",
        }
    }

    // Fixed modes used by the bootstrap tree. Literals are validated by the
    // constructors' position rules in tests.

    /// `rwxr-xr-x`
    pub fn dir_public() -> Self {
        Mode(*b"rwxr-xr-x")
    }

    /// `rwxr-x---`
    pub fn dir_group() -> Self {
        Mode(*b"rwxr-x---")
    }

    /// `rw-r--r--`
    pub fn file_public() -> Self {
        Mode(*b"rw-r--r--")
    }

    /// `rw-r-----`
    pub fn file_group() -> Self {
        Mode(*b"rw-r-----")
    }

    /// `rw-------`
    pub fn file_private() -> Self {
        Mode(*b"rw-------")
    }
}

impl core::fmt::Display for Mode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::fmt::Debug for Mode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Mode({})", self.as_str())
    }
}

impl Serialize for Mode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Mode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Mode::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// File content with one ordered line set per supported locale.
///
/// Locales without their own variant fall back to English, so `get` is
/// total for every file in the tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedLines {
    /// English lines (always present)
    pub en: Vec<String>,
    /// Simplified Chinese lines (empty = fall back to English)
    pub zh: Vec<String>,
}

impl LocalizedLines {
    /// Content available in English only.
    pub fn single(en: Vec<String>) -> Self {
        Self { en, zh: Vec::new() }
    }

    /// Content with both locale variants.
    pub fn bilingual(en: Vec<String>, zh: Vec<String>) -> Self {
        Self { en, zh }
    }

    /// Lines for the given locale, falling back to English.
    pub fn get(&self, locale: Locale) -> &[String] {
        match locale {
            Locale::En => &self.en,
            Locale::Zh => {
                if self.zh.is_empty() {
                    &self.en
                } else {
                    &self.zh
                }
            }
        }
    }
}

/// A file leaf: locale-variant content plus ownership metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileNode {
    /// Content lines, one variant per locale
    pub lines: LocalizedLines,
    /// Permission mode
    pub mode: Mode,
    /// Owner identity
    pub owner: String,
    /// Group identity
    pub group: String,
    /// Last modification timestamp (ms since epoch)
    pub modified_at: u64,
}

/// A directory: named children plus ownership metadata.
///
/// Child names are non-empty and contain no path separator; both are
/// enforced at construction time by the bootstrap builder.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirNode {
    /// Children keyed by name
    pub children: BTreeMap<String, Node>,
    /// Permission mode
    pub mode: Mode,
    /// Owner identity
    pub owner: String,
    /// Group identity
    pub group: String,
    /// Last modification timestamp (ms since epoch)
    pub modified_at: u64,
}

/// A filesystem entry: file or directory.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Node {
    /// Regular file
    File(FileNode),
    /// Directory
    Directory(DirNode),
}

impl Node {
    /// Check if this is a file.
    pub fn is_file(&self) -> bool {
        matches!(self, Node::File(_))
    }

    /// Check if this is a directory.
    pub fn is_directory(&self) -> bool {
        matches!(self, Node::Directory(_))
    }

    /// Permission mode of either variant.
    pub fn mode(&self) -> Mode {
        match self {
            Node::File(f) => f.mode,
            Node::Directory(d) => d.mode,
        }
    }

    /// Owner identity of either variant.
    pub fn owner(&self) -> &str {
        match self {
            Node::File(f) => &f.owner,
            Node::Directory(d) => &d.owner,
        }
    }

    /// Group identity of either variant.
    pub fn group(&self) -> &str {
        match self {
            Node::File(f) => &f.group,
            Node::Directory(d) => &d.group,
        }
    }

    /// Last modification timestamp of either variant.
    pub fn modified_at(&self) -> u64 {
        match self {
            Node::File(f) => f.modified_at,
            Node::Directory(d) => d.modified_at,
        }
    }

    /// The directory variant, if this is one.
    pub fn as_directory(&self) -> Option<&DirNode> {
        match self {
            Node::Directory(d) => Some(d),
            Node::File(_) => None,
        }
    }

    /// The file variant, if this is one.
    pub fn as_file(&self) -> Option<&FileNode> {
        match self {
            Node::File(f) => Some(f),
            Node::Directory(_) => None,
        }
    }
}
