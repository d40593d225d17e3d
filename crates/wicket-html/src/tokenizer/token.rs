use core::fmt;

/// An attribute on a start or end tag token.
///
/// Per [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization):
/// "a list of attributes, each of which has a name and a value"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// "each of which has a name"
    pub name: String,
    /// "and a value"
    pub value: String,
}

impl Attribute {
    /// Create a new attribute with the given name and value.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// "Start and end tag tokens have a tag name, a self-closing flag, and a
/// list of attributes, each of which has a name and a value. When a start
/// or end tag token is created, its self-closing flag must be unset (its
/// other state is that it be set), and its attributes list must be empty."
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Tag {
    /// "a tag name"
    pub name: String,
    /// "a self-closing flag"
    pub self_closing: bool,
    /// "a list of attributes"
    pub attributes: Vec<Attribute>,
}

impl Tag {
    /// A tag with the given name and no attributes.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Value of the attribute `name`, if present.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }

    /// True if the tag carries the attribute `name`.
    #[must_use]
    pub fn has_attr(&self, name: &str) -> bool {
        self.attributes.iter().any(|attr| attr.name == name)
    }

    /// Current attribute, the one being built by the attribute states.
    pub(crate) fn current_attribute(&mut self) -> Option<&mut Attribute> {
        self.attributes.last_mut()
    }
}

/// "DOCTYPE tokens have a name, a public identifier, a system identifier,
/// and a force-quirks flag. When a DOCTYPE token is created, its name,
/// public identifier, and system identifier must be marked as missing
/// (which is a distinct state from the empty string), and the force-quirks
/// flag must be set to off (its other state is on)."
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Doctype {
    /// "a name"
    pub name: Option<String>,
    /// "a public identifier"
    pub public_identifier: Option<String>,
    /// "a system identifier"
    pub system_identifier: Option<String>,
    /// "a force-quirks flag"
    pub force_quirks: bool,
}

/// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
///
/// "The output of the tokenization step is a series of zero or more of the following
/// tokens: DOCTYPE, start tag, end tag, comment, character, end-of-file."
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A DOCTYPE token.
    Doctype(Doctype),
    /// A start tag token.
    StartTag(Tag),
    /// An end tag token. Same structure as a start tag.
    EndTag(Tag),
    /// "Comment and character tokens have data."
    Comment(String),
    /// A single character.
    Character(char),
    /// End-of-file token signals the end of input.
    EndOfFile,
}

impl Token {
    /// "When a start or end tag token is created, its self-closing flag must be
    /// unset (its other state is that it be set), and its attributes list must
    /// be empty."
    #[must_use]
    pub fn new_start_tag() -> Self {
        Self::StartTag(Tag::default())
    }

    /// Create a new end tag token.
    #[must_use]
    pub fn new_end_tag() -> Self {
        Self::EndTag(Tag::default())
    }

    /// Create a new DOCTYPE token with every identifier missing.
    #[must_use]
    pub fn new_doctype() -> Self {
        Self::Doctype(Doctype::default())
    }

    /// Create a new comment token with empty data.
    #[must_use]
    pub const fn new_comment() -> Self {
        Self::Comment(String::new())
    }

    /// Returns true if this is an end-of-file token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self, Self::EndOfFile)
    }

    /// The tag, for start and end tag tokens.
    #[must_use]
    pub const fn tag(&self) -> Option<&Tag> {
        match self {
            Self::StartTag(tag) | Self::EndTag(tag) => Some(tag),
            _ => None,
        }
    }

    pub(crate) const fn tag_mut(&mut self) -> Option<&mut Tag> {
        match self {
            Self::StartTag(tag) | Self::EndTag(tag) => Some(tag),
            _ => None,
        }
    }

    pub(crate) const fn doctype_mut(&mut self) -> Option<&mut Doctype> {
        match self {
            Self::Doctype(doctype) => Some(doctype),
            _ => None,
        }
    }

    pub(crate) const fn comment_mut(&mut self) -> Option<&mut String> {
        match self {
            Self::Comment(data) => Some(data),
            _ => None,
        }
    }

    /// True for a start tag named `name`.
    #[must_use]
    pub fn is_start_tag(&self, name: &str) -> bool {
        matches!(self, Self::StartTag(tag) if tag.name == name)
    }

    /// True for an end tag named `name`.
    #[must_use]
    pub fn is_end_tag(&self, name: &str) -> bool {
        matches!(self, Self::EndTag(tag) if tag.name == name)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Doctype(doctype) => {
                write!(f, "DOCTYPE")?;
                if let Some(n) = &doctype.name {
                    write!(f, " {n}")?;
                }
                if let Some(pub_id) = &doctype.public_identifier {
                    write!(f, " PUBLIC \"{pub_id}\"")?;
                }
                if let Some(sys_id) = &doctype.system_identifier {
                    write!(f, " SYSTEM \"{sys_id}\"")?;
                }
                if doctype.force_quirks {
                    write!(f, " (force-quirks)")?;
                }
                Ok(())
            }
            Self::StartTag(tag) => {
                write!(f, "<{}", tag.name)?;
                for attr in &tag.attributes {
                    write!(f, " {}=\"{}\"", attr.name, attr.value)?;
                }
                if tag.self_closing {
                    write!(f, " /")?;
                }
                write!(f, ">")
            }
            Self::EndTag(tag) => write!(f, "</{}>", tag.name),
            Self::Comment(data) => write!(f, "<!--{data}-->"),
            Self::Character(data) => {
                // Show whitespace characters explicitly
                match data {
                    '\n' => write!(f, "Character(\\n)"),
                    '\t' => write!(f, "Character(\\t)"),
                    ' ' => write!(f, "Character(SPACE)"),
                    c => write!(f, "Character({c})"),
                }
            }
            Self::EndOfFile => write!(f, "EOF"),
        }
    }
}
