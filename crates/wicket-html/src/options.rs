//! Parser configuration.

/// What to do when the parser reaches an unsupported construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnsupportedPolicy {
    /// Record it in the output, log it once, and keep parsing.
    #[default]
    Record,
    /// Stop and return [`crate::HtmlError::Unsupported`].
    Fail,
}

/// Options that change how a document is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// [§ 13.2.4.5](https://html.spec.whatwg.org/multipage/parsing.html#scripting-flag)
    ///
    /// "The scripting flag is set to "enabled" if scripting was enabled for
    /// the Document with which the parser is associated when the parser was
    /// created, and "disabled" otherwise."
    pub scripting: bool,
    /// Handling of unsupported constructs.
    pub unsupported: UnsupportedPolicy,
    /// Print each distinct parse error through the warning channel.
    pub log_parse_errors: bool,
    /// Stop recording parse errors after this many.
    pub max_errors: Option<usize>,
    /// Parse as an `iframe` `srcdoc` document (a missing DOCTYPE is not quirky).
    pub iframe_srcdoc: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl ParserOptions {
    /// Default options: scripting off, unsupported constructs recorded.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            scripting: false,
            unsupported: UnsupportedPolicy::Record,
            log_parse_errors: false,
            max_errors: None,
            iframe_srcdoc: false,
        }
    }

    /// Set the scripting flag.
    #[must_use]
    pub const fn with_scripting(mut self, scripting: bool) -> Self {
        self.scripting = scripting;
        self
    }

    /// Fail on the first unsupported construct.
    #[must_use]
    pub const fn strict(mut self) -> Self {
        self.unsupported = UnsupportedPolicy::Fail;
        self
    }

    /// Log parse errors as they are found.
    #[must_use]
    pub const fn with_logging(mut self, log_parse_errors: bool) -> Self {
        self.log_parse_errors = log_parse_errors;
        self
    }

    /// Cap the number of recorded parse errors.
    #[must_use]
    pub const fn with_max_errors(mut self, max_errors: usize) -> Self {
        self.max_errors = Some(max_errors);
        self
    }

    /// Treat the input as an `iframe` `srcdoc` document.
    #[must_use]
    pub const fn with_iframe_srcdoc(mut self, iframe_srcdoc: bool) -> Self {
        self.iframe_srcdoc = iframe_srcdoc;
        self
    }
}
