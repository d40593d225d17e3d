use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use strum_macros::Display;

use wicket_common::warning::warn_once;
use wicket_dom::{DomTree, ElementFactory, ElementRegistry, Namespace, NodeId};

use super::foreign_content::{is_html_integration_point, is_mathml_text_integration_point};
use super::formatting::ActiveFormattingElement;
use super::{FragmentContext, ParseOutput, StackStats};
use crate::error::{HtmlError, ParseError, ParseErrorCode, Unsupported, UnsupportedReason};
use crate::options::{ParserOptions, UnsupportedPolicy};
use crate::tokenizer::{HTMLTokenizer, Token};

/// [§ 13.2.4.1 The insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-insertion-mode)
///
/// "The insertion mode is a state variable that controls the primary operation
/// of the tree construction stage."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum InsertionMode {
    /// [§ 13.2.6.4.1 The "initial" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-initial-insertion-mode)
    Initial,
    /// [§ 13.2.6.4.2 The "before html" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-html-insertion-mode)
    BeforeHtml,
    /// [§ 13.2.6.4.3 The "before head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-head-insertion-mode)
    BeforeHead,
    /// [§ 13.2.6.4.4 The "in head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inhead)
    InHead,
    /// [§ 13.2.6.4.5 The "in head noscript" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inheadnoscript)
    InHeadNoscript,
    /// [§ 13.2.6.4.6 The "after head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-head-insertion-mode)
    AfterHead,
    /// [§ 13.2.6.4.7 The "in body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
    InBody,
    /// [§ 13.2.6.4.8 The "text" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incdata)
    Text,
    /// [§ 13.2.6.4.9 The "in table" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intable)
    InTable,
    /// [§ 13.2.6.4.10 The "in table text" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intabletext)
    InTableText,
    /// [§ 13.2.6.4.11 The "in caption" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incaption)
    InCaption,
    /// [§ 13.2.6.4.12 The "in column group" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incolumngroup)
    InColumnGroup,
    /// [§ 13.2.6.4.13 The "in table body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intablebody)
    InTableBody,
    /// [§ 13.2.6.4.14 The "in row" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inrow)
    InRow,
    /// [§ 13.2.6.4.15 The "in cell" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incell)
    InCell,
    /// [§ 13.2.6.4.16 The "in select" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inselect)
    InSelect,
    /// [§ 13.2.6.4.17 The "in select in table" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inselectintable)
    InSelectInTable,
    /// [§ 13.2.6.4.18 The "in template" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intemplate)
    InTemplate,
    /// [§ 13.2.6.4.19 The "after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-afterbody)
    AfterBody,
    /// [§ 13.2.6.4.20 The "in frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inframeset)
    InFrameset,
    /// [§ 13.2.6.4.21 The "after frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-afterframeset)
    AfterFrameset,
    /// [§ 13.2.6.4.22 The "after after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-after-body-insertion-mode)
    AfterAfterBody,
    /// [§ 13.2.6.4.23 The "after after frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-after-frameset-insertion-mode)
    AfterAfterFrameset,
}

/// Callback that sees every parse error as soon as it is found.
pub type ErrorReporter<'a> = Box<dyn FnMut(&ParseError) + 'a>;

/// [§ 13.2.6 Tree construction](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction)
///
/// The HTML parser. It pulls tokens from its own [`HTMLTokenizer`] one at a
/// time, runs each through the tree construction dispatcher, and changes
/// the tokenizer's state between pulls when an element needs RCDATA,
/// RAWTEXT, script data or PLAINTEXT.
///
/// ```
/// use wicket_html::HTMLParser;
///
/// let output = HTMLParser::new("<p>Hello").parse().unwrap();
/// assert!(output.tree.body().is_some());
/// ```
pub struct HTMLParser<'a> {
    pub(super) tokenizer: HTMLTokenizer,

    /// `NodeId::ROOT` is the Document under construction.
    pub(super) tree: DomTree,

    /// [§ 13.2.4.1 The insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-insertion-mode)
    pub(super) insertion_mode: InsertionMode,

    /// [§ 13.2.4.1](https://html.spec.whatwg.org/multipage/parsing.html#original-insertion-mode)
    ///
    /// Set when switching to "text" or "in table text".
    pub(super) original_insertion_mode: Option<InsertionMode>,

    /// [§ 13.2.4.1](https://html.spec.whatwg.org/multipage/parsing.html#stack-of-template-insertion-modes)
    pub(super) template_insertion_modes: Vec<InsertionMode>,

    /// [§ 13.2.4.2 The stack of open elements](https://html.spec.whatwg.org/multipage/parsing.html#the-stack-of-open-elements)
    ///
    /// Index 0 is the html element; the last entry is the current node.
    pub(super) stack_of_open_elements: Vec<NodeId>,

    /// [§ 13.2.4.3 The list of active formatting elements](https://html.spec.whatwg.org/multipage/parsing.html#the-list-of-active-formatting-elements)
    pub(super) active_formatting_elements: Vec<ActiveFormattingElement>,

    /// [§ 13.2.4.4 The element pointers](https://html.spec.whatwg.org/multipage/parsing.html#head-element-pointer)
    pub(super) head_element_pointer: Option<NodeId>,

    /// [§ 13.2.4.4](https://html.spec.whatwg.org/multipage/parsing.html#form-element-pointer)
    ///
    /// "The form element pointer points to the last form element that was
    /// opened and whose end tag has not yet been seen."
    pub(super) form_element_pointer: Option<NodeId>,

    /// [§ 13.2.4.5 Other parsing state flags](https://html.spec.whatwg.org/multipage/parsing.html#frameset-ok-flag)
    ///
    /// "The frameset-ok flag is set to "ok" when the parser is created."
    pub(super) frameset_ok: bool,

    /// [§ 13.2.6.1](https://html.spec.whatwg.org/multipage/parsing.html#foster-parent)
    pub(super) foster_parenting: bool,

    /// [§ 13.2.6.4.10](https://html.spec.whatwg.org/multipage/parsing.html#concept-pending-table-char-tokens)
    pub(super) pending_table_character_tokens: String,

    /// Set after `<pre>`, `<listing>` and `<textarea>`: "If the next token
    /// is a U+000A LINE FEED (LF) character token, then ignore that token."
    pub(super) skip_next_newline: bool,

    /// Whether the start tag being processed had its self-closing flag
    /// acknowledged.
    pub(super) self_closing_acknowledged: bool,

    pub(super) options: ParserOptions,

    /// [§ 13.4](https://html.spec.whatwg.org/multipage/parsing.html#concept-frag-parse-context)
    ///
    /// The context element, in the fragment case. It lives in the arena
    /// but is never attached to the document.
    pub(super) context_element: Option<NodeId>,

    /// Set by `stop_parsing`.
    stopped: bool,

    factory: Option<&'a dyn ElementFactory>,
    default_registry: ElementRegistry,
    continue_flag: Option<Arc<AtomicBool>>,
    error_reporter: Option<ErrorReporter<'a>>,
    errors: Vec<ParseError>,
    unsupported: Vec<Unsupported>,
    /// The first unsupported construct, under `UnsupportedPolicy::Fail`.
    fatal: Option<Unsupported>,
    fragment: Option<FragmentContext>,
    fragment_root: Option<NodeId>,
    pushes: usize,
    pops: usize,
    tokens_processed: usize,
}

impl<'a> HTMLParser<'a> {
    /// Create a parser for a complete document.
    #[must_use]
    pub fn new(input: &str) -> Self {
        Self {
            tokenizer: HTMLTokenizer::new(input),
            tree: DomTree::new(),
            insertion_mode: InsertionMode::Initial,
            original_insertion_mode: None,
            template_insertion_modes: Vec::new(),
            stack_of_open_elements: Vec::new(),
            active_formatting_elements: Vec::new(),
            head_element_pointer: None,
            form_element_pointer: None,
            frameset_ok: true,
            foster_parenting: false,
            pending_table_character_tokens: String::new(),
            skip_next_newline: false,
            self_closing_acknowledged: false,
            options: ParserOptions::new(),
            context_element: None,
            stopped: false,
            factory: None,
            default_registry: ElementRegistry::default(),
            continue_flag: None,
            error_reporter: None,
            errors: Vec::new(),
            unsupported: Vec::new(),
            fatal: None,
            fragment: None,
            fragment_root: None,
            pushes: 0,
            pops: 0,
            tokens_processed: 0,
        }
    }

    /// Use these options instead of the defaults.
    #[must_use]
    pub const fn with_options(mut self, options: ParserOptions) -> Self {
        self.options = options;
        self
    }

    /// Ask `factory` for element constructors instead of the default
    /// [`ElementRegistry`].
    #[must_use]
    pub fn with_factory(mut self, factory: &'a dyn ElementFactory) -> Self {
        self.factory = Some(factory);
        self
    }

    /// Watch a "continue" flag. When it reads `false` at the top of the
    /// token loop, parsing stops with [`HtmlError::Cancelled`].
    #[must_use]
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.continue_flag = Some(flag);
        self
    }

    /// Call `reporter` with each parse error, tokenizer and tree
    /// construction alike, in the order they are found.
    #[must_use]
    pub fn with_error_reporter(mut self, reporter: impl FnMut(&ParseError) + 'a) -> Self {
        self.error_reporter = Some(Box::new(reporter));
        self
    }

    /// Parse the input as a fragment in the given context instead of as a
    /// document.
    #[must_use]
    pub fn with_fragment_context(mut self, context: FragmentContext) -> Self {
        self.fragment = Some(context);
        self
    }

    /// Run the parser to completion.
    ///
    /// # Errors
    ///
    /// Returns [`HtmlError::Unsupported`] for the first unsupported construct
    /// when the options say to fail on them, and [`HtmlError::Cancelled`]
    /// when the continue flag is cleared. Malformed markup is never an error.
    pub fn parse(mut self) -> Result<ParseOutput, HtmlError> {
        self.run()?;
        Ok(self.finish())
    }

    /// The token loop. Cancellation is checked once per token, never in the
    /// middle of processing one.
    pub(super) fn run(&mut self) -> Result<(), HtmlError> {
        if let Some(context) = self.fragment.take() {
            self.prepare_fragment(&context);
        }

        while !self.stopped {
            if self
                .continue_flag
                .as_ref()
                .is_some_and(|flag| !flag.load(Ordering::Acquire))
            {
                return Err(HtmlError::Cancelled {
                    tokens: self.tokens_processed,
                });
            }

            let token = self.tokenizer.next_token();
            for error in self.tokenizer.take_errors() {
                self.report(error);
            }
            self.tokens_processed += 1;

            self.handle_token(&token);

            if let Some(unsupported) = self.fatal.take() {
                return Err(unsupported.into());
            }
            if token.is_eof() && !self.stopped {
                self.stop_parsing();
            }

            // "If the adjusted current node is an element in the HTML
            // namespace" CDATA sections are bogus comments.
            let foreign = self
                .adjusted_current_node()
                .and_then(|id| self.tree.namespace(id))
                .is_some_and(|namespace| namespace != Namespace::Html);
            self.tokenizer.set_cdata_allowed(foreign);
        }
        Ok(())
    }

    /// Package the tree and diagnostics.
    pub(super) fn finish(self) -> ParseOutput {
        ParseOutput {
            stack_stats: StackStats {
                pushes: self.pushes,
                pops: self.pops,
                final_depth: self.stack_of_open_elements.len(),
            },
            tree: self.tree,
            errors: self.errors,
            unsupported: self.unsupported,
            fragment_root: self.fragment_root,
        }
    }

    pub(super) const fn set_fragment_root(&mut self, root: NodeId) {
        self.fragment_root = Some(root);
    }

    /// Per-token work that sits outside the insertion modes: the newline
    /// skip after `<pre>`, and the trailing solidus check.
    fn handle_token(&mut self, token: &Token) {
        if self.skip_next_newline {
            self.skip_next_newline = false;
            if matches!(token, Token::Character('\n')) {
                return;
            }
        }

        self.self_closing_acknowledged = false;
        self.process_token(token);

        // [§ 13.2.6](https://html.spec.whatwg.org/multipage/parsing.html#acknowledge-self-closing-flag)
        // "If it is not acknowledged when the tag is processed in tree
        // construction, that is a non-void-html-element-start-tag-with-trailing-solidus
        // parse error."
        if let Token::StartTag(tag) = token
            && tag.self_closing
            && !self.self_closing_acknowledged
        {
            self.parse_error(
                ParseErrorCode::NonVoidHtmlElementStartTagWithTrailingSolidus,
                token,
            );
        }
    }

    /// [§ 13.2.6 Tree construction dispatcher](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction-dispatcher)
    ///
    /// "As each token is emitted from the tokenizer, the user agent must
    /// follow the appropriate steps from the following list, known as the
    /// tree construction dispatcher"
    pub(super) fn process_token(&mut self, token: &Token) {
        if self.use_html_content_rules(token) {
            self.process_using_rules_for(self.insertion_mode, token);
        } else {
            self.process_foreign_content(token);
        }
    }

    /// [§ 13.2.6](https://html.spec.whatwg.org/multipage/parsing.html#reprocess-the-token)
    ///
    /// "Reprocess the token" goes back through the dispatcher with whatever
    /// insertion mode is now current.
    pub(super) fn reprocess_token(&mut self, token: &Token) {
        self.process_token(token);
    }

    /// The dispatcher's first branch: everything but tokens that stay in
    /// SVG or MathML content.
    fn use_html_content_rules(&self, token: &Token) -> bool {
        // "If the stack of open elements is empty"
        let Some(node) = self.adjusted_current_node() else {
            return true;
        };
        let Some(element) = self.tree.as_element(node) else {
            return true;
        };
        // "If the adjusted current node is an element in the HTML namespace"
        if element.namespace == Namespace::Html {
            return true;
        }
        match token {
            // "If the token is an end-of-file token"
            Token::EndOfFile => true,
            // "If the adjusted current node is a MathML text integration point
            //  and the token is a start tag whose tag name is neither "mglyph"
            //  nor "malignmark""
            Token::StartTag(tag)
                if is_mathml_text_integration_point(element)
                    && tag.name != "mglyph"
                    && tag.name != "malignmark" =>
            {
                true
            }
            // "If the adjusted current node is a MathML text integration point
            //  and the token is a character token"
            Token::Character(_) if is_mathml_text_integration_point(element) => true,
            // "If the adjusted current node is a MathML annotation-xml element
            //  and the token is a start tag whose tag name is "svg""
            Token::StartTag(tag)
                if element.is(Namespace::MathMl, "annotation-xml") && tag.name == "svg" =>
            {
                true
            }
            // "If the adjusted current node is an HTML integration point and
            //  the token is a start tag" / "... and the token is a character token"
            Token::StartTag(_) | Token::Character(_) => is_html_integration_point(element),
            _ => false,
        }
    }

    /// "Process the token using the rules for the X insertion mode."
    pub(super) fn process_using_rules_for(&mut self, mode: InsertionMode, token: &Token) {
        match mode {
            InsertionMode::Initial => self.handle_initial_mode(token),
            InsertionMode::BeforeHtml => self.handle_before_html_mode(token),
            InsertionMode::BeforeHead => self.handle_before_head_mode(token),
            InsertionMode::InHead => self.handle_in_head_mode(token),
            InsertionMode::InHeadNoscript => self.handle_in_head_noscript_mode(token),
            InsertionMode::AfterHead => self.handle_after_head_mode(token),
            InsertionMode::InBody => self.handle_in_body_mode(token),
            InsertionMode::Text => self.handle_text_mode(token),
            InsertionMode::InTable => self.handle_in_table_mode(token),
            InsertionMode::InTableText => self.handle_in_table_text_mode(token),
            InsertionMode::InCaption => self.handle_in_caption_mode(token),
            InsertionMode::InColumnGroup => self.handle_in_column_group_mode(token),
            InsertionMode::InTableBody => self.handle_in_table_body_mode(token),
            InsertionMode::InRow => self.handle_in_row_mode(token),
            InsertionMode::InCell => self.handle_in_cell_mode(token),
            InsertionMode::InSelect => self.handle_in_select_mode(token),
            InsertionMode::InSelectInTable => self.handle_in_select_in_table_mode(token),
            InsertionMode::InTemplate => self.handle_in_template_mode(token),
            InsertionMode::AfterBody => self.handle_after_body_mode(token),
            InsertionMode::InFrameset => self.handle_in_frameset_mode(token),
            InsertionMode::AfterFrameset => self.handle_after_frameset_mode(token),
            InsertionMode::AfterAfterBody => self.handle_after_after_body_mode(token),
            InsertionMode::AfterAfterFrameset => self.handle_after_after_frameset_mode(token),
        }
    }

    /// [§ 13.2.4.2](https://html.spec.whatwg.org/multipage/parsing.html#current-node)
    ///
    /// "The current node is the bottommost node in this stack of open elements."
    pub(super) fn current_node(&self) -> Option<NodeId> {
        self.stack_of_open_elements.last().copied()
    }

    /// [§ 13.2.4.2](https://html.spec.whatwg.org/multipage/parsing.html#adjusted-current-node)
    ///
    /// "The adjusted current node is the context element if the parser was
    /// created as part of the HTML fragment parsing algorithm and the stack
    /// of open elements has only one element in it (fragment case);
    /// otherwise, the adjusted current node is the current node."
    pub(super) fn adjusted_current_node(&self) -> Option<NodeId> {
        if let Some(context) = self.context_element
            && self.stack_of_open_elements.len() == 1
        {
            return Some(context);
        }
        self.current_node()
    }

    /// The element factory in use: the embedder's, or the default registry.
    pub(super) fn factory(&self) -> &dyn ElementFactory {
        match self.factory {
            Some(factory) => factory,
            None => &self.default_registry,
        }
    }

    /// [§ 13.2.7 The end](https://html.spec.whatwg.org/multipage/parsing.html#stop-parsing)
    pub(super) fn stop_parsing(&mut self) {
        // STEP 3: "Pop all the nodes off the stack of open elements."
        while !self.stack_of_open_elements.is_empty() {
            let _ = self.pop_current_node();
        }
        self.stopped = true;
    }

    /// Count a push onto the stack of open elements.
    pub(super) const fn record_push(&mut self) {
        self.pushes += 1;
    }

    /// Count a removal from the stack of open elements.
    pub(super) const fn record_pop(&mut self) {
        self.pops += 1;
    }

    /// [§ 13.2.2 Parse errors](https://html.spec.whatwg.org/multipage/parsing.html#parse-errors)
    ///
    /// Record a tree construction parse error caused by `token`.
    pub(super) fn parse_error(&mut self, code: ParseErrorCode, token: &Token) {
        let detail = match token {
            Token::StartTag(tag) => Some(format!("<{}>", tag.name)),
            Token::EndTag(tag) => Some(format!("</{}>", tag.name)),
            Token::Character(c) => Some(format!("{c:?}")),
            Token::Doctype(_) | Token::Comment(_) | Token::EndOfFile => None,
        };
        self.parse_error_with_detail(code, detail);
    }

    /// Record a tree construction parse error with free-form context.
    pub(super) fn parse_error_with_detail(&mut self, code: ParseErrorCode, detail: Option<String>) {
        let error = ParseError {
            code,
            location: self.tokenizer.location(),
            detail,
        };
        self.report(error);
    }

    fn report(&mut self, error: ParseError) {
        if let Some(reporter) = self.error_reporter.as_mut() {
            reporter(&error);
        }
        if self.options.log_parse_errors {
            warn_once("HTML Parser", &error.to_string());
        }
        if self
            .options
            .max_errors
            .is_none_or(|max| self.errors.len() < max)
        {
            self.errors.push(error);
        }
    }

    /// Reached a construct the core does not implement. It is recorded and
    /// logged once per reason; under [`UnsupportedPolicy::Fail`] the token
    /// loop stops after the current token.
    pub(super) fn unsupported(&mut self, reason: UnsupportedReason) {
        let unsupported = Unsupported {
            reason,
            location: self.tokenizer.location(),
        };
        warn_once("HTML Parser", &format!("unsupported construct: {reason}"));
        if self.options.unsupported == UnsupportedPolicy::Fail && self.fatal.is_none() {
            self.fatal = Some(unsupported.clone());
        }
        self.unsupported.push(unsupported);
    }

    /// [§ 13.2.6](https://html.spec.whatwg.org/multipage/parsing.html#acknowledge-self-closing-flag)
    ///
    /// "When a start tag token is emitted with its self-closing flag set, if
    /// the flag is not acknowledged when it is processed by the tree
    /// construction stage, that is a parse error."
    pub(super) const fn acknowledge_self_closing_flag(&mut self) {
        self.self_closing_acknowledged = true;
    }

    /// True when parsing a fragment.
    pub(super) const fn is_fragment_case(&self) -> bool {
        self.context_element.is_some()
    }
}
