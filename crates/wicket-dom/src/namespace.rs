//! [§ 1.8 Namespaces](https://infra.spec.whatwg.org/#namespaces)

use strum_macros::Display;

/// A namespace an element or attribute can live in.
///
/// [Infra § 8 Namespaces](https://infra.spec.whatwg.org/#namespaces)
/// "The HTML namespace is "http://www.w3.org/1999/xhtml"."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Namespace {
    /// `http://www.w3.org/1999/xhtml`
    #[strum(serialize = "html")]
    Html,
    /// `http://www.w3.org/1998/Math/MathML`
    #[strum(serialize = "math")]
    MathMl,
    /// `http://www.w3.org/2000/svg`
    #[strum(serialize = "svg")]
    Svg,
    /// `http://www.w3.org/1999/xlink`
    #[strum(serialize = "xlink")]
    XLink,
    /// `http://www.w3.org/XML/1998/namespace`
    #[strum(serialize = "xml")]
    Xml,
    /// `http://www.w3.org/2000/xmlns/`
    #[strum(serialize = "xmlns")]
    Xmlns,
}

impl Namespace {
    /// The namespace URL.
    #[must_use]
    pub const fn url(self) -> &'static str {
        match self {
            Self::Html => "http://www.w3.org/1999/xhtml",
            Self::MathMl => "http://www.w3.org/1998/Math/MathML",
            Self::Svg => "http://www.w3.org/2000/svg",
            Self::XLink => "http://www.w3.org/1999/xlink",
            Self::Xml => "http://www.w3.org/XML/1998/namespace",
            Self::Xmlns => "http://www.w3.org/2000/xmlns/",
        }
    }

    /// Look a namespace up by URL.
    #[must_use]
    pub fn from_url(url: &str) -> Option<Self> {
        [
            Self::Html,
            Self::MathMl,
            Self::Svg,
            Self::XLink,
            Self::Xml,
            Self::Xmlns,
        ]
        .into_iter()
        .find(|ns| ns.url() == url)
    }
}
