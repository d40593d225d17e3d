//! [§ 13.2.6.4.1 The "initial" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-initial-insertion-mode)
//! DOCTYPE checks: conformance, quirks mode and limited-quirks mode.

use wicket_dom::DocumentMode;

use crate::tokenizer::Doctype;

/// Public identifiers that put the document in quirks mode when they start
/// the DOCTYPE's public identifier.
const QUIRKS_PUBLIC_ID_PREFIXES: &[&str] = &[
    "+//Silmaril//dtd html Pro v0r11 19970101//",
    "-//AS//DTD HTML 3.0 asWedit + extensions//",
    "-//AdvaSoft Ltd//DTD HTML 3.0 asWedit + extensions//",
    "-//IETF//DTD HTML 2.0 Level 1//",
    "-//IETF//DTD HTML 2.0 Level 2//",
    "-//IETF//DTD HTML 2.0 Strict Level 1//",
    "-//IETF//DTD HTML 2.0 Strict Level 2//",
    "-//IETF//DTD HTML 2.0 Strict//",
    "-//IETF//DTD HTML 2.0//",
    "-//IETF//DTD HTML 2.1E//",
    "-//IETF//DTD HTML 3.0//",
    "-//IETF//DTD HTML 3.2 Final//",
    "-//IETF//DTD HTML 3.2//",
    "-//IETF//DTD HTML 3//",
    "-//IETF//DTD HTML Level 0//",
    "-//IETF//DTD HTML Level 1//",
    "-//IETF//DTD HTML Level 2//",
    "-//IETF//DTD HTML Level 3//",
    "-//IETF//DTD HTML Strict Level 0//",
    "-//IETF//DTD HTML Strict Level 1//",
    "-//IETF//DTD HTML Strict Level 2//",
    "-//IETF//DTD HTML Strict Level 3//",
    "-//IETF//DTD HTML Strict//",
    "-//IETF//DTD HTML//",
    "-//Metrius//DTD Metrius Presentational//",
    "-//Microsoft//DTD Internet Explorer 2.0 HTML Strict//",
    "-//Microsoft//DTD Internet Explorer 2.0 HTML//",
    "-//Microsoft//DTD Internet Explorer 2.0 Tables//",
    "-//Microsoft//DTD Internet Explorer 3.0 HTML Strict//",
    "-//Microsoft//DTD Internet Explorer 3.0 HTML//",
    "-//Microsoft//DTD Internet Explorer 3.0 Tables//",
    "-//Netscape Comm. Corp.//DTD HTML//",
    "-//Netscape Comm. Corp.//DTD Strict HTML//",
    "-//O'Reilly and Associates//DTD HTML 2.0//",
    "-//O'Reilly and Associates//DTD HTML Extended 1.0//",
    "-//O'Reilly and Associates//DTD HTML Extended Relaxed 1.0//",
    "-//SQ//DTD HTML 2.0 HoTMetaL + extensions//",
    "-//SoftQuad Software//DTD HoTMetaL PRO 6.0::19990601::extensions to HTML 4.0//",
    "-//SoftQuad//DTD HoTMetaL PRO 4.0::19971010::extensions to HTML 4.0//",
    "-//Spyglass//DTD HTML 2.0 Extended//",
    "-//Sun Microsystems Corp.//DTD HotJava HTML//",
    "-//Sun Microsystems Corp.//DTD HotJava Strict HTML//",
    "-//W3C//DTD HTML 3 1995-03-24//",
    "-//W3C//DTD HTML 3.2 Draft//",
    "-//W3C//DTD HTML 3.2 Final//",
    "-//W3C//DTD HTML 3.2//",
    "-//W3C//DTD HTML 3.2S Draft//",
    "-//W3C//DTD HTML 4.0 Frameset//",
    "-//W3C//DTD HTML 4.0 Transitional//",
    "-//W3C//DTD HTML Experimental 19960712//",
    "-//W3C//DTD HTML Experimental 970421//",
    "-//W3C//DTD W3 HTML//",
    "-//W3O//DTD W3 HTML 3.0//",
    "-//WebTechs//DTD Mozilla HTML 2.0//",
    "-//WebTechs//DTD Mozilla HTML//",
];

/// Public identifiers that put the document in quirks mode on an exact match.
const QUIRKS_PUBLIC_IDS: &[&str] = &[
    "-//W3O//DTD W3 HTML Strict 3.0//EN//",
    "-/W3C/DTD HTML 4.0 Transitional/EN",
    "HTML",
];

const QUIRKS_SYSTEM_ID: &str = "http://www.ibm.com/data/dtd/v11/ibmxhtml1-transitional.dtd";

/// Quirks without a system identifier, limited quirks with one.
const HTML401_PUBLIC_ID_PREFIXES: &[&str] = &[
    "-//W3C//DTD HTML 4.01 Frameset//",
    "-//W3C//DTD HTML 4.01 Transitional//",
];

const LIMITED_QUIRKS_PUBLIC_ID_PREFIXES: &[&str] = &[
    "-//W3C//DTD XHTML 1.0 Frameset//",
    "-//W3C//DTD XHTML 1.0 Transitional//",
];

fn starts_with_ignore_ascii_case(haystack: &str, prefix: &str) -> bool {
    haystack
        .get(..prefix.len())
        .is_some_and(|start| start.eq_ignore_ascii_case(prefix))
}

fn has_prefix(id: &str, prefixes: &[&str]) -> bool {
    prefixes
        .iter()
        .any(|prefix| starts_with_ignore_ascii_case(id, prefix))
}

/// "If the DOCTYPE token's name is not "html", or the token's public
/// identifier is not missing, or the token's system identifier is neither
/// missing nor "about:legacy-compat", then there is a parse error."
#[must_use]
pub fn is_conforming_doctype(doctype: &Doctype) -> bool {
    doctype.name.as_deref() == Some("html")
        && doctype.public_identifier.is_none()
        && doctype
            .system_identifier
            .as_deref()
            .is_none_or(|system| system == "about:legacy-compat")
}

/// The document mode a DOCTYPE token selects, for documents that are not
/// an iframe srcdoc document.
#[must_use]
pub fn document_mode_for(doctype: &Doctype) -> DocumentMode {
    if doctype.force_quirks || doctype.name.as_deref() != Some("html") {
        return DocumentMode::Quirks;
    }

    let public = doctype.public_identifier.as_deref();
    let system = doctype.system_identifier.as_deref();

    if let Some(public) = public {
        if QUIRKS_PUBLIC_IDS
            .iter()
            .any(|id| id.eq_ignore_ascii_case(public))
            || has_prefix(public, QUIRKS_PUBLIC_ID_PREFIXES)
            || (system.is_none() && has_prefix(public, HTML401_PUBLIC_ID_PREFIXES))
        {
            return DocumentMode::Quirks;
        }
    }
    if system.is_some_and(|system| system.eq_ignore_ascii_case(QUIRKS_SYSTEM_ID)) {
        return DocumentMode::Quirks;
    }

    if let Some(public) = public
        && (has_prefix(public, LIMITED_QUIRKS_PUBLIC_ID_PREFIXES)
            || (system.is_some() && has_prefix(public, HTML401_PUBLIC_ID_PREFIXES)))
    {
        return DocumentMode::LimitedQuirks;
    }

    DocumentMode::NoQuirks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doctype(name: &str, public: Option<&str>, system: Option<&str>) -> Doctype {
        Doctype {
            name: Some(name.to_string()),
            public_identifier: public.map(str::to_string),
            system_identifier: system.map(str::to_string),
            force_quirks: false,
        }
    }

    #[test]
    fn html5_doctype_is_no_quirks() {
        let html5 = doctype("html", None, None);
        assert!(is_conforming_doctype(&html5));
        assert_eq!(document_mode_for(&html5), DocumentMode::NoQuirks);
    }

    #[test]
    fn legacy_public_ids_trigger_quirks() {
        let old = doctype("html", Some("-//W3C//DTD HTML 3.2 Final//EN"), None);
        assert_eq!(document_mode_for(&old), DocumentMode::Quirks);
        assert!(!is_conforming_doctype(&old));

        let transitional = doctype("html", Some("-//W3C//DTD HTML 4.01 Transitional//EN"), None);
        assert_eq!(document_mode_for(&transitional), DocumentMode::Quirks);
    }

    #[test]
    fn xhtml_transitional_is_limited_quirks() {
        let xhtml = doctype(
            "html",
            Some("-//W3C//DTD XHTML 1.0 Transitional//EN"),
            Some("http://www.w3.org/TR/xhtml1/DTD/xhtml1-transitional.dtd"),
        );
        assert_eq!(document_mode_for(&xhtml), DocumentMode::LimitedQuirks);

        let html401 = doctype(
            "html",
            Some("-//W3C//DTD HTML 4.01 Frameset//EN"),
            Some("http://www.w3.org/TR/html4/frameset.dtd"),
        );
        assert_eq!(document_mode_for(&html401), DocumentMode::LimitedQuirks);
    }

    #[test]
    fn force_quirks_and_wrong_name_are_quirks() {
        let mut forced = doctype("html", None, None);
        forced.force_quirks = true;
        assert_eq!(document_mode_for(&forced), DocumentMode::Quirks);
        assert_eq!(document_mode_for(&doctype("svg", None, None)), DocumentMode::Quirks);
    }
}
