//! Property tests: the parser accepts any input and always leaves a
//! well-formed tree behind.

use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;

use wicket_dom::NodeId;
use wicket_html::{FragmentContext, parse_document, parse_fragment};

/// Markup-heavy input built from pieces that exercise many insertion modes.
#[derive(Debug, Clone)]
struct Markup(String);

const PIECES: &[&str] = &[
    "<!DOCTYPE html>", "<html>", "</html>", "<head>", "</head>", "<body>", "</body>",
    "<p>", "</p>", "<div>", "</div>", "<b>", "</b>", "<i>", "</i>", "<a href=x>", "</a>",
    "<table>", "</table>", "<tr>", "</tr>", "<td>", "</td>", "<th>", "<tbody>", "<caption>",
    "<col>", "<colgroup>", "<select>", "</select>", "<option>", "<optgroup>", "<ul>", "<li>",
    "</li>", "<dl>", "<dd>", "<dt>", "<h1>", "</h2>", "<form>", "</form>", "<template>",
    "</template>", "<svg>", "</svg>", "<math>", "<mi>", "<foreignObject>", "<desc>",
    "<annotation-xml encoding=text/html>", "<![CDATA[x]]>", "<title>", "</title>",
    "<textarea>", "<script>", "</script>", "<style>", "</style>", "<noscript>", "<pre>",
    "<frameset>", "<frame>", "<plaintext>", "<br/>", "</br>", "<img>", "<image>",
    "<input type=hidden>", "<hr>", "<button>", "<nobr>", "<marquee>", "<!-- c -->", "x",
    " ", "\n", "&amp;", "&#0;", "&notin", "<", ">", "\0",
];

impl Arbitrary for Markup {
    fn arbitrary(g: &mut Gen) -> Self {
        let len = usize::arbitrary(g) % 48;
        let mut markup = String::new();
        for _ in 0..len {
            if let Some(piece) = g.choose(PIECES) {
                markup.push_str(piece);
            }
        }
        Self(markup)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        Box::new(self.0.shrink().map(Self))
    }
}

#[quickcheck]
fn stack_pushes_and_pops_balance(input: Markup) -> bool {
    let stats = parse_document(&input.0).stack_stats;
    stats.pushes == stats.pops + stats.final_depth && stats.final_depth == 0
}

#[quickcheck]
fn arbitrary_text_parses_to_a_document(input: String) -> bool {
    let output = parse_document(&input);
    output.tree.document_element().is_some() && output.stack_stats.final_depth == 0
}

#[quickcheck]
fn every_child_points_back_at_its_parent(input: Markup) -> bool {
    let tree = parse_document(&input.0).tree;
    (0..tree.len()).map(NodeId).all(|id| {
        tree.children(id)
            .iter()
            .all(|&child| tree.parent(child) == Some(id))
    })
}

#[quickcheck]
fn fragments_never_fail_with_default_options(input: Markup) -> bool {
    ["body", "table", "tr", "select", "template", "title"]
        .iter()
        .all(|context| {
            parse_fragment(&input.0, FragmentContext::html(context))
                .is_ok_and(|output| output.fragment_root.is_some())
        })
}
