//! Wikitext to HTML rewrite cascade
//!
//! Converts raw wikitext page bodies into glossary HTML by applying a fixed,
//! ordered sequence of global text rewrites. The order is load-bearing:
//! earlier rules introduce tags that later rules must not re-wrap, and the
//! final rules act as catch-alls for anything still unmarked. The cascade is
//! modeled as an explicit rule table so the order is a visible, testable
//! artifact rather than a chain of ad hoc calls.
//!
//! This is a heuristic renderer, not a wikitext grammar: templates, tables
//! and nested markup are rewritten by shape only.

use super::source::LOOKUP_SCHEME;
use quick_xml::escape::escape;
use regex::{Captures, Regex};
use std::sync::OnceLock;

/// Bullet glyph used for all list-style lines. Ordered vs unordered lists are
/// deliberately not distinguished.
pub const BULLET: &str = "\u{26ab}\u{fe0e}";

static RE_INTERNAL_LINK: OnceLock<Regex> = OnceLock::new();
static RE_TRANSLATION_HEADER: OnceLock<Regex> = OnceLock::new();
static RE_LIST_ITEM: OnceLock<Regex> = OnceLock::new();
static RE_H2: OnceLock<Regex> = OnceLock::new();
static RE_H3: OnceLock<Regex> = OnceLock::new();
static RE_H4: OnceLock<Regex> = OnceLock::new();
static RE_H5: OnceLock<Regex> = OnceLock::new();
static RE_TEMPLATE: OnceLock<Regex> = OnceLock::new();
static RE_QUALIFIER: OnceLock<Regex> = OnceLock::new();
static RE_LAST_LINE_LINK: OnceLock<Regex> = OnceLock::new();
static RE_LEFTOVER_BRACES: OnceLock<Regex> = OnceLock::new();
static RE_PLAIN_LINE: OnceLock<Regex> = OnceLock::new();

/// One rewrite step of the cascade
struct Rule {
    name: &'static str,
    apply: fn(&str) -> String,
}

/// The cascade, in application order. Each step is a single global
/// substitution pass and is total (never fails).
static RULES: [Rule; 12] = [
    Rule {
        name: "internal_link",
        apply: internal_link,
    },
    Rule {
        name: "translation_header",
        apply: translation_header,
    },
    Rule {
        name: "list_item",
        apply: list_item,
    },
    Rule {
        name: "heading_2",
        apply: heading_2,
    },
    Rule {
        name: "heading_3",
        apply: heading_3,
    },
    Rule {
        name: "heading_4",
        apply: heading_4,
    },
    Rule {
        name: "heading_5",
        apply: heading_5,
    },
    Rule {
        name: "template",
        apply: template,
    },
    Rule {
        name: "qualifier",
        apply: qualifier,
    },
    Rule {
        name: "last_line_link",
        apply: last_line_link,
    },
    Rule {
        name: "leftover_braces",
        apply: leftover_braces,
    },
    Rule {
        name: "plain_line",
        apply: plain_line,
    },
];

/// Wikitext renderer applying the fixed rule cascade
#[derive(Debug, Default)]
pub struct WikitextRenderer;

impl WikitextRenderer {
    /// Create a renderer. Rules are immutable process-wide state, so this is
    /// free.
    pub fn new() -> Self {
        Self
    }

    /// Render wikitext to glossary HTML. Pure function of the input text.
    pub fn render(&self, text: &str) -> String {
        RULES
            .iter()
            .fold(text.to_string(), |acc, rule| (rule.apply)(&acc))
    }

    /// Rule names in application order
    pub fn rule_names() -> Vec<&'static str> {
        RULES.iter().map(|r| r.name).collect()
    }
}

/// `[[X]]` becomes an anchor with a scheme-prefixed lookup target. The whole
/// inner content is one reference; `[[X|Y]]` display text is not split out.
fn internal_link(text: &str) -> String {
    let re = RE_INTERNAL_LINK.get_or_init(|| Regex::new(r"\[\[(.+?)\]\]").unwrap());
    re.replace_all(text, |caps: &Captures| {
        let target = &caps[1];
        format!(
            r#"<a href="{}{}">{}</a>"#,
            LOOKUP_SCHEME,
            escape(target),
            target
        )
    })
    .into_owned()
}

/// `* {{LANG}}: TRANSLATIONS` becomes a level-3 heading plus a bulleted line
fn translation_header(text: &str) -> String {
    let re = RE_TRANSLATION_HEADER
        .get_or_init(|| Regex::new(r"(?m)^[;*]?\s?\{\{(.+?)\}\}: (.+)$").unwrap());
    re.replace_all(text, format!("<h3>$1</h3>\n{BULLET} $2<br>"))
        .into_owned()
}

/// Lines starting with `#` or `*` become bulleted lines
fn list_item(text: &str) -> String {
    let re = RE_LIST_ITEM.get_or_init(|| Regex::new(r"(?m)^[#*] ?(.*)").unwrap());
    re.replace_all(text, format!("{BULLET} $1<br>")).into_owned()
}

fn heading_2(text: &str) -> String {
    let re = RE_H2.get_or_init(|| Regex::new(r"(?m)^==([^=]+)==$").unwrap());
    re.replace_all(text, "<h2>$1</h2>").into_owned()
}

fn heading_3(text: &str) -> String {
    let re = RE_H3.get_or_init(|| Regex::new(r"(?m)^===([^=]+)===$").unwrap());
    re.replace_all(text, "<h3>$1</h3>").into_owned()
}

fn heading_4(text: &str) -> String {
    let re = RE_H4.get_or_init(|| Regex::new(r"(?m)^====([^=]+)====$").unwrap());
    re.replace_all(text, "<h4>$1</h4>").into_owned()
}

fn heading_5(text: &str) -> String {
    let re = RE_H5.get_or_init(|| Regex::new(r"(?m)^=====([^=]+)=====$").unwrap());
    re.replace_all(text, "<h5>$1</h5>").into_owned()
}

/// Two-argument template lines become italic `Template: A|B` text. Lines
/// whose first segment is the `qualifier` keyword are left for the qualifier
/// rule; they must never fall through to the generic rendering.
fn template(text: &str) -> String {
    let re = RE_TEMPLATE.get_or_init(|| Regex::new(r"(?m)^\{\{(...+?\|...+?)\}\}$").unwrap());
    re.replace_all(text, |caps: &Captures| {
        let inner = &caps[1];
        match inner.split_once('|') {
            Some(("qualifier", _)) => caps[0].to_string(),
            _ => format!("<i>Template: {inner}</i>"),
        }
    })
    .into_owned()
}

/// `{{qualifier|TEXT}}` becomes italic, parenthesized text
fn qualifier(text: &str) -> String {
    let re = RE_QUALIFIER.get_or_init(|| Regex::new(r"\{\{qualifier\|(.+?)\}\}").unwrap());
    re.replace_all(text, "<i>($1)</i>").into_owned()
}

/// A trailing line that is exactly one anchor gets spacing inserted before it
fn last_line_link(text: &str) -> String {
    let re =
        RE_LAST_LINE_LINK.get_or_init(|| Regex::new(r"\n(<a href=[^<>]*>.*</a>)\s*\z").unwrap());
    re.replace_all(text, "\n<br><br>$1").into_owned()
}

/// Any remaining single-pair double-brace line becomes italic text
fn leftover_braces(text: &str) -> String {
    let re = RE_LEFTOVER_BRACES.get_or_init(|| Regex::new(r"(?m)^\{\{(.+)\}\}$").unwrap());
    re.replace_all(text, "<i>$1</i><br>").into_owned()
}

/// Any line not starting or ending with a tag gets a trailing line break, so
/// plain prose is still line-broken even though it matched no markup rule
fn plain_line(text: &str) -> String {
    let re = RE_PLAIN_LINE.get_or_init(|| Regex::new(r"(?m)^([^<\s].+[^>\s])$").unwrap());
    re.replace_all(text, "$1<br>").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(text: &str) -> String {
        WikitextRenderer::new().render(text)
    }

    #[test]
    fn test_rule_order_is_fixed() {
        assert_eq!(
            WikitextRenderer::rule_names(),
            vec![
                "internal_link",
                "translation_header",
                "list_item",
                "heading_2",
                "heading_3",
                "heading_4",
                "heading_5",
                "template",
                "qualifier",
                "last_line_link",
                "leftover_braces",
                "plain_line",
            ]
        );
    }

    #[test]
    fn test_internal_link() {
        assert_eq!(
            render("[[Example]]"),
            r#"<a href="bword://Example">Example</a>"#
        );
    }

    #[test]
    fn test_internal_link_target_escaped() {
        let html = render("[[AT&T]]");
        assert_eq!(html, r#"<a href="bword://AT&amp;T">AT&T</a>"#);
    }

    #[test]
    fn test_internal_link_apostrophe_form_pinned() {
        // Link targets use the XML named entity for apostrophes; downstream
        // consumers match on the exact target string, so the form must not
        // drift if the escaping helper is ever swapped
        assert_eq!(
            render("[[l'eau]]"),
            r#"<a href="bword://l&apos;eau">l'eau</a>"#
        );
    }

    #[test]
    fn test_piped_link_kept_whole() {
        // Display text is not split out; the whole inner content is one reference
        let html = render("[[colour|color]]");
        assert!(html.contains("bword://colour|color"));
        assert!(html.contains(">colour|color</a>"));
    }

    #[test]
    fn test_list_item() {
        assert_eq!(render("* apple"), format!("{BULLET} apple<br>"));
        assert_eq!(render("# one"), format!("{BULLET} one<br>"));
    }

    #[test]
    fn test_heading_levels() {
        assert_eq!(render("== Noun =="), "<h2> Noun </h2>");
        assert_eq!(render("===Etymology==="), "<h3>Etymology</h3>");
        assert_eq!(render("====Sense===="), "<h4>Sense</h4>");
        assert_eq!(render("=====Rare====="), "<h5>Rare</h5>");
    }

    #[test]
    fn test_heading_depths_do_not_cross_match() {
        // [^=] keeps each depth from matching the others
        let html = render("=== Verb ===");
        assert!(!html.contains("<h2>"));
        assert!(html.contains("<h3> Verb </h3>"));
    }

    #[test]
    fn test_translation_header() {
        let html = render("* {{nl}}: [[appel]]");
        assert!(html.starts_with("<h3>nl</h3>\n"));
        assert!(html.contains(&format!("{BULLET} ")));
        assert!(html.contains("bword://appel"));
        assert!(html.trim_end().ends_with("<br>"));
    }

    #[test]
    fn test_generic_template() {
        assert_eq!(
            render("{{plural of|apple}}"),
            "<i>Template: plural of|apple</i>"
        );
    }

    #[test]
    fn test_qualifier_never_generic() {
        // The qualifier keyword must not be consumed by the generic template rule
        let html = render("{{qualifier|formal}}");
        assert_eq!(html, "<i>(formal)</i>");
        assert!(!html.contains("Template:"));
    }

    #[test]
    fn test_qualifier_inline() {
        let html = render("used {{qualifier|archaic}} in poetry");
        assert_eq!(html, "used <i>(archaic)</i> in poetry<br>");
    }

    #[test]
    fn test_leftover_braces() {
        assert_eq!(render("{{en-noun}}"), "<i>en-noun</i><br>");
    }

    #[test]
    fn test_last_line_link_spacing() {
        let html = render("See other terms.\n[[appendix]]");
        assert!(html.contains("\n<br><br><a href="));
    }

    #[test]
    fn test_plain_prose_line_broken() {
        assert_eq!(render("A round fruit."), "A round fruit.<br>");
    }

    #[test]
    fn test_tagged_lines_not_rebroken() {
        // plain_line must skip lines already wrapped by earlier rules
        let html = render("== Noun ==");
        assert_eq!(html, "<h2> Noun </h2>");
    }

    #[test]
    fn test_render_is_pure() {
        let renderer = WikitextRenderer::new();
        let input = "== Noun ==\n* apple\n[[pear]]";
        assert_eq!(renderer.render(input), renderer.render(input));
    }

    #[test]
    fn test_full_body() {
        let input = "\
==English==\n\
===Noun===\n\
{{en-noun}}\n\
# A round fruit; see [[fruit]].\n\
* {{nl}}: [[appel]]\n\
{{plural of|apple}}\n\
Some closing prose.";

        let html = render(input);
        assert!(html.contains("<h2>English</h2>"));
        assert!(html.contains("<h3>Noun</h3>"));
        assert!(html.contains("<i>en-noun</i><br>"));
        assert!(html.contains(&format!("{BULLET} A round fruit")));
        assert!(html.contains(r#"<a href="bword://fruit">fruit</a>"#));
        assert!(html.contains("<h3>nl</h3>"));
        assert!(html.contains("<i>Template: plural of|apple</i>"));
        assert!(html.contains("Some closing prose.<br>"));
        assert!(!html.contains("[["));
    }
}
