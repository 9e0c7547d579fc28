//! HTML to markdown conversion for edited list items
//!
//! When a rendered list item loses focus, its contenteditable paragraph holds
//! whatever inline HTML the browser produced while the user typed. The
//! [`MarkdownEngine`] trait is the seam to the host's rendering engine;
//! [`InlineHtmlConverter`] is the built-in engine for that inline subset.
//!
//! | HTML | Markdown |
//! |---|---|
//! | `<strong>`, `<b>` | `**text**` |
//! | `<em>`, `<i>` | `*text*` |
//! | `<del>`, `<s>`, `<strike>` | `~~text~~` |
//! | `<code>` | `` `text` `` |
//! | `<a href>` | `[text](href)` |
//! | `<img>` | `![alt](src)` |
//! | `<br>` | `<br>` (keeps the item on one line) |
//! | checkbox `<input>`, comments | dropped |
//! | anything else | unwrapped |
//!
//! Text that would read as markdown syntax (`\*`, `\[`, a leading `1\.`, ...)
//! is backslash-escaped, so converting an unedited item gives back its source.

use regex::Regex;
use std::sync::OnceLock;

/// Converts rendered HTML back to markdown source text.
pub trait MarkdownEngine {
    fn html_to_markdown(&self, html: &str) -> String;
}

/// Tags, comments, and their attribute text
fn tag_regex() -> &'static Regex {
    static TAG: OnceLock<Regex> = OnceLock::new();
    TAG.get_or_init(|| {
        Regex::new(r#"(?s)<!--.*?-->|<(/?)([A-Za-z][A-Za-z0-9]*)((?:[^>"']|"[^"]*"|'[^']*')*)>"#)
            .expect("tag pattern is valid")
    })
}

fn attribute_regex() -> &'static Regex {
    static ATTR: OnceLock<Regex> = OnceLock::new();
    ATTR.get_or_init(|| {
        Regex::new(r#"([A-Za-z_:][-A-Za-z0-9_:.]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+))"#)
            .expect("attribute pattern is valid")
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Converter
// ─────────────────────────────────────────────────────────────────────────────

/// Built-in engine for the inline HTML of a contenteditable paragraph.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineHtmlConverter;

impl InlineHtmlConverter {
    pub fn new() -> Self {
        Self
    }
}

impl MarkdownEngine for InlineHtmlConverter {
    fn html_to_markdown(&self, html: &str) -> String {
        let mut writer = MarkdownWriter::default();
        let mut last = 0;

        for caps in tag_regex().captures_iter(html) {
            let Some(whole) = caps.get(0) else { continue };
            writer.text(&html[last..whole.start()]);
            last = whole.end();

            // Comments have no tag name
            let Some(name) = caps.get(2) else { continue };
            let name = name.as_str().to_ascii_lowercase();
            let attrs = caps.get(3).map_or("", |m| m.as_str());

            if caps.get(1).is_some_and(|m| !m.as_str().is_empty()) {
                writer.close(&name);
            } else {
                writer.open(&name, attrs);
            }
        }
        writer.text(&html[last..]);
        writer.finish()
    }
}

/// A formatting tag waiting for its closing tag.
#[derive(Debug)]
struct OpenTag {
    name: String,
    open: String,
    close: String,
    /// Output length right after the opening marker
    start: usize,
}

/// Builds the markdown line.
///
/// Outside code, whitespace is kept collapsed to single spaces as it is
/// written. Code span content is written verbatim.
#[derive(Debug, Default)]
struct MarkdownWriter {
    out: String,
    open: Vec<OpenTag>,
}

impl MarkdownWriter {
    fn in_code(&self) -> bool {
        self.open.iter().any(|tag| tag.name == "code")
    }

    fn ends_with_space(&self) -> bool {
        self.out.is_empty() || self.out.ends_with(' ')
    }

    /// A single separating space, never doubled and never leading.
    fn space(&mut self) {
        if !self.ends_with_space() {
            self.out.push(' ');
        }
    }

    fn text(&mut self, raw: &str) {
        if raw.is_empty() {
            return;
        }
        let decoded = html_escape::decode_html_entities(raw).replace('\u{a0}', " ");
        if self.in_code() {
            self.out.push_str(&decoded.replace('\n', " "));
            return;
        }

        let chars: Vec<char> = decoded.chars().collect();
        for (idx, &ch) in chars.iter().enumerate() {
            if ch.is_whitespace() {
                self.space();
                continue;
            }
            let prev = self.out.chars().next_back();
            if needs_escape(ch, prev, &chars[idx + 1..]) {
                self.out.push('\\');
            }
            self.out.push(ch);
        }
    }

    fn open(&mut self, name: &str, attrs: &str) {
        let (open, close) = match name {
            "strong" | "b" => ("**".to_string(), "**".to_string()),
            "em" | "i" => ("*".to_string(), "*".to_string()),
            "del" | "s" | "strike" => ("~~".to_string(), "~~".to_string()),
            "code" => ("`".to_string(), "`".to_string()),
            "a" => match attribute(attrs, "href") {
                Some(href) => ("[".to_string(), format!("]({})", href)),
                None => return,
            },
            "br" => {
                self.out.push_str("<br>");
                return;
            }
            "img" => {
                let src = attribute(attrs, "src").unwrap_or_default();
                let alt = attribute(attrs, "alt").unwrap_or_default();
                self.out.push_str(&format!("![{}]({})", alt, src));
                return;
            }
            "p" | "div" | "li" => {
                self.space();
                return;
            }
            _ => return,
        };

        self.out.push_str(&open);
        self.open.push(OpenTag {
            name: name.to_string(),
            open,
            close,
            start: self.out.len(),
        });
    }

    fn close(&mut self, name: &str) {
        if matches!(name, "p" | "div" | "li") {
            self.space();
            return;
        }
        let Some(idx) = self.open.iter().rposition(|tag| tag.name == name) else {
            return;
        };
        // Misnested tags inside are closed first
        while self.open.len() > idx {
            if let Some(tag) = self.open.pop() {
                self.emit_close(tag);
            }
        }
    }

    /// Close `tag`, keeping edge whitespace outside the markers and dropping
    /// pairs that wrap nothing.
    fn emit_close(&mut self, tag: OpenTag) {
        let inner = self.out.split_off(tag.start);
        self.out.truncate(tag.start - tag.open.len());

        if tag.name == "code" {
            self.out.push_str(&code_span(&inner));
            return;
        }

        let core = inner.trim();
        if core.is_empty() {
            if !inner.is_empty() {
                self.space();
            }
            return;
        }

        if inner.starts_with(' ') {
            self.space();
        }
        self.out.push_str(&tag.open);
        self.out.push_str(core);
        self.out.push_str(&tag.close);
        if inner.ends_with(' ') {
            self.out.push(' ');
        }
    }

    fn finish(mut self) -> String {
        while let Some(tag) = self.open.pop() {
            self.emit_close(tag);
        }
        escape_block_start(self.out.trim())
    }
}

/// Whether `ch` in plain text would otherwise be read as markdown syntax.
///
/// `rest` is the text following `ch` in the same text node.
fn needs_escape(ch: char, prev: Option<char>, rest: &[char]) -> bool {
    let next = rest.first().copied();
    let is_space = |c: Option<char>| c.is_some_and(char::is_whitespace);
    match ch {
        '\\' => next.map_or(true, |c| c.is_ascii_punctuation()),
        '`' | '[' | ']' => true,
        // Surrounded by spaces they cannot open or close emphasis
        '*' => !(is_space(prev) && is_space(next)),
        '_' => {
            let word = |c: Option<char>| c.is_some_and(char::is_alphanumeric);
            !(is_space(prev) && is_space(next)) && !(word(prev) && word(next))
        }
        '~' => prev == Some('~') || next == Some('~'),
        // Only a tag or autolink start needs it
        '<' => next.map_or(true, |c| {
            c.is_ascii_alphabetic() || matches!(c, '/' | '!' | '?')
        }),
        '&' => {
            let name = rest
                .iter()
                .take_while(|c| c.is_ascii_alphanumeric() || **c == '#')
                .count();
            name > 0 && rest.get(name) == Some(&';')
        }
        _ => false,
    }
}

/// Escape a line start that would open a list, heading, or quote.
fn escape_block_start(line: &str) -> String {
    let ends_marker = |rest: &str| rest.is_empty() || rest.starts_with(' ');

    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    if (1..=9).contains(&digits) {
        let rest = &line[digits..];
        if rest.starts_with(['.', ')']) && ends_marker(&rest[1..]) {
            return format!("{}\\{}", &line[..digits], rest);
        }
    }

    let hashes = line.bytes().take_while(|&b| b == b'#').count();
    if (1..=6).contains(&hashes) && ends_marker(&line[hashes..]) {
        return format!("\\{}", line);
    }

    if (line.starts_with(['-', '+']) && ends_marker(&line[1..])) || line.starts_with('>') {
        return format!("\\{}", line);
    }

    line.to_string()
}

/// Wrap code text in a backtick fence longer than any run inside it.
fn code_span(code: &str) -> String {
    if code.is_empty() {
        return String::new();
    }

    let mut longest = 0;
    let mut run = 0;
    for ch in code.chars() {
        run = if ch == '`' { run + 1 } else { 0 };
        longest = longest.max(run);
    }
    let fence = "`".repeat(longest + 1);

    // One space on each side is stripped when rendering such spans
    let padded = code.starts_with('`')
        || code.ends_with('`')
        || (code.starts_with(' ') && code.ends_with(' ') && !code.trim().is_empty());
    let pad = if padded { " " } else { "" };

    format!("{fence}{pad}{code}{pad}{fence}")
}

/// Value of attribute `name` in a tag's attribute text, entities decoded.
fn attribute(attrs: &str, name: &str) -> Option<String> {
    attribute_regex()
        .captures_iter(attrs)
        .find(|caps| caps[1].eq_ignore_ascii_case(name))
        .and_then(|caps| caps.get(2).or_else(|| caps.get(3)).or_else(|| caps.get(4)))
        .map(|value| html_escape::decode_html_entities(value.as_str()).into_owned())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
