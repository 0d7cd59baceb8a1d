//! Markup stripping for ticket descriptions and free-form notification bodies.
//!
//! This is not an HTML parser. It removes tags, comments and the contents of
//! `<script>`/`<style>` elements, decodes the common entities, and collapses
//! whitespace. Block-level tags become word breaks so `<p>a</p><p>b</p>`
//! reads `a b` rather than `ab`.

/// Elements whose boundaries separate words.
const BLOCK_TAGS: &[&str] = &[
    "address",
    "article",
    "blockquote",
    "br",
    "dd",
    "div",
    "dl",
    "dt",
    "footer",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "header",
    "hr",
    "li",
    "ol",
    "p",
    "pre",
    "section",
    "table",
    "td",
    "th",
    "tr",
    "ul",
];

/// Elements whose text content is never visible.
const RAW_TEXT_TAGS: &[&str] = &["script", "style"];

/// Extract the visible text of an HTML fragment.
///
/// The result is trimmed and every whitespace run is collapsed to a single
/// space. GLPI escapes markup inside its JSON payloads (`&lt;p&gt;`), so when
/// entity decoding reveals new tags they are stripped in a second pass.
pub fn strip_html(input: &str) -> String {
    let mut text = strip_pass(input);
    if contains_tag(&text) {
        text = strip_pass(&text);
    }
    collapse_whitespace(&text)
}

/// Collapse whitespace runs into single spaces and trim both ends.
pub fn collapse_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

struct Tag {
    /// Byte length of the tag, including both angle brackets.
    len: usize,
    /// Lowercased element name; empty for comments and declarations.
    name: String,
    closing: bool,
}

fn strip_pass(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find('<') {
        decode_entities_into(&rest[..pos], &mut out);
        let candidate = &rest[pos..];

        let Some(tag) = parse_tag(candidate) else {
            out.push('<');
            rest = &candidate[1..];
            continue;
        };

        if BLOCK_TAGS.contains(&tag.name.as_str()) {
            out.push(' ');
        }
        rest = &candidate[tag.len..];

        if !tag.closing && RAW_TEXT_TAGS.contains(&tag.name.as_str()) {
            let close = format!("</{}", tag.name);
            rest = find_ignore_ascii_case(rest, &close).map_or("", |idx| &rest[idx..]);
        }
    }

    decode_entities_into(rest, &mut out);
    out
}

fn contains_tag(text: &str) -> bool {
    text.match_indices('<')
        .any(|(idx, _)| parse_tag(&text[idx..]).is_some())
}

/// Parse the tag at the start of `input`, which must begin with `<`.
///
/// Returns `None` when the `<` does not open a tag (e.g. `a < b`) or the tag
/// is never closed.
fn parse_tag(input: &str) -> Option<Tag> {
    let bytes = input.as_bytes();

    if input.starts_with("<!--") {
        let len = input[4..].find("-->").map_or(input.len(), |idx| idx + 7);
        return Some(Tag {
            len,
            name: String::new(),
            closing: false,
        });
    }

    match bytes.get(1) {
        Some(b'!' | b'?') => {
            let end = input.find('>')?;
            return Some(Tag {
                len: end + 1,
                name: String::new(),
                closing: false,
            });
        }
        Some(b'/') => {}
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return None,
    }

    let closing = bytes[1] == b'/';
    let name_start = if closing { 2 } else { 1 };
    let name_len = input[name_start..]
        .bytes()
        .take_while(u8::is_ascii_alphanumeric)
        .count();
    if name_len == 0 {
        return None;
    }
    let name = input[name_start..name_start + name_len].to_ascii_lowercase();

    // Find the closing `>`, skipping over quoted attribute values.
    let mut quote: Option<u8> = None;
    for (offset, &b) in bytes[name_start + name_len..].iter().enumerate() {
        match (quote, b) {
            (Some(q), _) if b == q => quote = None,
            (Some(_), _) => {}
            (None, b'"' | b'\'') => quote = Some(b),
            (None, b'>') => {
                return Some(Tag {
                    len: name_start + name_len + offset + 1,
                    name,
                    closing,
                });
            }
            (None, _) => {}
        }
    }
    None
}

fn find_ignore_ascii_case(haystack: &str, needle: &str) -> Option<usize> {
    // ASCII lowercasing keeps byte offsets intact.
    haystack.to_ascii_lowercase().find(needle)
}

fn decode_entities_into(input: &str, out: &mut String) {
    let mut rest = input;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        let candidate = &rest[pos..];
        match decode_entity(candidate) {
            Some((ch, len)) => {
                out.push(ch);
                rest = &candidate[len..];
            }
            None => {
                out.push('&');
                rest = &candidate[1..];
            }
        }
    }
    out.push_str(rest);
}

/// Decode the entity at the start of `input` (which begins with `&`).
///
/// Returns the decoded character and the byte length consumed.
fn decode_entity(input: &str) -> Option<(char, usize)> {
    // Longest entity handled is `&#x10FFFF;`.
    let end = input
        .get(1..)?
        .char_indices()
        .take(10)
        .find(|&(_, c)| c == ';')?
        .0
        + 1;
    let body = &input[1..end];

    let ch = match body {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" | "#39" => '\'',
        "nbsp" => ' ',
        _ => {
            let code = if let Some(hex) = body
                .strip_prefix("#x")
                .or_else(|| body.strip_prefix("#X"))
            {
                u32::from_str_radix(hex, 16).ok()?
            } else {
                body.strip_prefix('#')?.parse().ok()?
            };
            char::from_u32(code)?
        }
    };
    Some((ch, end + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_simple_markup() {
        assert_eq!(strip_html("<p>Paper stuck</p>"), "Paper stuck");
        assert_eq!(strip_html("plain text"), "plain text");
        assert_eq!(strip_html(""), "");
    }

    #[test]
    fn block_tags_separate_words() {
        assert_eq!(strip_html("<p>one</p><p>two</p>"), "one two");
        assert_eq!(strip_html("line<br/>break"), "line break");
        assert_eq!(strip_html("<b>bold</b>text"), "boldtext");
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(strip_html("  a \n\n\t b  "), "a b");
        assert_eq!(strip_html("<div>\n  <span>x</span>\n</div>"), "x");
    }

    #[test]
    fn decodes_entities() {
        assert_eq!(strip_html("Tom &amp; Jerry"), "Tom & Jerry");
        assert_eq!(strip_html("a&nbsp;b"), "a b");
        assert_eq!(strip_html("&quot;q&quot; &#39;s&#39;"), "\"q\" 's'");
        assert_eq!(strip_html("&#233;t&#xE9;"), "été");
        assert_eq!(strip_html("AT&T &bogus; &"), "AT&T &bogus; &");
    }

    #[test]
    fn strips_escaped_markup() {
        assert_eq!(strip_html("&lt;p&gt;Hi&lt;/p&gt;"), "Hi");
        assert_eq!(strip_html("if a &lt; b"), "if a < b");
    }

    #[test]
    fn drops_comments_scripts_and_styles() {
        assert_eq!(strip_html("a<!-- hidden -->b"), "ab");
        assert_eq!(
            strip_html("<style>p { color: red }</style><p>shown</p><SCRIPT>alert(1)</SCRIPT>"),
            "shown"
        );
        assert_eq!(strip_html("<!DOCTYPE html><html><body>x</body></html>"), "x");
    }

    #[test]
    fn keeps_stray_angle_brackets() {
        assert_eq!(strip_html("1 < 2 and 3 > 2"), "1 < 2 and 3 > 2");
        assert_eq!(strip_html("<unterminated"), "<unterminated");
        assert_eq!(strip_html("<3"), "<3");
    }

    #[test]
    fn attributes_with_angle_brackets() {
        assert_eq!(strip_html(r#"<a title="a>b" href='x'>link</a>"#), "link");
    }

    #[test]
    fn unclosed_script_swallows_rest() {
        assert_eq!(strip_html("before<script>never closed"), "before");
    }
}
