use std::sync::OnceLock;

use pulldown_cmark::{html, Event, Options, Parser};
use regex::Regex;

/// A piece of a message body, as the renderer sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    Code { language: String, content: String },
}

fn code_block() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)```(\w+)?\n(.*?)```").expect("static regex"))
}

/// Splits `text` into prose and fenced code blocks. Unlabelled fences are
/// tagged `text`; code content is trimmed.
pub fn parse_message(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut last = 0;

    for caps in code_block().captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        if whole.start() > last {
            segments.push(Segment::Text(text[last..whole.start()].to_string()));
        }
        segments.push(Segment::Code {
            language: caps.get(1).map_or("text", |m| m.as_str()).to_string(),
            content: caps.get(2).map_or("", |m| m.as_str()).trim().to_string(),
        });
        last = whole.end();
    }

    if last < text.len() {
        segments.push(Segment::Text(text[last..].to_string()));
    }
    segments
}

/// Renders a prose segment as HTML with GitHub-style tables, strikethrough
/// and task lists. Raw HTML in the source is escaped, not passed through.
pub fn render_markdown(text: &str) -> String {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS;
    let events = Parser::new_ext(text, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });
    let mut out = String::with_capacity(text.len() * 3 / 2);
    html::push_html(&mut out, events);
    out
}
