//! Normalization of UiPath selector strings
//!
//! A literal selector is a run of sibling tags such as
//! `<wnd app='excel.exe' omit:title='x' /><ctrl name='OK' />`. It is parsed
//! inside a synthetic `<selector>` element that declares the `omit`
//! prefix, attributes under that prefix are dropped, and the fragment is
//! written back with double-quoted attributes. This is a heuristic layer
//! for regex matching, not a selector grammar.

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use quick_xml::NsReader;

const OMIT_NS: &[u8] = b"omit";

/// Text a selector rule should match against.
///
/// Literal selectors (starting with `<`) are normalized; expressions and
/// fragments that fail to parse are returned unchanged.
pub fn normalized_selector(selector: &str) -> String {
    if selector.starts_with('<') {
        strip_omitted(selector).unwrap_or_else(|| selector.to_string())
    } else {
        selector.to_string()
    }
}

/// Parse a selector fragment and re-serialize it without `omit:*` attributes
pub fn strip_omitted(selector: &str) -> Option<String> {
    let wrapped = format!(r#"<selector xmlns:omit="omit">{}</selector>"#, selector);
    let mut reader = NsReader::from_str(&wrapped);
    let mut out = String::with_capacity(wrapped.len());
    let mut depth = 0usize;

    loop {
        match reader.read_event().ok()? {
            Event::Start(ref e) => {
                write_tag(&reader, e, &mut out)?;
                out.push('>');
                depth += 1;
            }
            Event::Empty(ref e) => {
                write_tag(&reader, e, &mut out)?;
                out.push_str("/>");
            }
            Event::End(ref e) => {
                depth = depth.checked_sub(1)?;
                out.push_str("</");
                out.push_str(&String::from_utf8_lossy(e.name().as_ref()));
                out.push('>');
            }
            Event::Text(ref t) => {
                out.push_str(&String::from_utf8_lossy(t));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    (depth == 0).then_some(out)
}

fn write_tag(reader: &NsReader<&[u8]>, tag: &BytesStart<'_>, out: &mut String) -> Option<()> {
    out.push('<');
    out.push_str(&String::from_utf8_lossy(tag.name().as_ref()));

    for attr in tag.attributes() {
        let attr = attr.ok()?;
        if attr.key.as_namespace_binding().is_none() {
            let (resolved, _) = reader.resolve_attribute(attr.key);
            if matches!(resolved, ResolveResult::Bound(ns) if ns.as_ref() == OMIT_NS) {
                continue;
            }
        }

        let value = attr.unescape_value().ok()?;
        out.push(' ');
        out.push_str(&String::from_utf8_lossy(attr.key.as_ref()));
        out.push_str("=\"");
        out.push_str(&escape_attribute(&value));
        out.push('"');
    }

    Some(())
}

fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
