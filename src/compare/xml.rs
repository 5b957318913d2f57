use std::collections::BTreeSet;

use roxmltree::{Document, ParsingOptions};

/// Tag names of the root element's immediate children
///
/// Namespaced tags render as `{namespace}local`. Attributes, text and deeper
/// levels are not looked at.
pub fn child_tag_names(xml: &str) -> Result<BTreeSet<String>, roxmltree::Error> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let doc = Document::parse_with_options(xml, options)?;

    Ok(doc
        .root_element()
        .children()
        .filter(|node| node.is_element())
        .map(|node| {
            let tag = node.tag_name();
            match tag.namespace() {
                Some(ns) => format!("{{{}}}{}", ns, tag.name()),
                None => tag.name().to_string(),
            }
        })
        .collect())
}
