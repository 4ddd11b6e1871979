// src/config/parser.rs

//! Parser for package config files
//!
//! Parsing runs in two passes over the same text. `quick-xml` checks that the
//! file is well formed and decodes the `id`, `version` and `path` attributes.
//! A regex scan then finds the byte span of every `version` value so the
//! document can be rewritten in place. Both passes skip comments, CDATA and
//! processing instructions, and their results must agree.

use super::document::{ConfigDocument, ParsedPackage};
use crate::error::{Error, Result};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use regex::Regex;
use std::io::ErrorKind;
use std::ops::Range;
use std::path::Path;
use std::sync::LazyLock;
use tracing::debug;

/// Element declaring a package and its version
pub const PACKAGE_ELEMENT: &str = "package";

/// Element referencing a secondary package config (root file only)
pub const PACKAGE_CONFIG_ELEMENT: &str = "packageconfig";

const ID_ATTR: &str = "id";
const VERSION_ATTR: &str = "version";
const PATH_ATTR: &str = "path";

static MARKUP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?s)<!--.*?-->|<!\[CDATA\[.*?\]\]>|<\?.*?\?>|<!.*?>|<(?P<name>[A-Za-z_][\w.:-]*)(?P<attrs>(?:[^>"']|"[^"]*"|'[^']*')*)>"#,
    )
    .unwrap()
});

static ATTRIBUTE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?P<key>[A-Za-z_][\w.:-]*)\s*=\s*(?:"(?P<dq>[^"]*)"|'(?P<sq>[^']*)')"#).unwrap()
});

/// Declarations decoded by the XML pass
#[derive(Debug, Default)]
struct Declarations {
    /// (id, version) pairs in document order
    packages: Vec<(String, String)>,
    secondary_refs: Vec<String>,
}

/// Read and parse a package config file
pub fn parse_config_file(path: &Path) -> Result<ConfigDocument> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(Error::NotFound(path.to_path_buf()));
        }
        Err(e) if e.kind() == ErrorKind::InvalidData => {
            return Err(Error::parse(path, "file is not valid UTF-8"));
        }
        Err(source) => {
            return Err(Error::ReadFailure {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    parse_config_str(path, &content)
}

/// Parse package config text that was loaded from `path`
pub fn parse_config_str(path: &Path, content: &str) -> Result<ConfigDocument> {
    let declarations = read_declarations(path, content)?;
    let spans = locate_version_spans(content);

    if spans.len() != declarations.packages.len() {
        return Err(Error::parse(
            path,
            format!(
                "found {} package declarations but located {} package elements",
                declarations.packages.len(),
                spans.len()
            ),
        ));
    }

    let mut packages = Vec::with_capacity(spans.len());
    for ((id, version), span) in declarations.packages.into_iter().zip(spans) {
        let span = span.ok_or_else(|| {
            Error::parse(path, format!("could not locate the version of package '{}'", id))
        })?;
        let raw = quick_xml::escape::unescape(&content[span.clone()])
            .map_err(|e| Error::parse(path, format!("package '{}': {}", id, e)))?;
        if raw != version {
            return Err(Error::parse(
                path,
                format!("could not locate the version of package '{}'", id),
            ));
        }
        packages.push(ParsedPackage { id, version, span });
    }

    debug!(
        "Parsed {}: {} packages, {} package configs",
        path.display(),
        packages.len(),
        declarations.secondary_refs.len()
    );

    Ok(ConfigDocument::from_parts(
        path,
        content,
        packages,
        declarations.secondary_refs,
    ))
}

/// Walk the XML events, checking structure and collecting declarations
fn read_declarations(path: &Path, content: &str) -> Result<Declarations> {
    let mut reader = Reader::from_str(content);
    let mut declarations = Declarations::default();
    let mut depth = 0usize;
    let mut roots = 0usize;

    loop {
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(e) => {
                return Err(Error::parse(
                    path,
                    format!("{} (near byte {})", e, reader.buffer_position()),
                ));
            }
        };

        match event {
            Event::Start(element) => {
                if depth == 0 {
                    roots += 1;
                }
                depth += 1;
                collect(path, &element, &mut declarations)?;
            }
            Event::Empty(element) => {
                if depth == 0 {
                    roots += 1;
                }
                collect(path, &element, &mut declarations)?;
            }
            Event::End(element) => {
                depth = depth.checked_sub(1).ok_or_else(|| {
                    Error::parse(
                        path,
                        format!(
                            "unexpected closing tag </{}>",
                            String::from_utf8_lossy(element.name().as_ref())
                        ),
                    )
                })?;
            }
            Event::Text(text) if depth == 0 => {
                let text = String::from_utf8_lossy(&text);
                if !text.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}').is_empty() {
                    return Err(Error::parse(path, "text outside the root element"));
                }
            }
            Event::CData(_) if depth == 0 => {
                return Err(Error::parse(path, "CDATA outside the root element"));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if depth > 0 {
        return Err(Error::parse(path, "unexpected end of file: unclosed element"));
    }
    match roots {
        0 => Err(Error::parse(path, "no root element")),
        1 => Ok(declarations),
        n => Err(Error::parse(path, format!("expected one root element, found {}", n))),
    }
}

fn collect(path: &Path, element: &BytesStart<'_>, declarations: &mut Declarations) -> Result<()> {
    match element.name().as_ref() {
        name if name == PACKAGE_ELEMENT.as_bytes() => {
            let attrs = read_attributes(path, element)?;
            let id = required_attr(path, element, &attrs, ID_ATTR)?;
            let version = required_attr(path, element, &attrs, VERSION_ATTR)?;
            declarations.packages.push((id, version));
        }
        name if name == PACKAGE_CONFIG_ELEMENT.as_bytes() => {
            let attrs = read_attributes(path, element)?;
            let secondary = required_attr(path, element, &attrs, PATH_ATTR)?;
            declarations.secondary_refs.push(secondary);
        }
        _ => {}
    }
    Ok(())
}

/// Decode every attribute of `element`, rejecting duplicates
fn read_attributes(path: &Path, element: &BytesStart<'_>) -> Result<Vec<(String, String)>> {
    let mut attrs: Vec<(String, String)> = Vec::new();

    for attr in element.attributes() {
        let attr = attr.map_err(|e| Error::parse(path, e.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        if attrs.iter().any(|(existing, _)| *existing == key) {
            return Err(Error::parse(
                path,
                format!(
                    "<{}> element has a duplicate '{}' attribute",
                    String::from_utf8_lossy(element.name().as_ref()),
                    key
                ),
            ));
        }
        let value = attr
            .unescape_value()
            .map_err(|e| Error::parse(path, e.to_string()))?;
        attrs.push((key, value.into_owned()));
    }

    Ok(attrs)
}

fn required_attr(
    path: &Path,
    element: &BytesStart<'_>,
    attrs: &[(String, String)],
    name: &str,
) -> Result<String> {
    attrs
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.clone())
        .ok_or_else(|| {
            Error::parse(
                path,
                format!(
                    "<{}> element is missing the '{}' attribute",
                    String::from_utf8_lossy(element.name().as_ref()),
                    name
                ),
            )
        })
}

/// Byte span of the `version` value of every `<package>` tag, in document order
fn locate_version_spans(content: &str) -> Vec<Option<Range<usize>>> {
    MARKUP_RE
        .captures_iter(content)
        .filter(|caps| caps.name("name").map(|m| m.as_str()) == Some(PACKAGE_ELEMENT))
        .map(|caps| {
            let attrs = caps.name("attrs")?;
            ATTRIBUTE_RE
                .captures_iter(attrs.as_str())
                .find(|attr| &attr["key"] == VERSION_ATTR)
                .and_then(|attr| attr.name("dq").or_else(|| attr.name("sq")))
                .map(|value| attrs.start() + value.start()..attrs.start() + value.end())
        })
        .collect()
}
