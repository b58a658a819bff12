//! # Format Validators
//!
//! Structural well-formedness checks for the recognized payload formats.
//! Validation is pure: it never mutates engine state and never touches the
//! store. Well-formedness here means syntactic validity per the format's
//! grammar — no schema of any kind is enforced.
//!
//! - JSON: the payload must decode as exactly one complete document.
//!   `serde_json` already rejects trailing garbage and truncated
//!   structures, which is the contract we need.
//! - XML: the payload must be one complete document — balanced, properly
//!   nested, correctly closed tags, a single root element, and no
//!   non-whitespace character data outside it. `quick-xml` checks end-tag
//!   names against the open-tag stack; the event walk below enforces the
//!   document-level shape.

use quick_xml::events::Event;
use quick_xml::Reader;

use jxvault_core::PayloadFormat;

use crate::error::EngineError;

/// Check that `payload` is one complete, well-formed document of `format`.
pub fn validate(format: PayloadFormat, payload: &[u8]) -> Result<(), EngineError> {
    match format {
        PayloadFormat::Json => validate_json(payload),
        PayloadFormat::Xml => validate_xml(payload),
    }
}

fn validate_json(payload: &[u8]) -> Result<(), EngineError> {
    serde_json::from_slice::<serde_json::Value>(payload)
        .map(|_| ())
        .map_err(|e| EngineError::InvalidData {
            format: PayloadFormat::Json,
            reason: e.to_string(),
        })
}

fn validate_xml(payload: &[u8]) -> Result<(), EngineError> {
    let invalid = |reason: String| EngineError::InvalidData {
        format: PayloadFormat::Xml,
        reason,
    };

    let mut reader = Reader::from_reader(payload);
    let mut buf = Vec::new();
    // Element nesting depth and number of root elements seen so far.
    let mut depth = 0usize;
    let mut roots = 0usize;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(_)) => {
                if depth == 0 {
                    if roots > 0 {
                        return Err(invalid("more than one root element".to_string()));
                    }
                    roots += 1;
                }
                depth += 1;
            }
            Ok(Event::End(_)) => {
                // Name mismatches are caught by the reader itself; a stray
                // closing tag with nothing open still lands here.
                if depth == 0 {
                    return Err(invalid("closing tag without an open element".to_string()));
                }
                depth -= 1;
            }
            Ok(Event::Empty(_)) => {
                if depth == 0 {
                    if roots > 0 {
                        return Err(invalid("more than one root element".to_string()));
                    }
                    roots += 1;
                }
            }
            Ok(Event::Text(text)) => {
                if depth == 0 && !text.iter().all(|b| b.is_ascii_whitespace()) {
                    return Err(invalid("character data outside the root element".to_string()));
                }
            }
            Ok(Event::CData(_)) => {
                if depth == 0 {
                    return Err(invalid("CDATA outside the root element".to_string()));
                }
            }
            Ok(Event::Decl(_) | Event::Comment(_) | Event::PI(_) | Event::DocType(_)) => {}
            Ok(Event::Eof) => break,
            Err(e) => return Err(invalid(e.to_string())),
        }
        buf.clear();
    }

    if depth != 0 {
        return Err(invalid(format!("{depth} unclosed element(s) at end of input")));
    }
    if roots == 0 {
        return Err(invalid("no root element".to_string()));
    }
    Ok(())
}
