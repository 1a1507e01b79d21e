//! Destination subpath codec
//!
//! Grammar:
//! ```text
//! token      = ["#"] pair *("&" pair)
//! pair       = key "=" value
//! page       = "page=" digits
//! annotation = "annotation=" id              ; percent-encoded
//! offset     = "offset=" [num] "," [num] ["," [num]]    ; left, top, zoom
//! rect       = "rect=" num "," num "," num "," num      ; left, bottom, right, top
//! selection  = "selection=" digits "," digits "," digits "," digits
//! color      = "color=" name
//! num        = ["+" / "-"] digits ["." digits]
//! ```
//!
//! Keys may appear in any order and unknown keys are skipped. Only the page is
//! mandatory: a malformed `offset`, `rect` or `selection` drops that field and
//! leaves the rest of the record intact.

use thiserror::Error;

use super::types::DestinationRecord;
use crate::geometry::{PartialPoint, Rect};
use crate::selection::SelectionRange;

/// Destination decoding errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Destination has no page")]
    MissingPage,

    #[error("Invalid page number '{0}'")]
    InvalidPage(String),
}

/// Serialize a record to its `#page=...` wire form
pub fn encode(record: &DestinationRecord) -> String {
    let mut out = format!("#page={}", record.page);

    if let Some(selection) = &record.selection {
        out.push_str(&format!(
            "&selection={},{},{},{}",
            selection.begin_index, selection.begin_offset, selection.end_index, selection.end_offset
        ));
    }

    if let Some(id) = record.annotation_id.as_deref().filter(|id| !id.is_empty()) {
        out.push_str("&annotation=");
        out.push_str(&urlencoding::encode(id));
    }

    if let Some(offset) = record.offset {
        let left = offset.left.filter(|v| v.is_finite());
        let top = offset.top.filter(|v| v.is_finite());
        if left.is_some() || top.is_some() {
            // zoom slot is always left unspecified
            out.push_str(&format!(
                "&offset={},{},",
                left.map(format_number).unwrap_or_default(),
                top.map(format_number).unwrap_or_default()
            ));
        }
    }

    if let Some(rect) = record.rect.filter(Rect::is_valid) {
        out.push_str(&format!(
            "&rect={},{},{},{}",
            format_number(rect.left),
            format_number(rect.bottom),
            format_number(rect.right),
            format_number(rect.top)
        ));
    }

    if let Some(color) = record.color.as_deref().filter(|c| !c.is_empty()) {
        out.push_str("&color=");
        out.push_str(color);
    }

    out
}

/// Parse a destination token; the page is mandatory
pub fn decode(token: &str) -> Result<DestinationRecord, ParseError> {
    decode_inner(token, None)
}

/// Parse a destination token, using `default_page` when no page key is present
pub fn decode_with_default_page(
    token: &str,
    default_page: u32,
) -> Result<DestinationRecord, ParseError> {
    decode_inner(token, Some(default_page))
}

fn decode_inner(token: &str, default_page: Option<u32>) -> Result<DestinationRecord, ParseError> {
    let token = token.trim();
    let body = token.strip_prefix('#').unwrap_or(token);

    let mut page = None;
    let mut annotation_id = None;
    let mut offset = None;
    let mut rect = None;
    let mut selection = None;
    let mut color = None;

    for pair in body.split('&') {
        let Some((key, value)) = pair.split_once('=') else {
            continue;
        };
        // first occurrence of a key wins
        match key.trim() {
            "page" if page.is_none() => page = Some(value.trim()),
            "annotation" if annotation_id.is_none() => {
                annotation_id = Some(value).filter(|v| !v.is_empty()).map(decode_id)
            }
            "offset" if offset.is_none() => offset = Some(parse_offset(value)),
            "rect" if rect.is_none() => rect = Some(parse_rect(value)),
            "selection" if selection.is_none() => selection = Some(parse_selection(value)),
            "color" if color.is_none() => {
                color = Some(value.trim()).filter(|v| !v.is_empty()).map(str::to_string)
            }
            _ => {}
        }
    }

    let page = match (page, default_page) {
        (Some(raw), _) => parse_page(raw)?,
        (None, Some(default)) => default,
        (None, None) => return Err(ParseError::MissingPage),
    };

    Ok(DestinationRecord {
        page,
        annotation_id,
        offset: offset.flatten(),
        rect: rect.flatten(),
        selection: selection.flatten(),
        color,
    })
}

fn parse_page(raw: &str) -> Result<u32, ParseError> {
    match raw.parse::<u32>() {
        Ok(page) if page >= 1 => Ok(page),
        _ => Err(ParseError::InvalidPage(raw.to_string())),
    }
}

/// Percent-decoded annotation id; malformed escapes are kept verbatim
fn decode_id(raw: &str) -> String {
    urlencoding::decode(raw)
        .map(|id| id.into_owned())
        .unwrap_or_else(|_| raw.to_string())
}

/// `left,top[,zoom]` with empty components meaning unspecified
fn parse_offset(value: &str) -> Option<PartialPoint> {
    let parts: Vec<&str> = value.split(',').collect();
    if parts.len() < 2 || parts.len() > 3 {
        return None;
    }

    let left = parse_optional_number(parts[0])?;
    let top = parse_optional_number(parts[1])?;
    if let Some(zoom) = parts.get(2) {
        parse_optional_number(zoom)?;
    }
    if left.is_none() && top.is_none() {
        return None;
    }
    Some(PartialPoint::new(left, top))
}

/// `left,bottom,right,top`, all four required
fn parse_rect(value: &str) -> Option<Rect> {
    let parts: Vec<&str> = value.split(',').collect();
    if parts.len() != 4 {
        return None;
    }

    let left = parse_number(parts[0])?;
    let bottom = parse_number(parts[1])?;
    let right = parse_number(parts[2])?;
    let top = parse_number(parts[3])?;
    Some(Rect::new(left, top, right, bottom))
}

fn parse_selection(value: &str) -> Option<SelectionRange> {
    let parts = value
        .split(',')
        .map(|part| part.trim().parse::<u32>().ok())
        .collect::<Option<Vec<u32>>>()?;
    match parts.as_slice() {
        [begin_index, begin_offset, end_index, end_offset] => SelectionRange::new(
            *begin_index,
            *begin_offset,
            *end_index,
            *end_offset,
        )
        .ok(),
        _ => None,
    }
}

/// `Some(None)` for an empty component, `None` for a malformed one
fn parse_optional_number(raw: &str) -> Option<Option<f64>> {
    if raw.trim().is_empty() {
        Some(None)
    } else {
        parse_number(raw).map(Some)
    }
}

/// Signed decimal with optional fraction and exponent; rejects `inf`/`NaN`
fn parse_number(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    let unsigned = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    let mantissa = unsigned
        .split_once(['e', 'E'])
        .map_or(unsigned, |(mantissa, _)| mantissa);

    let has_digit = mantissa.chars().any(|c| c.is_ascii_digit());
    let well_formed = mantissa.chars().all(|c| c.is_ascii_digit() || c == '.')
        && mantissa.matches('.').count() <= 1;
    if !has_digit || !well_formed {
        return None;
    }

    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn format_number(value: f64) -> String {
    if value == 0.0 {
        // avoid "-0"
        "0".to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_page_only() {
        let record = decode("#page=3").unwrap();
        assert_eq!(record, DestinationRecord::page(3));
    }

    #[test]
    fn test_decode_without_hash_prefix() {
        assert_eq!(decode("page=7").unwrap().page, 7);
    }

    #[test]
    fn test_decode_is_order_independent() {
        let a = decode("#page=2&annotation=15R&rect=1,2,3,4").unwrap();
        let b = decode("#rect=1,2,3,4&annotation=15R&page=2").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.rect, Some(Rect::new(1.0, 4.0, 3.0, 2.0)));
    }

    #[test]
    fn test_decode_full_offset() {
        let record = decode("#page=5&offset=100,200,1.5").unwrap();
        assert_eq!(record.offset, Some(PartialPoint::new(Some(100.0), Some(200.0))));
        assert_eq!(record.annotation_id, None);
        assert_eq!(record.rect, None);
    }

    #[test]
    fn test_decode_empty_offset_component_is_unspecified() {
        let record = decode("#page=5&offset=,350.5,").unwrap();
        assert_eq!(record.offset, Some(PartialPoint::new(None, Some(350.5))));

        let record = decode("#page=5&offset=-12,").unwrap();
        assert_eq!(record.offset, Some(PartialPoint::new(Some(-12.0), None)));
    }

    #[test]
    fn test_decode_all_empty_offset_is_absent() {
        assert_eq!(decode("#page=5&offset=,,").unwrap().offset, None);
    }

    #[test]
    fn test_decode_tolerates_malformed_rect() {
        let record = decode("#page=3&rect=a,b,c").unwrap();
        assert_eq!(record.page, 3);
        assert_eq!(record.rect, None);

        assert_eq!(decode("#page=3&rect=1,2,3").unwrap().rect, None);
        assert_eq!(decode("#page=3&rect=1,2,3,x").unwrap().rect, None);
        assert_eq!(decode("#page=3&rect=1,2,3,inf").unwrap().rect, None);
    }

    #[test]
    fn test_decode_tolerates_malformed_offset() {
        let record = decode("#page=3&offset=abc,10,1&annotation=9R").unwrap();
        assert_eq!(record.offset, None);
        assert_eq!(record.annotation_id.as_deref(), Some("9R"));

        assert_eq!(decode("#page=3&offset=1").unwrap().offset, None);
        assert_eq!(decode("#page=3&offset=1,2,3,4").unwrap().offset, None);
        // a bad zoom spoils the whole offset
        assert_eq!(decode("#page=2&offset=100,200,abc").unwrap().offset, None);
        assert_eq!(decode("#page=2&offset=100,200,").unwrap().offset.unwrap().top, Some(200.0));
    }

    #[test]
    fn test_decode_ignores_unknown_keys() {
        let record = decode("#page=2&zoom=3&search=foo&novalue").unwrap();
        assert_eq!(record, DestinationRecord::page(2));
    }

    #[test]
    fn test_decode_missing_page_fails() {
        assert_eq!(decode("#annotation=1R"), Err(ParseError::MissingPage));
        assert_eq!(decode(""), Err(ParseError::MissingPage));
    }

    #[test]
    fn test_decode_invalid_page_fails() {
        assert!(matches!(decode("#page=0"), Err(ParseError::InvalidPage(_))));
        assert!(matches!(decode("#page=two"), Err(ParseError::InvalidPage(_))));
    }

    #[test]
    fn test_decode_with_default_page() {
        let record = decode_with_default_page("annotation=3R", 1).unwrap();
        assert_eq!(record.page, 1);
        assert_eq!(record.annotation_id.as_deref(), Some("3R"));

        // an explicit page still wins
        assert_eq!(decode_with_default_page("page=9", 1).unwrap().page, 9);
    }

    #[test]
    fn test_decode_selection_and_color() {
        let record = decode("#page=1&selection=4,0,6,12&color=yellow").unwrap();
        assert_eq!(record.selection, Some(SelectionRange::new(4, 0, 6, 12).unwrap()));
        assert_eq!(record.color.as_deref(), Some("yellow"));

        // end before begin is not a range
        assert_eq!(decode("#page=1&selection=6,0,4,12").unwrap().selection, None);
    }

    #[test]
    fn test_encode_page_only() {
        assert_eq!(encode(&DestinationRecord::page(12)), "#page=12");
    }

    #[test]
    fn test_encode_offset_with_undefined_side() {
        let record = DestinationRecord::page(1).with_offset(None, Some(420.0));
        assert_eq!(encode(&record), "#page=1&offset=,420,");
    }

    #[test]
    fn test_encode_skips_empty_offset_and_invalid_rect() {
        let record = DestinationRecord::page(1)
            .with_offset(None, None)
            .with_rect(Rect::new(0.0, f64::NAN, 1.0, 1.0));
        assert_eq!(encode(&record), "#page=1");
    }

    #[test]
    fn test_encode_all_fields() {
        let record = DestinationRecord::page(3)
            .with_selection(SelectionRange::new(1, 2, 3, 4).unwrap())
            .with_annotation("27R")
            .with_offset(Some(10.5), Some(-2.0))
            .with_rect(Rect::new(1.0, 4.0, 3.0, 2.0))
            .with_color("red");
        assert_eq!(
            encode(&record),
            "#page=3&selection=1,2,3,4&annotation=27R&offset=10.5,-2,&rect=1,2,3,4&color=red"
        );
    }

    #[test]
    fn test_encode_escapes_annotation_id() {
        let record = DestinationRecord::page(1).with_annotation("a&b%c");
        let token = encode(&record);
        assert_eq!(token, "#page=1&annotation=a%26b%25c");
        assert_eq!(decode(&token).unwrap(), record);

        assert_eq!(encode(&DestinationRecord::page(1).with_annotation("")), "#page=1");
    }

    #[test]
    fn test_round_trip_preserves_populated_fields() {
        let records = [
            DestinationRecord::page(1),
            DestinationRecord::page(8).with_annotation("101R"),
            DestinationRecord::page(2).with_offset(Some(72.25), None),
            DestinationRecord::page(2).with_offset(None, Some(0.0)),
            DestinationRecord::page(40)
                .with_offset(Some(-3.5), Some(612.0))
                .with_rect(Rect::new(56.7, 700.1, 300.0, 688.25)),
            DestinationRecord::page(6)
                .with_selection(SelectionRange::new(0, 5, 2, 0).unwrap())
                .with_color("green"),
        ];

        for record in records {
            assert_eq!(decode(&encode(&record)).unwrap(), record, "{}", encode(&record));
        }
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("12"), Some(12.0));
        assert_eq!(parse_number("-0.5"), Some(-0.5));
        assert_eq!(parse_number("+3."), Some(3.0));
        assert_eq!(parse_number(".25"), Some(0.25));
        assert_eq!(parse_number("1e3"), Some(1000.0));
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("1.2.3"), None);
        assert_eq!(parse_number("-"), None);
    }
}
