//! Track parser for GPX route documents
//!
//! Each `<trk>` is one stage of the route; its `<trkseg>` children are read
//! in document order into one flat point list.
//!
//! Parsing runs in two passes:
//! 1. the strict `gpx` reader, which handles well-formed files
//! 2. a lenient tag scanner for everything else (truncated files, text in
//!    `<ele>`, broken coordinates), which keeps every point it can find

use crate::config::CoordinatePolicy;
use crate::error::{CoordinateAxis, ParseError};
use crate::series::TrackPoint;

/// Which pass produced the track
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStrategy {
    Standard,
    Lenient,
}

/// Flat point list plus the stage layout
#[derive(Debug, Clone)]
pub struct ParsedTrack {
    pub points: Vec<TrackPoint>,
    /// Flat index of the last point of each non-empty stage
    pub segment_ends: Vec<usize>,
    /// Stage names, aligned with `segment_ends`
    pub segment_names: Vec<Option<String>>,
    pub strategy: ParseStrategy,
}

impl ParsedTrack {
    fn new(strategy: ParseStrategy) -> Self {
        ParsedTrack {
            points: Vec::new(),
            segment_ends: Vec::new(),
            segment_names: Vec::new(),
            strategy,
        }
    }

    fn push_segment(&mut self, name: Option<String>, points: Vec<TrackPoint>) {
        if points.is_empty() {
            log::warn!("Skipping stage {:?} with no track points", name);
            return;
        }
        self.points.extend(points);
        self.segment_ends.push(self.points.len() - 1);
        self.segment_names.push(name);
    }

    pub fn segment_count(&self) -> usize {
        self.segment_ends.len()
    }
}

/// Parse GPX text into a flat point sequence grouped by stage
pub fn parse_track(text: &str, policy: CoordinatePolicy) -> Result<ParsedTrack, ParseError> {
    match gpx::read(text.as_bytes()) {
        Ok(document) => {
            log::debug!("Standard GPX parsing successful");
            return from_gpx(document);
        }
        Err(e) => {
            log::debug!("Standard GPX parsing failed, scanning leniently: {}", e);
        }
    }

    let parsed = scan_tracks(text, policy)?;
    log::info!(
        "Lenient scan recovered {} points in {} stages",
        parsed.points.len(),
        parsed.segment_count()
    );
    Ok(parsed)
}

fn from_gpx(document: gpx::Gpx) -> Result<ParsedTrack, ParseError> {
    if document.tracks.is_empty() {
        return Err(ParseError::NoSegments);
    }

    let mut parsed = ParsedTrack::new(ParseStrategy::Standard);
    for track in document.tracks {
        let points = track
            .segments
            .iter()
            .flat_map(|segment| segment.points.iter())
            .map(|waypoint| {
                let p = waypoint.point();
                TrackPoint::new(p.y(), p.x(), waypoint.elevation.unwrap_or(f64::NAN))
            })
            .collect();
        parsed.push_segment(track.name, points);
    }

    Ok(parsed)
}

// Lenient scanner

fn scan_tracks(text: &str, policy: CoordinatePolicy) -> Result<ParsedTrack, ParseError> {
    let blocks = element_blocks(text, "trk");
    if blocks.is_empty() {
        return Err(ParseError::NoSegments);
    }

    let mut parsed = ParsedTrack::new(ParseStrategy::Lenient);
    for block in blocks {
        // The stage name sits before the first segment
        let head_end = find_open_tag(block, "trkseg", 0).unwrap_or(block.len());
        let name = element_text(&block[..head_end], "name").map(|s| s.trim().to_string());

        let mut points = Vec::new();
        for (attrs, body) in track_point_tags(block) {
            let index = parsed.points.len() + points.len();
            let lat = read_coordinate(attrs, "lat", CoordinateAxis::Latitude, index, policy)?;
            let lon = read_coordinate(attrs, "lon", CoordinateAxis::Longitude, index, policy)?;
            let elevation = element_text(body, "ele")
                .and_then(|s| s.trim().parse::<f64>().ok())
                .unwrap_or(f64::NAN);
            points.push(TrackPoint::new(lat, lon, elevation));
        }
        parsed.push_segment(name, points);
    }

    Ok(parsed)
}

fn read_coordinate(
    attrs: &str,
    key: &str,
    axis: CoordinateAxis,
    index: usize,
    policy: CoordinatePolicy,
) -> Result<f64, ParseError> {
    let raw = attribute_value(attrs, key);
    if let Some(value) = raw.and_then(|s| s.trim().parse::<f64>().ok()) {
        return Ok(value);
    }

    match policy {
        CoordinatePolicy::Reject => Err(ParseError::InvalidCoordinate {
            index,
            axis,
            text: raw.map(str::to_string),
        }),
        CoordinatePolicy::Propagate => {
            log::warn!("Track point {} has no usable {}, keeping NaN", index, axis);
            Ok(f64::NAN)
        }
    }
}

/// Position of `<tag` followed by whitespace, `>` or `/`
fn find_open_tag(text: &str, tag: &str, from: usize) -> Option<usize> {
    let needle = format!("<{}", tag);
    let mut pos = from;
    while let Some(offset) = text.get(pos..)?.find(&needle) {
        let start = pos + offset;
        let next = text[start + needle.len()..].chars().next();
        match next {
            Some(c) if c == '>' || c == '/' || c.is_whitespace() => return Some(start),
            None => return None,
            _ => pos = start + needle.len(),
        }
    }
    None
}

/// Every `<tag ...> ... </tag>` block; an unclosed block runs to the end
fn element_blocks<'a>(text: &'a str, tag: &str) -> Vec<&'a str> {
    let close = format!("</{}>", tag);
    let mut blocks = Vec::new();
    let mut pos = 0;

    while let Some(start) = find_open_tag(text, tag, pos) {
        let end = text[start..]
            .find(&close)
            .map(|offset| start + offset)
            .unwrap_or(text.len());
        blocks.push(&text[start..end]);
        pos = (end + close.len()).min(text.len());
        if end == text.len() {
            break;
        }
    }

    blocks
}

/// (attributes, body) for each `<trkpt>` in a stage block
fn track_point_tags(block: &str) -> Vec<(&str, &str)> {
    let mut tags = Vec::new();
    let mut pos = 0;

    while let Some(start) = find_open_tag(block, "trkpt", pos) {
        let attrs_start = start + "<trkpt".len();
        let Some(header_len) = block[attrs_start..].find('>') else {
            // Cut inside the tag itself: the data ends at the last complete point
            log::warn!(
                "Dropping unterminated trackpoint at end of data: <trkpt{}",
                block[attrs_start..].trim_end()
            );
            break;
        };
        let header_end = attrs_start + header_len;
        let attrs = &block[attrs_start..header_end];

        if attrs.trim_end().ends_with('/') {
            tags.push((attrs, ""));
            pos = header_end + 1;
            continue;
        }

        let body_start = header_end + 1;
        let rest = &block[body_start..];
        let close = rest.find("</trkpt>");
        let next_open = find_open_tag(rest, "trkpt", 0);
        let body_len = match (close, next_open) {
            (Some(c), Some(n)) => c.min(n),
            (Some(c), None) => c,
            (None, Some(n)) => n,
            (None, None) => rest.len(),
        };
        tags.push((attrs, &rest[..body_len]));
        pos = body_start + body_len;
    }

    tags
}

fn attribute_value<'a>(attrs: &'a str, key: &str) -> Option<&'a str> {
    let mut pos = 0;
    while let Some(offset) = attrs[pos..].find(key) {
        let start = pos + offset;
        pos = start + key.len();

        let preceded_ok = attrs[..start]
            .chars()
            .next_back()
            .is_none_or(char::is_whitespace);
        let rest = attrs[pos..].trim_start();
        if !preceded_ok || !rest.starts_with('=') {
            continue;
        }

        let rest = rest[1..].trim_start();
        let quote = rest.chars().next()?;
        if quote != '"' && quote != '\'' {
            return None;
        }
        let value = &rest[1..];
        return value.find(quote).map(|end| &value[..end]);
    }
    None
}

fn element_text<'a>(text: &'a str, tag: &str) -> Option<&'a str> {
    let open = format!("<{}>", tag);
    let close = format!("</{}>", tag);
    let start = text.find(&open)? + open.len();
    let end = text[start..].find(&close)?;
    Some(&text[start..start + end])
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_STAGES: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="test" xmlns="http://www.topografix.com/GPX/1/1">
  <trk>
    <name>Day 1</name>
    <trkseg>
      <trkpt lat="46.0" lon="7.0"><ele>1000</ele></trkpt>
      <trkpt lat="46.01" lon="7.0"><ele>1010</ele></trkpt>
    </trkseg>
    <trkseg>
      <trkpt lat="46.02" lon="7.0"><ele>1020</ele></trkpt>
    </trkseg>
  </trk>
  <trk>
    <name>Day 2</name>
    <trkseg>
      <trkpt lat="46.03" lon="7.0"></trkpt>
      <trkpt lat="46.04" lon="7.0"><ele>990</ele></trkpt>
    </trkseg>
  </trk>
</gpx>"#;

    #[test]
    fn test_standard_parse_flattens_segments() {
        let parsed = parse_track(TWO_STAGES, CoordinatePolicy::Reject).unwrap();
        assert_eq!(parsed.strategy, ParseStrategy::Standard);
        assert_eq!(parsed.points.len(), 5);
        assert_eq!(parsed.segment_ends, vec![2, 4]);
        assert_eq!(parsed.segment_names[1].as_deref(), Some("Day 2"));
        assert!(parsed.points[3].elevation_m.is_nan());
        assert_eq!(parsed.points[4].elevation_m, 990.0);
    }

    #[test]
    fn test_non_numeric_elevation_falls_back_to_scan() {
        let text = TWO_STAGES.replace("<ele>1010</ele>", "<ele>n/a</ele>");
        let parsed = parse_track(&text, CoordinatePolicy::Reject).unwrap();
        assert_eq!(parsed.strategy, ParseStrategy::Lenient);
        assert_eq!(parsed.segment_ends, vec![2, 4]);
        assert!(parsed.points[1].elevation_m.is_nan());
        assert_eq!(parsed.points[2].elevation_m, 1020.0);
        assert_eq!(parsed.segment_names[0].as_deref(), Some("Day 1"));
    }

    #[test]
    fn test_truncated_file_keeps_points() {
        let cut = TWO_STAGES.find("<trkpt lat=\"46.04\"").unwrap();
        let parsed = parse_track(&TWO_STAGES[..cut], CoordinatePolicy::Reject).unwrap();
        assert_eq!(parsed.strategy, ParseStrategy::Lenient);
        assert_eq!(parsed.points.len(), 4);
        assert_eq!(parsed.segment_ends, vec![2, 3]);
    }

    #[test]
    fn test_cut_inside_trackpoint_tag_keeps_earlier_points() {
        let cut = TWO_STAGES.find("<trkpt lat=\"46.02\"").unwrap() + "<trkpt lat=\"46.02\" lon".len();
        let parsed = parse_track(&TWO_STAGES[..cut], CoordinatePolicy::Reject).unwrap();
        assert_eq!(parsed.strategy, ParseStrategy::Lenient);
        assert_eq!(parsed.points.len(), 2);
        assert_eq!(parsed.segment_ends, vec![1]);
        assert_eq!(parsed.points[1].latitude_deg, 46.01);
        assert_eq!(parsed.points[1].elevation_m, 1010.0);
    }

    #[test]
    fn test_self_closing_points() {
        let text = r#"<gpx><trk><trkseg>
            <trkpt lat="1.5" lon='2.5'/>
            <trkpt lon="2.6" lat="1.6" />
        </trkseg></trk></gpx>"#;
        let parsed = parse_track(text, CoordinatePolicy::Reject).unwrap();
        assert_eq!(parsed.points.len(), 2);
        assert_eq!(parsed.points[0].longitude_deg, 2.5);
        assert_eq!(parsed.points[1].latitude_deg, 1.6);
        assert!(parsed.points[1].elevation_m.is_nan());
    }

    #[test]
    fn test_no_tracks_is_no_segments() {
        let text = r#"<?xml version="1.0"?><gpx version="1.1" creator="t"></gpx>"#;
        assert_eq!(
            parse_track(text, CoordinatePolicy::Reject).unwrap_err(),
            ParseError::NoSegments
        );
        assert_eq!(
            parse_track("", CoordinatePolicy::Reject).unwrap_err(),
            ParseError::NoSegments
        );
    }

    #[test]
    fn test_empty_stage_is_skipped() {
        let text = r#"<gpx><trk><name>empty</name></trk>
            <trk><trkseg><trkpt lat="1" lon="2"><ele>3</ele></trkpt></trkseg></trk></gpx>"#;
        let parsed = parse_track(text, CoordinatePolicy::Reject).unwrap();
        assert_eq!(parsed.segment_ends, vec![0]);
        assert_eq!(parsed.segment_names, vec![None]);
    }

    #[test]
    fn test_tag_matching_ignores_longer_names() {
        assert_eq!(find_open_tag("<trkseg><trk>", "trk", 0), Some(8));
        assert_eq!(find_open_tag("<trkpt lat=\"1\">", "trk", 0), None);
    }

    #[test]
    fn test_attribute_lookup() {
        assert_eq!(attribute_value(r#" lat="1.0" lon="2.0""#, "lat"), Some("1.0"));
        assert_eq!(attribute_value(r#" xlat="9" lat = '4'"#, "lat"), Some("4"));
        assert_eq!(attribute_value(r#" lon="2.0""#, "lat"), None);
    }
}
