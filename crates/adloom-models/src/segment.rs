//! Query responses and video segment extraction.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::timestamp::seconds_to_mmss;

/// A raw source node returned by a group query.
///
/// Only nodes tagged `video` carry segment timestamps; other node types
/// (documents, transcripts) contribute to the answer but not to segments.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct SourceNode {
    #[serde(default)]
    pub node_type: String,
    /// Segment start in seconds, when the node has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<f64>,
    /// Segment end in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_name: Option<String>,
}

/// A time-coded video segment derived from a query source.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct VideoSegment {
    /// Why this segment matches the query.
    pub reasoning: String,
    /// Start timestamp for display (M:SS).
    pub start_time: String,
    /// End timestamp for display (M:SS).
    pub end_time: String,
    /// Raw start in seconds, when the source provided one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_seconds: Option<f64>,
    /// Raw end in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_seconds: Option<f64>,
}

impl VideoSegment {
    /// Build a segment from a video source node.
    ///
    /// Reasoning falls back from source text to description to a generic
    /// label; empty strings count as absent.
    pub fn from_source(source: &SourceNode) -> Self {
        let reasoning = non_empty(&source.text)
            .or_else(|| non_empty(&source.description))
            .unwrap_or_else(|| {
                format!(
                    "Video segment from {}",
                    source.video_name.as_deref().unwrap_or("video")
                )
            });

        Self {
            reasoning,
            start_time: seconds_to_mmss(source.start_time),
            end_time: seconds_to_mmss(source.end_time),
            start_seconds: source.start_time,
            end_seconds: source.end_time,
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_deref().filter(|s| !s.is_empty()).map(str::to_string)
}

/// Shaped result of a group query.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct QueryOutcome {
    /// The question that was asked.
    pub query: String,
    /// Free-text answer from the understanding service.
    pub answer: String,
    /// Time-coded segments, built from video source nodes only.
    pub segments: Vec<VideoSegment>,
}

impl QueryOutcome {
    /// Shape a raw query response.
    ///
    /// Segments come from sources with `node_type == "video"`, in their
    /// original relative order; every other node type is skipped.
    pub fn from_answer(
        query: impl Into<String>,
        answer: impl Into<String>,
        sources: &[SourceNode],
    ) -> Self {
        let segments = sources
            .iter()
            .filter(|s| s.node_type == "video")
            .map(VideoSegment::from_source)
            .collect();

        Self {
            query: query.into(),
            answer: answer.into(),
            segments,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video_source(start: f64, text: &str) -> SourceNode {
        SourceNode {
            node_type: "video".to_string(),
            start_time: Some(start),
            end_time: Some(start + 10.0),
            text: Some(text.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_segments_keep_only_video_nodes_in_order() {
        let sources = vec![
            video_source(10.0, "first"),
            SourceNode {
                node_type: "document".to_string(),
                text: Some("a chunk".to_string()),
                ..Default::default()
            },
            video_source(90.0, "second"),
        ];

        let outcome = QueryOutcome::from_answer("where is goku?", "In two scenes.", &sources);

        assert_eq!(outcome.segments.len(), 2);
        assert_eq!(outcome.segments[0].reasoning, "first");
        assert_eq!(outcome.segments[1].reasoning, "second");
        assert_eq!(outcome.answer, "In two scenes.");
    }

    #[test]
    fn test_segment_timestamps() {
        let segment = VideoSegment::from_source(&video_source(65.0, "x"));
        assert_eq!(segment.start_time, "1:05");
        assert_eq!(segment.end_time, "1:15");
        assert_eq!(segment.start_seconds, Some(65.0));
    }

    #[test]
    fn test_segment_without_timestamps_renders_zero() {
        let source = SourceNode {
            node_type: "video".to_string(),
            text: Some("x".to_string()),
            ..Default::default()
        };
        let segment = VideoSegment::from_source(&source);
        assert_eq!(segment.start_time, "0:00");
        assert_eq!(segment.end_time, "0:00");
        assert_eq!(segment.start_seconds, None);
    }

    #[test]
    fn test_reasoning_fallback_chain() {
        let mut source = SourceNode {
            node_type: "video".to_string(),
            text: Some(String::new()),
            description: Some("a dramatic scene".to_string()),
            video_name: Some("goku.mp4".to_string()),
            ..Default::default()
        };
        // Empty text falls through to description.
        assert_eq!(
            VideoSegment::from_source(&source).reasoning,
            "a dramatic scene"
        );

        source.description = None;
        assert_eq!(
            VideoSegment::from_source(&source).reasoning,
            "Video segment from goku.mp4"
        );

        source.video_name = None;
        assert_eq!(
            VideoSegment::from_source(&source).reasoning,
            "Video segment from video"
        );
    }
}
