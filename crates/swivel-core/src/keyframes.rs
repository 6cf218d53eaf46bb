//! Keyframe synthesis from sparse style descriptions.
//!
//! This module provides:
//! - [`PropertyTrack`]: a property's value over the animation timeline
//! - [`KeyframeSequence`]: the canonical per-property track map handed to the
//!   host runtime
//! - [`build_keyframes`]: the from/to merge producing a sequence
//!
//! A sequence is purely descriptive. It is constructed fresh per transition
//! request and discarded once the host animation has started; its end-state
//! semantics survive as the [`StyleMap`] returned by
//! [`KeyframeSequence::final_styles`].

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::style::{StyleMap, StyleValue};

/// Property keys that configure timing or compositing rather than describing
/// a visual property. They never appear in extracted final styles.
const META_KEYS: [&str; 4] = ["composite", "computedOffset", "easing", "offset"];

/// Check whether a property key is a timing/compositing meta key.
pub fn is_meta_key(property: &str) -> bool {
    META_KEYS.contains(&property)
}

/// A single property's value over the animation timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyTrack {
    /// The property is set once; the host applies it at the end of the
    /// animation rather than sampling it.
    Fixed(StyleValue),
    /// Values sampled across the timeline: first is the start, last is the
    /// end. A one-element track holds the property at that value for the
    /// whole duration.
    Sampled(Vec<StyleValue>),
}

impl PropertyTrack {
    /// The value the property ends at.
    pub fn final_value(&self) -> Option<&StyleValue> {
        match self {
            Self::Fixed(value) => Some(value),
            Self::Sampled(values) => values.last(),
        }
    }

    /// True for a sampled (list-valued) track.
    pub fn is_sampled(&self) -> bool {
        matches!(self, Self::Sampled(_))
    }
}

/// The canonical keyframe description driving one native animation.
///
/// An ordered mapping from property name to [`PropertyTrack`]. A property
/// absent from the sequence is untouched by the animation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyframeSequence {
    tracks: IndexMap<String, PropertyTrack>,
}

impl KeyframeSequence {
    /// Create an empty sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sampled track, builder style.
    pub fn sampled(
        mut self,
        property: impl Into<String>,
        values: impl IntoIterator<Item = impl Into<StyleValue>>,
    ) -> Self {
        self.tracks.insert(
            property.into(),
            PropertyTrack::Sampled(values.into_iter().map(Into::into).collect()),
        );
        self
    }

    /// Add a fixed track, builder style.
    pub fn fixed(mut self, property: impl Into<String>, value: impl Into<StyleValue>) -> Self {
        self.tracks
            .insert(property.into(), PropertyTrack::Fixed(value.into()));
        self
    }

    /// Get a property's track.
    pub fn track(&self, property: &str) -> Option<&PropertyTrack> {
        self.tracks.get(property)
    }

    /// Iterate over tracks in sequence order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyTrack)> {
        self.tracks.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of tracks in the sequence.
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Check whether the sequence has no tracks.
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// True iff at least one track is sampled (list-valued). This is how a
    /// ready-made multi-point sequence is told apart from endpoint styles.
    pub fn has_sampled_track(&self) -> bool {
        self.tracks.values().any(PropertyTrack::is_sampled)
    }

    /// Extract the styles the animation ends at.
    ///
    /// For each non-meta property, the last sample of a sampled track or the
    /// value of a fixed track, in sequence order. Meta keys (`composite`,
    /// `computedOffset`, `easing`, `offset`) are skipped.
    pub fn final_styles(&self) -> StyleMap {
        let mut styles = StyleMap::new();
        for (property, track) in self.iter() {
            if is_meta_key(property) {
                continue;
            }
            if let Some(value) = track.final_value() {
                styles.insert(property, value.clone());
            }
        }
        styles
    }

    /// Flatten the sequence into a plain style map, taking each track's final
    /// value. Used when a caller supplied a sequence with no sampled tracks,
    /// which carries only endpoint semantics.
    pub fn as_endpoint_styles(&self) -> StyleMap {
        let mut styles = StyleMap::new();
        for (property, track) in self.iter() {
            if let Some(value) = track.final_value() {
                styles.insert(property, value.clone());
            }
        }
        styles
    }
}

impl From<&StyleMap> for KeyframeSequence {
    /// A style map viewed as a sequence of fixed tracks.
    fn from(styles: &StyleMap) -> Self {
        let mut sequence = Self::new();
        for (property, value) in styles.iter() {
            sequence
                .tracks
                .insert(property.to_string(), PropertyTrack::Fixed(value.clone()));
        }
        sequence
    }
}

/// Merge partial `from`/`to` style maps into one keyframe sequence.
///
/// Every property in `from` seeds a one-element sampled track. Every property
/// in `to` then either appends to its seeded track, producing a two-point
/// `[start, end]` track, or lands as a fixed track set at the end of the
/// animation. Properties present only in `from` stay one-element tracks: the
/// host holds them at that value for the duration, which is the animation's
/// starting snapshot.
///
/// Property names and values are not validated here.
pub fn build_keyframes(from: Option<&StyleMap>, to: &StyleMap) -> KeyframeSequence {
    let mut tracks: IndexMap<String, PropertyTrack> = IndexMap::new();

    if let Some(from) = from {
        for (property, value) in from.iter() {
            tracks.insert(
                property.to_string(),
                PropertyTrack::Sampled(vec![value.clone()]),
            );
        }
    }

    for (property, value) in to.iter() {
        if let Some(PropertyTrack::Sampled(values)) = tracks.get_mut(property) {
            values.push(value.clone());
            continue;
        }
        tracks.insert(property.to_string(), PropertyTrack::Fixed(value.clone()));
    }

    KeyframeSequence { tracks }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_keyframes_merges_endpoints() {
        let from = StyleMap::new().set("color", "red");
        let to = StyleMap::new().set("color", "blue").set("width", "10px");

        let sequence = build_keyframes(Some(&from), &to);

        assert_eq!(
            sequence.track("color"),
            Some(&PropertyTrack::Sampled(vec![
                "red".into(),
                "blue".into()
            ]))
        );
        assert_eq!(
            sequence.track("width"),
            Some(&PropertyTrack::Fixed("10px".into()))
        );
    }

    #[test]
    fn test_build_keyframes_keeps_from_only_properties_static() {
        let from = StyleMap::new().set("opacity", 0.4).set("color", "red");
        let to = StyleMap::new().set("color", "blue");

        let sequence = build_keyframes(Some(&from), &to);

        // A one-element track: the starting snapshot, held for the duration.
        assert_eq!(
            sequence.track("opacity"),
            Some(&PropertyTrack::Sampled(vec![0.4.into()]))
        );
    }

    #[test]
    fn test_build_keyframes_without_from() {
        let to = StyleMap::new().set("opacity", 1.0);
        let sequence = build_keyframes(None, &to);

        assert_eq!(
            sequence.track("opacity"),
            Some(&PropertyTrack::Fixed(1.0.into()))
        );
        assert!(!sequence.has_sampled_track());
    }

    #[test]
    fn test_sampled_track_detection() {
        let explicit = KeyframeSequence::new().sampled("opacity", [0.0, 1.0]);
        assert!(explicit.has_sampled_track());

        let endpoint_only = KeyframeSequence::new().fixed("opacity", 1.0);
        assert!(!endpoint_only.has_sampled_track());
    }

    #[test]
    fn test_final_styles_takes_last_sample() {
        let sequence = KeyframeSequence::new()
            .sampled("opacity", [0.0, 0.6, 1.0])
            .fixed("width", "10px");

        let styles = sequence.final_styles();
        assert_eq!(styles.get("opacity"), Some(&StyleValue::Number(1.0)));
        assert_eq!(styles.get("width"), Some(&StyleValue::Text("10px".into())));
    }

    #[test]
    fn test_final_styles_excludes_meta_keys() {
        let sequence = KeyframeSequence::new()
            .sampled("opacity", [0.0, 1.0])
            .fixed("easing", "ease-in")
            .fixed("offset", 0.5)
            .fixed("composite", "add");

        let styles = sequence.final_styles();
        assert_eq!(styles.len(), 1);
        assert_eq!(styles.get("opacity"), Some(&StyleValue::Number(1.0)));
    }

    #[test]
    fn test_final_styles_follow_sequence_order() {
        let sequence = KeyframeSequence::new()
            .sampled("width", ["0px", "10px"])
            .sampled("opacity", [0.0, 1.0]);

        let keys: Vec<&str> = sequence.final_styles().iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["width", "opacity"]);
    }
}
