//! Catalog models.
//!
//! Row models mirror what a single query loads from the catalog. The
//! `*Details` types are the denormalized API view of a release, where an
//! absent optional value means the key is left out of the JSON entirely.

use serde::Serialize;

// =============================================================================
// Row Models
// =============================================================================

/// Release group as loaded together with its release.
#[derive(Clone, Debug, PartialEq)]
pub struct ReleaseGroup {
    pub id: i64,
    pub gid: String,
    pub name: String,
    /// Primary type label ("Album", "Single", ...)
    pub primary_type: Option<String>,
}

/// A release with its one-to-one associations resolved to labels.
#[derive(Clone, Debug, PartialEq)]
pub struct Release {
    pub id: i64,
    pub gid: String,
    pub name: String,
    pub status: Option<String>,
    pub packaging: Option<String>,
    pub language: Option<String>,
    pub script: Option<String>,
    pub artist_credit: String,
    pub release_group: ReleaseGroup,
}

/// A release reduced to its identifiers.
#[derive(Clone, Debug, PartialEq)]
pub struct PlainRelease {
    pub id: i64,
    pub gid: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Medium {
    pub id: i64,
    pub position: i32,
    pub name: Option<String>,
    /// Format label ("CD", "12\" Vinyl", ...)
    pub format: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Track {
    pub id: i64,
    pub gid: String,
    pub medium_id: i64,
    pub position: i32,
    /// Free-text number as printed on the medium, e.g. "A1".
    pub number: String,
    pub name: String,
    /// Length in milliseconds.
    pub length: Option<i64>,
    pub artist_credit: String,
}

// =============================================================================
// Release Details (API Response)
// =============================================================================

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReleaseGroupDetails {
    pub id: String,
    pub name: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub primary_type: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub secondary_types: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TrackDetails {
    pub id: String,
    pub name: String,
    pub position: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    /// Length in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MediumDetails {
    pub position: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    pub tracks: Vec<TrackDetails>,
}

/// Full release view: release group, taxonomy labels and the track listing
/// grouped by medium.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReleaseDetails {
    pub id: String,
    pub name: String,
    pub release_group: ReleaseGroupDetails,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub packaging: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,
    pub mediums: Vec<MediumDetails>,
}

impl From<Medium> for MediumDetails {
    fn from(medium: Medium) -> Self {
        MediumDetails {
            position: medium.position,
            name: medium.name.filter(|name| !name.is_empty()),
            format: medium.format,
            tracks: Vec::new(),
        }
    }
}

impl From<Track> for TrackDetails {
    fn from(track: Track) -> Self {
        // The number is only worth reporting when it says something the
        // position doesn't, e.g. vinyl sides ("A1") or "1a".
        let number = if track.number == track.position.to_string() {
            None
        } else {
            Some(track.number)
        };
        TrackDetails {
            id: track.gid,
            name: track.name,
            position: track.position,
            number,
            // Zero is what the catalog stores for "unknown" in older dumps
            length: track
                .length
                .filter(|ms| *ms != 0)
                .map(|ms| ms as f64 / 1000.0),
        }
    }
}
