//! Release details assembly.
//!
//! Builds the nested [`ReleaseDetails`] view of a release in a fixed
//! sequence of lookups: release (with its one-to-one labels), secondary
//! types of its release group, media, then tracks of those media. Each step
//! is a single query, so the cost of a lookup does not depend on how many
//! media or tracks a release has.

use super::models::*;
use super::resolver::{resolve_by_gid, EntityQuery};
use super::schema::ReleaseEntity;
use super::session::CatalogSession;
use anyhow::Result;
use rusqlite::{params, params_from_iter, Row};
use std::collections::HashMap;
use tracing::debug;

/// Loads a release together with every one-to-one association needed for
/// the top level of the details view.
pub struct ReleaseQuery;

impl EntityQuery for ReleaseQuery {
    type Target = ReleaseEntity;
    type Entity = Release;

    fn select_sql(&self) -> &str {
        "SELECT e.id, e.gid, e.name,
                rs.name, rp.name, l.name, s.name, ac.name,
                rg.id, rg.gid, rg.name, rgt.name
         FROM release e
         INNER JOIN artist_credit ac ON ac.id = e.artist_credit
         INNER JOIN release_group rg ON rg.id = e.release_group
         LEFT JOIN release_group_primary_type rgt ON rgt.id = rg.type
         LEFT JOIN release_status rs ON rs.id = e.status
         LEFT JOIN release_packaging rp ON rp.id = e.packaging
         LEFT JOIN language l ON l.id = e.language
         LEFT JOIN script s ON s.id = e.script"
    }

    fn map_row(row: &Row) -> rusqlite::Result<Release> {
        Ok(Release {
            id: row.get(0)?,
            gid: row.get(1)?,
            name: row.get(2)?,
            status: row.get(3)?,
            packaging: row.get(4)?,
            language: row.get(5)?,
            script: row.get(6)?,
            artist_credit: row.get(7)?,
            release_group: ReleaseGroup {
                id: row.get(8)?,
                gid: row.get(9)?,
                name: row.get(10)?,
                primary_type: row.get(11)?,
            },
        })
    }
}

/// Loads only the identifiers of a release.
pub struct PlainReleaseQuery;

impl EntityQuery for PlainReleaseQuery {
    type Target = ReleaseEntity;
    type Entity = PlainRelease;

    fn select_sql(&self) -> &str {
        "SELECT e.id, e.gid FROM release e"
    }

    fn map_row(row: &Row) -> rusqlite::Result<PlainRelease> {
        Ok(PlainRelease {
            id: row.get(0)?,
            gid: row.get(1)?,
        })
    }
}

fn fetch_secondary_types(
    session: &CatalogSession<'_>,
    release_group_id: i64,
) -> Result<Vec<String>> {
    // Inner join: rows whose label can't be resolved are dropped
    let mut stmt = session.prepare(
        "SELECT st.name
         FROM release_group_secondary_type_join j
         INNER JOIN release_group_secondary_type st ON st.id = j.secondary_type
         WHERE j.release_group = ?1
         ORDER BY j.rowid",
    )?;
    let types = stmt
        .query_map(params![release_group_id], |r| r.get(0))?
        .collect::<Result<Vec<String>, _>>()?;
    Ok(types)
}

fn fetch_media(session: &CatalogSession<'_>, release_id: i64) -> Result<Vec<Medium>> {
    let mut stmt = session.prepare(
        "SELECT m.id, m.position, m.name, mf.name
         FROM medium m
         LEFT JOIN medium_format mf ON mf.id = m.format
         WHERE m.release = ?1
         ORDER BY m.position",
    )?;
    let media = stmt
        .query_map(params![release_id], |row| {
            Ok(Medium {
                id: row.get(0)?,
                position: row.get(1)?,
                name: row.get(2)?,
                format: row.get(3)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(media)
}

fn fetch_tracks(session: &CatalogSession<'_>, medium_ids: &[i64]) -> Result<Vec<Track>> {
    let placeholders = (1..=medium_ids.len())
        .map(|i| format!("?{}", i))
        .collect::<Vec<_>>()
        .join(", ");
    let mut stmt = session.prepare(&format!(
        "SELECT t.id, t.gid, t.medium, t.position, t.number, t.name, t.length, ac.name
         FROM track t
         INNER JOIN artist_credit ac ON ac.id = t.artist_credit
         WHERE t.medium IN ({})
         ORDER BY t.position, t.id",
        placeholders
    ))?;
    let tracks = stmt
        .query_map(params_from_iter(medium_ids.iter()), |row| {
            Ok(Track {
                id: row.get(0)?,
                gid: row.get(1)?,
                medium_id: row.get(2)?,
                position: row.get(3)?,
                number: row.get(4)?,
                name: row.get(5)?,
                length: row.get(6)?,
                artist_credit: row.get(7)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(tracks)
}

/// Build the details view of the release identified by `gid`, following a
/// gid redirect if needed.
///
/// Returns `None` when the gid resolves to nothing. Catalog errors are
/// returned as-is; a partially assembled release is never returned.
pub fn assemble_release(
    session: &CatalogSession<'_>,
    gid: &str,
) -> Result<Option<ReleaseDetails>> {
    let release = match resolve_by_gid(session, &ReleaseQuery, gid)? {
        Some(resolution) => resolution.into_inner(),
        None => return Ok(None),
    };

    let secondary_types = fetch_secondary_types(session, release.release_group.id)?;
    let mut details = ReleaseDetails {
        id: release.gid,
        name: release.name,
        release_group: ReleaseGroupDetails {
            id: release.release_group.gid,
            name: release.release_group.name,
            primary_type: release.release_group.primary_type,
            secondary_types,
        },
        status: release.status,
        packaging: release.packaging,
        language: release.language,
        script: release.script,
        mediums: Vec::new(),
    };

    let media = fetch_media(session, release.id)?;
    let mut medium_index_by_id: HashMap<i64, usize> = HashMap::with_capacity(media.len());
    for medium in media {
        medium_index_by_id.insert(medium.id, details.mediums.len());
        details.mediums.push(MediumDetails::from(medium));
    }

    // Tracks only reference their medium, so they can only be placed once
    // every medium of the release is known.
    let mut track_count = 0;
    if !medium_index_by_id.is_empty() {
        let medium_ids: Vec<i64> = medium_index_by_id.keys().copied().collect();
        for track in fetch_tracks(session, &medium_ids)? {
            if let Some(&index) = medium_index_by_id.get(&track.medium_id) {
                details.mediums[index].tracks.push(TrackDetails::from(track));
                track_count += 1;
            }
        }
    }
    debug!(
        "Assembled release {}: {} mediums, {} tracks, {} queries",
        details.id,
        details.mediums.len(),
        track_count,
        session.query_count()
    );

    Ok(Some(details))
}
