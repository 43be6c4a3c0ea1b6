//! Test fixture creation for the catalog
//!
//! The catalog is read-only through the API, so fixtures are written with
//! direct SQL inserts on a freshly created schema.

use super::constants::*;
use anyhow::Result;
use mbdata_api::catalog_store::CATALOG_VERSIONED_SCHEMAS;
use rusqlite::{params, Connection};
use std::path::PathBuf;
use tempfile::TempDir;

/// Creates a temporary test catalog with 2 releases, 3 media, 7 tracks
/// Returns (temp_dir, catalog_db_path)
pub fn create_test_catalog() -> Result<(TempDir, PathBuf)> {
    let dir = TempDir::new()?;
    let catalog_db_path = dir.path().join("catalog.db");

    let conn = Connection::open(&catalog_db_path)?;
    CATALOG_VERSIONED_SCHEMAS[0].create(&conn)?;

    // Labels
    conn.execute_batch(
        "INSERT INTO artist_credit (id, name) VALUES (1, 'The Test Band'), (2, 'Guest Singer');
         INSERT INTO release_group_primary_type (id, name) VALUES (1, 'Album');
         INSERT INTO release_group_secondary_type (id, name)
             VALUES (1, 'Compilation'), (6, 'Live');
         INSERT INTO release_status (id, name) VALUES (1, 'Official');
         INSERT INTO release_packaging (id, name) VALUES (1, 'Jewel Case');
         INSERT INTO language (id, name) VALUES (120, 'English');
         INSERT INTO script (id, name) VALUES (28, 'Latin');
         INSERT INTO medium_format (id, name) VALUES (1, 'CD'), (31, '12\" Vinyl');",
    )?;

    // Release groups
    conn.execute(
        "INSERT INTO release_group (id, gid, name, artist_credit, type) VALUES (1, ?1, ?2, 1, 1)",
        params![RELEASE_GROUP_1_GID, RELEASE_GROUP_1_NAME],
    )?;
    conn.execute(
        "INSERT INTO release_group (id, gid, name, artist_credit, type) VALUES (2, ?1, ?2, 1, NULL)",
        params![RELEASE_GROUP_2_GID, RELEASE_GROUP_2_NAME],
    )?;
    // Listing order is storage order: Live before Compilation
    conn.execute_batch(
        "INSERT INTO release_group_secondary_type_join (release_group, secondary_type) VALUES (1, 6);
         INSERT INTO release_group_secondary_type_join (release_group, secondary_type) VALUES (1, 1);",
    )?;

    // Releases
    conn.execute(
        "INSERT INTO release (id, gid, name, artist_credit, release_group, status, packaging, language, script)
         VALUES (1, ?1, ?2, 1, 1, 1, 1, 120, 28)",
        params![RELEASE_1_GID, RELEASE_1_NAME],
    )?;
    conn.execute(
        "INSERT INTO release (id, gid, name, artist_credit, release_group) VALUES (2, ?1, ?2, 1, 2)",
        params![RELEASE_2_GID, RELEASE_2_NAME],
    )?;
    conn.execute(
        "INSERT INTO release_gid_redirect (gid, new_id) VALUES (?1, 1)",
        params![RELEASE_1_OLD_GID],
    )?;
    conn.execute("PRAGMA foreign_keys = OFF", [])?;
    conn.execute(
        "INSERT INTO release_gid_redirect (gid, new_id) VALUES (?1, 999)",
        params![DANGLING_REDIRECT_GID],
    )?;

    // Media, inserted out of order on purpose
    conn.execute_batch(
        "INSERT INTO medium (id, release, position, format, name) VALUES (2, 1, 2, 1, 'Bonus Disc');
         INSERT INTO medium (id, release, position, format, name) VALUES (1, 1, 1, 1, '');
         INSERT INTO medium (id, release, position, format, name) VALUES (3, 2, 1, 31, NULL);",
    )?;

    // Tracks: (gid, medium, position, number, name, artist_credit, length ms)
    let tracks: [(&str, i64, i32, &str, &str, i64, Option<i64>); 7] = [
        ("22222222-2222-4222-8222-222222222222", 1, 2, "2", "Second Song", 1, Some(241_500)),
        (TRACK_1_GID, 1, 1, "1", TRACK_1_NAME, 1, Some(125_000)),
        ("33333333-3333-4333-8333-333333333333", 1, 3, "3", "Duet", 2, Some(0)),
        ("44444444-4444-4444-8444-444444444444", 2, 1, "1", "Rehearsal", 1, None),
        ("55555555-5555-4555-8555-555555555555", 3, 1, "A1", "Side A Opener", 1, Some(180_000)),
        ("66666666-6666-4666-8666-666666666666", 3, 2, "A2", "Side A Closer", 1, Some(200_000)),
        ("77777777-7777-4777-8777-777777777777", 3, 3, "B1", "Side B Opener", 1, Some(210_000)),
    ];
    for (gid, medium, position, number, name, artist_credit, length) in tracks {
        conn.execute(
            "INSERT INTO track (gid, medium, position, number, name, artist_credit, length)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![gid, medium, position, number, name, artist_credit, length],
        )?;
    }

    Ok((dir, catalog_db_path))
}
