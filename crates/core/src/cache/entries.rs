//! Cache entry CRUD operations.
//!
//! Entries are captured response snapshots keyed by request identity and
//! partitioned into named generations. A miss is `None`, never an error.

use super::connection::CacheDb;
use crate::Error;
use serde::{Deserialize, Serialize};
use tokio_rusqlite::params;
use tokio_rusqlite::rusqlite;

/// A captured response snapshot stored in the cache.
///
/// Immutable once written; a put with the same key replaces the prior
/// entry atomically from the caller's perspective.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Request-identity key (see [`super::key::request_key`]).
    pub key: String,
    /// The URL the snapshot was captured from.
    pub url: String,
    /// HTTP status code.
    pub status: u16,
    /// Response headers, in capture order.
    pub headers: Vec<(String, String)>,
    /// Response body bytes.
    pub body: Vec<u8>,
    /// RFC3339 insertion time.
    pub stored_at: String,
}

impl CacheDb {
    /// Insert or replace an entry in the named generation.
    ///
    /// Uses UPSERT semantics: inserts if the (generation, key) pair doesn't
    /// exist, replaces all fields if it does.
    pub async fn put_entry(&self, generation: &str, entry: &CacheEntry) -> Result<(), Error> {
        let generation = generation.to_string();
        let entry = entry.clone();
        let headers_json =
            serde_json::to_string(&entry.headers).map_err(|e| Error::InvalidInput(e.to_string()))?;
        self.conn
            .call(move |conn| -> Result<(), Error> {
                conn.execute(
                    "INSERT INTO entries (generation, key, url, status, headers_json, body, stored_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                     ON CONFLICT(generation, key) DO UPDATE SET
                        url = excluded.url,
                        status = excluded.status,
                        headers_json = excluded.headers_json,
                        body = excluded.body,
                        stored_at = excluded.stored_at",
                    params![
                        &generation,
                        &entry.key,
                        &entry.url,
                        entry.status as i64,
                        &headers_json,
                        &entry.body,
                        &entry.stored_at,
                    ],
                )?;
                Ok(())
            })
            .await
            .map_err(Error::from)
    }

    /// Look up an entry by key in the named generation.
    ///
    /// Returns None if the generation has no entry for the key.
    pub async fn match_entry(&self, generation: &str, key: &str) -> Result<Option<CacheEntry>, Error> {
        let generation = generation.to_string();
        let key = key.to_string();
        self.conn
            .call(move |conn| -> Result<Option<CacheEntry>, Error> {
                let mut stmt = conn.prepare(
                    "SELECT key, url, status, headers_json, body, stored_at
                     FROM entries WHERE generation = ?1 AND key = ?2",
                )?;

                let result = stmt.query_row(params![generation, key], |row| {
                    let headers_json: String = row.get(3)?;
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, i64>(2)?,
                        headers_json,
                        row.get::<_, Vec<u8>>(4)?,
                        row.get::<_, String>(5)?,
                    ))
                });

                match result {
                    Ok((key, url, status, headers_json, body, stored_at)) => {
                        let headers = serde_json::from_str(&headers_json)
                            .map_err(|e| Error::InvalidInput(e.to_string()))?;
                        Ok(Some(CacheEntry {
                            key,
                            url,
                            status: status as u16,
                            headers,
                            body,
                            stored_at,
                        }))
                    }
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(Error::from)
    }

    /// Delete an entry. Returns true if an entry existed.
    pub async fn delete_entry(&self, generation: &str, key: &str) -> Result<bool, Error> {
        let generation = generation.to_string();
        let key = key.to_string();
        self.conn
            .call(move |conn| -> Result<bool, Error> {
                let count = conn.execute(
                    "DELETE FROM entries WHERE generation = ?1 AND key = ?2",
                    params![generation, key],
                )?;
                Ok(count > 0)
            })
            .await
            .map_err(Error::from)
    }

    /// Number of entries in the named generation.
    pub async fn count_entries(&self, generation: &str) -> Result<u64, Error> {
        let generation = generation.to_string();
        self.conn
            .call(move |conn| -> Result<u64, Error> {
                let count: i64 = conn.query_row(
                    "SELECT COUNT(*) FROM entries WHERE generation = ?1",
                    params![generation],
                    |row| row.get(0),
                )?;
                Ok(count as u64)
            })
            .await
            .map_err(Error::from)
    }
}
