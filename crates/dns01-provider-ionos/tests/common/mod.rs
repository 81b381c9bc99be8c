//! Test doubles and common utilities for solver contract tests
//!
//! [`FakeIonos`] keeps zones, records and zone files in memory and counts
//! every call, so tests can assert exactly which provider requests a
//! reconciliation made.

#![allow(dead_code)]

use async_trait::async_trait;
use dns01_core::{Error, Result};
use dns01_provider_ionos::{ApiConnector, IonosApi, Record, RecordFilter, Zone, ZoneState};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const ZONE_ID: &str = "zone-1";
pub const DOMAIN: &str = "example.com";
pub const SUBDOMAIN: &str = "_acme-challenge";

/// Owned copy of a [`RecordFilter`], as received by the fake
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeenFilter {
    pub zone_id: String,
    pub name: Option<String>,
    pub record_type: Option<String>,
}

#[derive(Default)]
struct FakeState {
    zones: Vec<Zone>,
    /// (zone id, record)
    records: Vec<(String, Record)>,
    zone_files: HashMap<String, String>,
    uploads: Vec<String>,
    deleted: Vec<String>,
    filters: Vec<SeenFilter>,
    next_id: usize,
    /// Whether uploaded TXT lines show up in the structured listing
    index_uploads: bool,
    fail_uploads: bool,
    fail_listing_after_upload: bool,
}

#[derive(Default)]
struct Counters {
    list_zones: AtomicUsize,
    list_records: AtomicUsize,
    delete_record: AtomicUsize,
    get_zone_file: AtomicUsize,
    put_zone_file: AtomicUsize,
}

/// In-memory IONOS provider
#[derive(Clone, Default)]
pub struct FakeIonos {
    state: Arc<Mutex<FakeState>>,
    counters: Arc<Counters>,
}

impl FakeIonos {
    /// Empty provider without zones
    pub fn new() -> Self {
        let fake = Self::default();
        fake.state.lock().unwrap().index_uploads = true;
        fake
    }

    /// Provider hosting `example.com` (AVAILABLE) with an empty zone file
    pub fn with_example_zone() -> Self {
        let fake = Self::new();
        fake.add_zone(ZONE_ID, DOMAIN, ZoneState::Available);
        fake.set_zone_file(ZONE_ID, ";Zone: example.com\n");
        fake
    }

    pub fn add_zone(&self, id: &str, name: &str, state: ZoneState) {
        self.state.lock().unwrap().zones.push(Zone {
            id: id.to_string(),
            name: name.to_string(),
            state,
        });
    }

    pub fn add_record(&self, zone_id: &str, id: &str, record_type: &str, name: &str, content: &str) {
        self.state.lock().unwrap().records.push((
            zone_id.to_string(),
            Record {
                id: id.to_string(),
                record_type: record_type.to_string(),
                name: name.to_string(),
                content: content.to_string(),
            },
        ));
    }

    pub fn set_zone_file(&self, zone_id: &str, text: &str) {
        self.state
            .lock()
            .unwrap()
            .zone_files
            .insert(zone_id.to_string(), text.to_string());
    }

    /// Stop mirroring uploaded TXT lines into the structured listing
    pub fn without_indexing(self) -> Self {
        self.state.lock().unwrap().index_uploads = false;
        self
    }

    /// Make every zone file upload fail with HTTP 500
    pub fn failing_uploads(self) -> Self {
        self.state.lock().unwrap().fail_uploads = true;
        self
    }

    /// Make record listings fail once a zone file was uploaded
    pub fn failing_listing_after_upload(self) -> Self {
        self.state.lock().unwrap().fail_listing_after_upload = true;
        self
    }

    pub fn zone_file(&self, zone_id: &str) -> Option<String> {
        self.state.lock().unwrap().zone_files.get(zone_id).cloned()
    }

    pub fn uploads(&self) -> Vec<String> {
        self.state.lock().unwrap().uploads.clone()
    }

    pub fn deleted(&self) -> Vec<String> {
        self.state.lock().unwrap().deleted.clone()
    }

    pub fn filters(&self) -> Vec<SeenFilter> {
        self.state.lock().unwrap().filters.clone()
    }

    /// Records currently listed in a zone
    pub fn records(&self, zone_id: &str) -> Vec<Record> {
        self.state
            .lock()
            .unwrap()
            .records
            .iter()
            .filter(|(z, _)| z == zone_id)
            .map(|(_, r)| r.clone())
            .collect()
    }

    pub fn list_zones_calls(&self) -> usize {
        self.counters.list_zones.load(Ordering::SeqCst)
    }

    pub fn list_records_calls(&self) -> usize {
        self.counters.list_records.load(Ordering::SeqCst)
    }

    pub fn delete_calls(&self) -> usize {
        self.counters.delete_record.load(Ordering::SeqCst)
    }

    pub fn get_zone_file_calls(&self) -> usize {
        self.counters.get_zone_file.load(Ordering::SeqCst)
    }

    pub fn put_zone_file_calls(&self) -> usize {
        self.counters.put_zone_file.load(Ordering::SeqCst)
    }
}

/// Parse a `<name>\t<ttl>\tIN\tTXT\t"<content>"` line
fn parse_txt_line(line: &str) -> Option<(String, String)> {
    let fields: Vec<&str> = line.split('\t').collect();
    match fields.as_slice() {
        [name, _ttl, "IN", "TXT", content] => Some((
            name.to_string(),
            content.trim_matches('"').to_string(),
        )),
        _ => None,
    }
}

#[async_trait]
impl IonosApi for FakeIonos {
    async fn list_zones(&self, _name: &str) -> Result<Vec<Zone>> {
        self.counters.list_zones.fetch_add(1, Ordering::SeqCst);
        // Like the real filter, this is not an exact match: every zone is returned
        Ok(self.state.lock().unwrap().zones.clone())
    }

    async fn list_records(&self, filter: &RecordFilter<'_>) -> Result<Vec<Record>> {
        self.counters.list_records.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.lock().unwrap();

        if state.fail_listing_after_upload && !state.uploads.is_empty() {
            return Err(Error::http(
                "503 Service Unavailable",
                "https://dns.example/records",
                "GET",
            ));
        }

        state.filters.push(SeenFilter {
            zone_id: filter.zone_id.to_string(),
            name: filter.name.map(str::to_string),
            record_type: filter.record_type.map(str::to_string),
        });

        Ok(state
            .records
            .iter()
            .filter(|(zone_id, _)| zone_id == filter.zone_id)
            .filter(|(_, r)| filter.name.is_none_or(|n| r.name == n))
            .filter(|(_, r)| filter.record_type.is_none_or(|t| r.record_type == t))
            .map(|(_, r)| r.clone())
            .collect())
    }

    async fn delete_record(&self, zone_id: &str, record_id: &str) -> Result<()> {
        self.counters.delete_record.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.lock().unwrap();
        state
            .records
            .retain(|(z, r)| !(z == zone_id && r.id == record_id));
        state.deleted.push(record_id.to_string());
        Ok(())
    }

    async fn get_zone_file(&self, zone_id: &str) -> Result<String> {
        self.counters.get_zone_file.fetch_add(1, Ordering::SeqCst);
        self.state
            .lock()
            .unwrap()
            .zone_files
            .get(zone_id)
            .cloned()
            .ok_or_else(|| {
                Error::http(
                    "404 Not Found",
                    format!("https://dns.example/zones/{}/zonefile", zone_id),
                    "GET",
                )
            })
    }

    async fn put_zone_file(&self, zone_id: &str, zone_file: &str) -> Result<()> {
        self.counters.put_zone_file.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.lock().unwrap();

        if state.fail_uploads {
            return Err(Error::http(
                "500 Internal Server Error",
                format!("https://dns.example/zones/{}/zonefile", zone_id),
                "PUT",
            ));
        }

        state.uploads.push(zone_file.to_string());
        state
            .zone_files
            .insert(zone_id.to_string(), zone_file.to_string());

        if state.index_uploads {
            for (name, content) in zone_file.lines().filter_map(parse_txt_line) {
                let exists = state.records.iter().any(|(z, r)| {
                    z == zone_id && r.record_type == "TXT" && r.name == name && r.content == content
                });
                if !exists {
                    state.next_id += 1;
                    let record = Record {
                        id: format!("rec-{}", state.next_id),
                        record_type: "TXT".to_string(),
                        name,
                        content,
                    };
                    state.records.push((zone_id.to_string(), record));
                }
            }
        }
        Ok(())
    }
}

/// Connector handing out a shared [`FakeIonos`] and remembering credentials
#[derive(Clone, Default)]
pub struct FakeConnector {
    pub fake: FakeIonos,
    connections: Arc<Mutex<Vec<(String, String)>>>,
}

impl FakeConnector {
    pub fn new(fake: FakeIonos) -> Self {
        Self {
            fake,
            connections: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// (endpoint, token) of every connection made
    pub fn connections(&self) -> Vec<(String, String)> {
        self.connections.lock().unwrap().clone()
    }
}

impl ApiConnector for FakeConnector {
    fn connect(&self, endpoint: &str, token: &str) -> Result<Arc<dyn IonosApi>> {
        self.connections
            .lock()
            .unwrap()
            .push((endpoint.to_string(), token.to_string()));
        Ok(Arc::new(self.fake.clone()))
    }
}
