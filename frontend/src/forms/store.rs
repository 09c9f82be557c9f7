use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use chrono::{DateTime, Utc};
use log::warn;
use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;
use web_sys::{window, Storage};

use super::error::FormError;

/// One completed form entry, stored as a flat JSON object:
/// the field values side by side with `submittedAt` and, for event
/// registrations, `eventTitle`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    #[serde(flatten)]
    pub values: BTreeMap<String, String>,
    #[serde(rename = "submittedAt", with = "iso_millis")]
    pub submitted_at: DateTime<Utc>,
    #[serde(
        rename = "eventTitle",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub event_title: Option<String>,
}

mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&at.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|at| at.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

/// Append-only collection of submissions, one ordered list per bucket.
#[cfg_attr(test, mockall::automock)]
pub trait SubmissionStore {
    fn append(&self, bucket: &str, record: &SubmissionRecord) -> Result<(), FormError>;

    /// Never fails; a bucket nobody wrote to is empty.
    fn read_all(&self, bucket: &str) -> Vec<SubmissionRecord>;
}

pub fn encode_bucket(records: &[SubmissionRecord]) -> Result<String, FormError> {
    Ok(serde_json::to_string(records)?)
}

pub fn decode_bucket(raw: &str) -> Result<Vec<SubmissionRecord>, FormError> {
    Ok(serde_json::from_str(raw)?)
}

/// In-process store. Used in tests and when the browser refuses storage.
#[derive(Default)]
pub struct MemoryStore {
    buckets: RefCell<HashMap<String, Vec<SubmissionRecord>>>,
}

impl SubmissionStore for MemoryStore {
    fn append(&self, bucket: &str, record: &SubmissionRecord) -> Result<(), FormError> {
        self.buckets
            .borrow_mut()
            .entry(bucket.to_string())
            .or_default()
            .push(record.clone());
        Ok(())
    }

    fn read_all(&self, bucket: &str) -> Vec<SubmissionRecord> {
        self.buckets.borrow().get(bucket).cloned().unwrap_or_default()
    }
}

/// Raw string access to a key-value backend such as `window.localStorage`.
pub trait RawStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, FormError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), FormError>;
}

fn js_error(err: JsValue) -> FormError {
    FormError::StorageUnavailable(
        err.as_string()
            .unwrap_or_else(|| format!("{:?}", err)),
    )
}

impl RawStorage for Storage {
    fn get_item(&self, key: &str) -> Result<Option<String>, FormError> {
        Storage::get_item(self, key).map_err(js_error)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), FormError> {
        Storage::set_item(self, key, value).map_err(js_error)
    }
}

/// One JSON array per bucket key on top of a [`RawStorage`].
///
/// An append only ever rewrites a bucket it could fully decode, so text
/// it cannot read is left in place.
pub struct LocalStorageStore<S: RawStorage = Storage> {
    storage: S,
}

impl LocalStorageStore {
    pub fn open() -> Result<Self, FormError> {
        let storage = window()
            .ok_or_else(|| FormError::StorageUnavailable("no window".to_string()))?
            .local_storage()
            .map_err(js_error)?
            .ok_or_else(|| FormError::StorageUnavailable("local storage is disabled".to_string()))?;
        Ok(Self::with_storage(storage))
    }
}

impl<S: RawStorage> LocalStorageStore<S> {
    pub fn with_storage(storage: S) -> Self {
        Self { storage }
    }

    fn load(&self, bucket: &str) -> Result<Vec<SubmissionRecord>, FormError> {
        match self.storage.get_item(bucket)? {
            Some(raw) => decode_bucket(&raw),
            None => Ok(Vec::new()),
        }
    }
}

impl<S: RawStorage> SubmissionStore for LocalStorageStore<S> {
    fn append(&self, bucket: &str, record: &SubmissionRecord) -> Result<(), FormError> {
        let mut records = self.load(bucket)?;
        records.push(record.clone());
        let raw = encode_bucket(&records)?;
        self.storage.set_item(bucket, &raw)
    }

    fn read_all(&self, bucket: &str) -> Vec<SubmissionRecord> {
        match self.load(bucket) {
            Ok(records) => records,
            Err(e) => {
                warn!("Ignoring unreadable bucket {}: {}", bucket, e);
                Vec::new()
            }
        }
    }
}

/// Browser storage when available, otherwise an in-memory fallback.
pub fn open_default_store() -> Rc<dyn SubmissionStore> {
    match LocalStorageStore::open() {
        Ok(store) => Rc::new(store),
        Err(e) => {
            warn!("Falling back to in-memory submissions: {}", e);
            Rc::new(MemoryStore::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(name: &str, event_title: Option<&str>) -> SubmissionRecord {
        SubmissionRecord {
            values: BTreeMap::from([
                ("name".to_string(), name.to_string()),
                ("email".to_string(), "ada@example.com".to_string()),
            ]),
            submitted_at: Utc.with_ymd_and_hms(2026, 10, 18, 9, 30, 0).unwrap(),
            event_title: event_title.map(str::to_string),
        }
    }

    #[test]
    fn unwritten_bucket_reads_empty() {
        let store = MemoryStore::default();
        assert!(store.read_all("member_applications").is_empty());
    }

    #[test]
    fn appends_keep_submission_order() {
        let store = MemoryStore::default();
        store.append("team_applications", &record("first", None)).unwrap();
        store.append("team_applications", &record("second", None)).unwrap();
        store.append("member_applications", &record("elsewhere", None)).unwrap();

        let team = store.read_all("team_applications");
        assert_eq!(team.len(), 2);
        assert_eq!(team[0].values["name"], "first");
        assert_eq!(team[1].values["name"], "second");
        assert_eq!(store.read_all("member_applications").len(), 1);
    }

    #[test]
    fn records_serialize_flat() {
        let raw = encode_bucket(&[record("Ada", None)]).unwrap();
        assert_eq!(
            raw,
            r#"[{"email":"ada@example.com","name":"Ada","submittedAt":"2026-10-18T09:30:00.000Z"}]"#
        );

        let raw = encode_bucket(&[record("Ada", Some("Hack Night"))]).unwrap();
        assert!(raw.contains(r#""eventTitle":"Hack Night""#));
    }

    #[test]
    fn decodes_what_it_encodes() {
        let records = vec![record("Ada", Some("Hack Night")), record("Grace", None)];
        let raw = encode_bucket(&records).unwrap();
        assert_eq!(decode_bucket(&raw).unwrap(), records);
    }

    #[test]
    fn decodes_entries_written_by_the_browser() {
        let raw = r#"[{"name":"Ada","email":"ada@example.com","submittedAt":"2026-01-02T03:04:05.678Z","eventTitle":null}]"#;
        let records = decode_bucket(raw).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].values.len(), 2);
        assert_eq!(records[0].event_title, None);
        assert_eq!(records[0].submitted_at.timestamp_subsec_millis(), 678);
    }

    #[test]
    fn malformed_bucket_is_an_error() {
        assert!(matches!(decode_bucket("not json"), Err(FormError::Serialization(_))));
    }

    #[derive(Default)]
    struct FakeStorage {
        items: RefCell<HashMap<String, String>>,
        read_only: bool,
    }

    impl FakeStorage {
        fn holding(key: &str, raw: &str) -> Self {
            let storage = Self::default();
            storage.items.borrow_mut().insert(key.to_string(), raw.to_string());
            storage
        }

        fn raw(&self, key: &str) -> Option<String> {
            self.items.borrow().get(key).cloned()
        }
    }

    impl RawStorage for FakeStorage {
        fn get_item(&self, key: &str) -> Result<Option<String>, FormError> {
            Ok(self.raw(key))
        }

        fn set_item(&self, key: &str, value: &str) -> Result<(), FormError> {
            if self.read_only {
                return Err(FormError::StorageUnavailable("QuotaExceededError".to_string()));
            }
            self.items.borrow_mut().insert(key.to_string(), value.to_string());
            Ok(())
        }
    }

    #[test]
    fn local_append_creates_missing_bucket() {
        let store = LocalStorageStore::with_storage(FakeStorage::default());
        store.append("member_applications", &record("Ada", None)).unwrap();

        assert_eq!(
            store.storage.raw("member_applications").as_deref(),
            Some(r#"[{"email":"ada@example.com","name":"Ada","submittedAt":"2026-10-18T09:30:00.000Z"}]"#)
        );
        assert!(store.storage.raw("team_applications").is_none());
    }

    #[test]
    fn local_appends_keep_submission_order() {
        let store = LocalStorageStore::with_storage(FakeStorage::default());
        store.append("event_registrations", &record("first", Some("Hack Night"))).unwrap();
        store.append("event_registrations", &record("second", Some("Hack Night"))).unwrap();

        let stored = store.read_all("event_registrations");
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].values["name"], "first");
        assert_eq!(stored[1].values["name"], "second");
    }

    #[test]
    fn local_append_leaves_unreadable_bucket_alone() {
        let existing = r#"[{"name":"Ada","submittedAt":"2026-01-02T03:04:05.678Z"},{"name":"Grace","year":2,"submittedAt":"2026-01-03T03:04:05.678Z"}]"#;
        let store = LocalStorageStore::with_storage(FakeStorage::holding("member_applications", existing));

        assert!(store.read_all("member_applications").is_empty());
        let result = store.append("member_applications", &record("New", None));
        assert!(matches!(result, Err(FormError::Serialization(_))));
        assert_eq!(store.storage.raw("member_applications").as_deref(), Some(existing));
    }

    #[test]
    fn local_write_failure_is_reported() {
        let store = LocalStorageStore::with_storage(FakeStorage {
            read_only: true,
            ..FakeStorage::default()
        });
        match store.append("team_applications", &record("Ada", None)) {
            Err(FormError::StorageUnavailable(reason)) => assert_eq!(reason, "QuotaExceededError"),
            other => panic!("expected StorageUnavailable, got {other:?}"),
        }
        assert!(store.read_all("team_applications").is_empty());
    }
}
