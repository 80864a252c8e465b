use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::{bail, Result};
use async_trait::async_trait;
use aws_sdk_s3::primitives::DateTime;

use crate::storage::{DeleteFailure, DeleteOutcome, ObjectRecord, ObjectStore};

pub(crate) fn record(key: &str, secs: i64) -> ObjectRecord {
    ObjectRecord::new(key, DateTime::from_secs(secs), 1024)
}

/// In-memory bucket. Deleting removes keys, so repeated runs see the result
/// of earlier ones.
pub(crate) struct MockStore {
    objects: Mutex<Vec<ObjectRecord>>,
    batches: Mutex<Vec<usize>>,
    failing_keys: HashMap<String, (String, String)>,
    fail_list: bool,
    /// 1-based delete call from which every request fails.
    fail_delete_from: Option<usize>,
}

impl MockStore {
    pub(crate) fn new(objects: Vec<ObjectRecord>) -> Self {
        Self {
            objects: Mutex::new(objects),
            batches: Mutex::new(Vec::new()),
            failing_keys: HashMap::new(),
            fail_list: false,
            fail_delete_from: None,
        }
    }

    pub(crate) fn with_failing_key(mut self, key: &str, code: &str, message: &str) -> Self {
        self.failing_keys
            .insert(key.to_string(), (code.to_string(), message.to_string()));
        self
    }

    pub(crate) fn with_failing_list(mut self) -> Self {
        self.fail_list = true;
        self
    }

    pub(crate) fn with_failing_delete(self) -> Self {
        self.with_failing_delete_from(1)
    }

    pub(crate) fn with_failing_delete_from(mut self, call: usize) -> Self {
        self.fail_delete_from = Some(call);
        self
    }

    pub(crate) fn delete_calls(&self) -> usize {
        self.batches.lock().unwrap().len()
    }

    pub(crate) fn batch_sizes(&self) -> Vec<usize> {
        self.batches.lock().unwrap().clone()
    }

    pub(crate) fn remaining_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .objects
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.key.clone())
            .collect();
        keys.sort();
        keys
    }
}

#[async_trait]
impl ObjectStore for MockStore {
    fn bucket(&self) -> &str {
        "test-bucket"
    }

    async fn list_objects(&self) -> Result<Vec<ObjectRecord>> {
        if self.fail_list {
            bail!("ListObjectsV2 failed: NoSuchBucket");
        }
        Ok(self.objects.lock().unwrap().clone())
    }

    async fn delete_objects(&self, keys: &[String]) -> Result<DeleteOutcome> {
        let call = {
            let mut batches = self.batches.lock().unwrap();
            batches.push(keys.len());
            batches.len()
        };
        if self.fail_delete_from.is_some_and(|from| call >= from) {
            bail!("DeleteObjects request failed: connection reset");
        }

        let mut outcome = DeleteOutcome::default();
        let mut objects = self.objects.lock().unwrap();
        for key in keys {
            if let Some((code, message)) = self.failing_keys.get(key) {
                outcome.errors.push(DeleteFailure {
                    key: key.clone(),
                    code: code.clone(),
                    message: message.clone(),
                });
                continue;
            }
            objects.retain(|r| &r.key != key);
            outcome.deleted.push(key.clone());
        }
        Ok(outcome)
    }
}
