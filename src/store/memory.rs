use async_trait::async_trait;
use bson::Document;
use parking_lot::RwLock;

use super::eval::{compare_docs, eval_filter, omit_fields};
use super::filter::{Filter, FindOptions};
use super::{ProfileStore, StoreError};

/// Thread-safe in-process document collection. Documents are kept in
/// insertion order; `id`, `createdAt` and `updatedAt` are assigned on write.
#[derive(Default)]
pub struct MemoryStore {
    docs: RwLock<Vec<Document>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn find(&self, filter: &Filter, opts: &FindOptions) -> Result<Vec<Document>, StoreError> {
        let mut hits: Vec<Document> = {
            let docs = self.docs.read();
            docs.iter().filter(|d| eval_filter(d, filter)).cloned().collect()
        };

        if let Some(sort) = opts.sort.as_ref().filter(|s| !s.is_empty()) {
            hits.sort_by(|a, b| compare_docs(a, b, sort));
        }

        let skip = opts.skip.unwrap_or(0) as usize;
        let limit = opts.limit.map(|l| l as usize).unwrap_or(usize::MAX);
        let mut hits: Vec<Document> = hits.into_iter().skip(skip).take(limit).collect();

        if let Some(fields) = &opts.omit_fields {
            for doc in &mut hits {
                omit_fields(doc, fields);
            }
        }
        Ok(hits)
    }

    async fn count(&self, filter: &Filter) -> Result<u64, StoreError> {
        let docs = self.docs.read();
        Ok(docs.iter().filter(|d| eval_filter(d, filter)).count() as u64)
    }

    async fn find_one(&self, filter: &Filter) -> Result<Option<Document>, StoreError> {
        let docs = self.docs.read();
        Ok(docs.iter().find(|d| eval_filter(d, filter)).cloned())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Document>, StoreError> {
        let docs = self.docs.read();
        Ok(docs.iter().find(|d| has_id(d, id)).cloned())
    }

    async fn insert(&self, mut doc: Document) -> Result<String, StoreError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = chrono::Utc::now().to_rfc3339();
        doc.insert("id", id.clone());
        doc.insert("createdAt", now.clone());
        doc.insert("updatedAt", now);
        self.docs.write().push(doc);
        Ok(id)
    }

    async fn update_by_id(&self, id: &str, set: Document) -> Result<bool, StoreError> {
        let mut docs = self.docs.write();
        match docs.iter_mut().find(|d| has_id(d, id)) {
            Some(doc) => {
                for (key, value) in set {
                    doc.insert(key, value);
                }
                doc.insert("updatedAt", chrono::Utc::now().to_rfc3339());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_by_id(&self, id: &str) -> Result<bool, StoreError> {
        let mut docs = self.docs.write();
        let before = docs.len();
        docs.retain(|d| !has_id(d, id));
        Ok(docs.len() < before)
    }
}

fn has_id(doc: &Document, id: &str) -> bool {
    doc.get_str("id").map(|v| v == id).unwrap_or(false)
}
