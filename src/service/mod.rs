mod query;

pub use query::{build_list_query, ListAstrologersQuery, DEFAULT_PAGE_SIZE};

use std::sync::Arc;

use bson::{doc, Bson, Document};
use thiserror::Error;

use crate::media::{MediaError, MediaHost, UploadOptions, UploadSource};
use crate::models::{Astrologer, AstrologerRequest};
use crate::store::{Filter, FindOptions, ProfileStore, StoreError};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(&'static str),
    #[error("astrologer already exists")]
    Conflict,
    #[error("astrologer not found")]
    NotFound,
    #[error("image upload failed: {0}")]
    Upload(#[from] MediaError),
    #[error("store failure: {0}")]
    Store(#[from] StoreError),
}

/// Orchestrates validation, duplicate checking, media upload and store calls
/// for every astrologer operation. Store and media host are injected.
pub struct AstrologerService {
    store: Arc<dyn ProfileStore>,
    media: Arc<dyn MediaHost>,
}

impl AstrologerService {
    pub fn new(store: Arc<dyn ProfileStore>, media: Arc<dyn MediaHost>) -> Self {
        Self { store, media }
    }

    /// Registers a new profile. An image file, when supplied, is uploaded
    /// before anything is written and its URL replaces `profilePic`.
    pub async fn create(
        &self,
        req: AstrologerRequest,
        image: Option<UploadSource>,
    ) -> Result<(), ServiceError> {
        let username = filled(req.username);
        let language = filled_list(req.language);
        let expertise = filled_list(req.expertise);
        let experience = req.experience.filter(|v| *v > 0);
        let price = req.price.filter(|v| *v > 0.0);
        let profile_pic = filled(req.profile_pic);
        let description = filled(req.description);

        let (username, language, expertise, experience, price, description) =
            match (username, language, expertise, experience, price, description) {
                (Some(u), Some(l), Some(x), Some(e), Some(p), Some(d)) => (u, l, x, e, p, d),
                _ => return Err(ServiceError::Validation("All fields are required")),
            };
        if profile_pic.is_none() && image.is_none() {
            return Err(ServiceError::Validation("All fields are required"));
        }

        // Check-then-insert is not atomic: concurrent creates with the same
        // username can both pass this check.
        let exists = self
            .store
            .find_one(&Filter::Eq {
                path: "username".into(),
                value: Bson::String(username.clone()),
            })
            .await?;
        if exists.is_some() {
            return Err(ServiceError::Conflict);
        }

        let profile_pic = match (image, profile_pic) {
            (Some(file), _) => self.upload_image(file).await?,
            (None, Some(url)) => url,
            (None, None) => return Err(ServiceError::Validation("All fields are required")),
        };

        self.store
            .insert(doc! {
                "username": username,
                "language": language,
                "expertise": expertise,
                "experience": experience as i64,
                "price": price,
                "profilePic": profile_pic,
                "description": description,
            })
            .await?;
        Ok(())
    }

    /// Returns the page selected by `params` plus the total count over the
    /// same filter. Descriptions are excluded from the page.
    pub async fn list(
        &self,
        params: &ListAstrologersQuery,
    ) -> Result<(Vec<Astrologer>, u64), ServiceError> {
        let (filter, sort, skip, limit) = build_list_query(params);
        let opts = FindOptions {
            omit_fields: Some(vec!["description".into()]),
            sort: if sort.is_empty() { None } else { Some(sort) },
            limit: Some(limit),
            skip: Some(skip),
        };
        let docs = self.store.find(&filter, &opts).await?;
        let count = self.store.count(&filter).await?;
        let astrologers = docs
            .into_iter()
            .map(Astrologer::from_doc)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((astrologers, count))
    }

    pub async fn details(&self, id: &str) -> Result<Astrologer, ServiceError> {
        let doc = self.store.find_by_id(id).await?.ok_or(ServiceError::NotFound)?;
        Ok(Astrologer::from_doc(doc)?)
    }

    /// Case-insensitive substring match on usernames.
    pub async fn search(&self, text: &str) -> Result<Vec<Astrologer>, ServiceError> {
        let filter = Filter::Contains { path: "username".into(), pattern: text.to_string() };
        let docs = self.store.find(&filter, &FindOptions::default()).await?;
        let astrologers = docs
            .into_iter()
            .map(Astrologer::from_doc)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(astrologers)
    }

    /// Merges every truthy field of the patch onto the stored record. Absent
    /// and falsy fields are left untouched.
    pub async fn update(
        &self,
        id: &str,
        req: AstrologerRequest,
        image: Option<UploadSource>,
    ) -> Result<(), ServiceError> {
        let username = filled(req.username);
        let language = filled_list(req.language);
        let expertise = filled_list(req.expertise);
        let experience = req.experience.filter(|v| *v > 0);
        let price = req.price.filter(|v| *v > 0.0);
        let profile_pic = filled(req.profile_pic);
        let description = filled(req.description);

        let no_fields = username.is_none()
            && language.is_none()
            && expertise.is_none()
            && experience.is_none()
            && price.is_none()
            && profile_pic.is_none()
            && description.is_none();
        if no_fields && image.is_none() {
            return Err(ServiceError::Validation("No update fields were provided"));
        }

        if self.store.find_by_id(id).await?.is_none() {
            return Err(ServiceError::NotFound);
        }

        let mut set = Document::new();
        if let Some(v) = username {
            set.insert("username", v);
        }
        if let Some(v) = language {
            set.insert("language", v);
        }
        if let Some(v) = expertise {
            set.insert("expertise", v);
        }
        if let Some(v) = experience {
            set.insert("experience", v as i64);
        }
        if let Some(v) = price {
            set.insert("price", v);
        }
        if let Some(v) = description {
            set.insert("description", v);
        }
        match image {
            Some(file) => {
                let url = self.upload_image(file).await?;
                set.insert("profilePic", url);
            }
            None => {
                if let Some(v) = profile_pic {
                    set.insert("profilePic", v);
                }
            }
        }

        if !self.store.update_by_id(id, set).await? {
            return Err(ServiceError::NotFound);
        }
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        if !self.store.delete_by_id(id).await? {
            return Err(ServiceError::NotFound);
        }
        Ok(())
    }

    /// Uploads an image to the astrologers folder and returns its URL.
    pub async fn upload_image(&self, file: UploadSource) -> Result<String, ServiceError> {
        let opts = UploadOptions {
            folder: "astrologers".into(),
            height: Some(400),
            quality: Some(70),
        };
        let media = self.media.upload(&file, &opts).await?;
        Ok(media.secure_url)
    }
}

fn filled(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn filled_list(value: Option<Vec<String>>) -> Option<Vec<String>> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::UploadedMedia;
    use crate::store::MemoryStore;
    use async_trait::async_trait;

    struct StubMediaHost {
        url: Option<&'static str>,
    }

    #[async_trait]
    impl MediaHost for StubMediaHost {
        async fn upload(
            &self,
            _file: &UploadSource,
            opts: &UploadOptions,
        ) -> Result<UploadedMedia, MediaError> {
            assert_eq!(opts.folder, "astrologers");
            assert_eq!(opts.height, Some(400));
            assert_eq!(opts.quality, Some(70));
            match self.url {
                Some(url) => Ok(UploadedMedia { secure_url: url.to_string() }),
                None => Err(MediaError::MissingUrl),
            }
        }
    }

    fn service(url: Option<&'static str>) -> (AstrologerService, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let media = Arc::new(StubMediaHost { url });
        (AstrologerService::new(store.clone(), media), store)
    }

    fn request(username: &str, price: f64) -> AstrologerRequest {
        AstrologerRequest {
            username: Some(username.to_string()),
            language: Some(vec!["Hindi".into(), "English".into()]),
            expertise: Some(vec!["Tarot".into()]),
            experience: Some(4),
            price: Some(price),
            profile_pic: Some("https://media.test/pic.png".into()),
            description: Some("Reads birth charts.".into()),
        }
    }

    fn list_params(pairs: &[(&str, &str)]) -> ListAstrologersQuery {
        let mut p = ListAstrologersQuery::default();
        for (key, value) in pairs {
            let value = Some(value.to_string());
            match *key {
                "limit" => p.limit = value,
                "page" => p.page = value,
                "priceSort" => p.price_sort = value,
                "experienceSort" => p.experience_sort = value,
                "language" => p.language = value,
                "expertise" => p.expertise = value,
                other => panic!("unknown param {}", other),
            }
        }
        p
    }

    #[tokio::test]
    async fn create_then_details_round_trips() {
        let (service, _) = service(Some("https://media.test/u.png"));
        service.create(request("Ramesh", 150.0), None).await.unwrap();

        let found = service.search("Ramesh").await.unwrap();
        assert_eq!(found.len(), 1);
        let details = service.details(&found[0].id).await.unwrap();
        assert_eq!(details.username, "Ramesh");
        assert_eq!(details.language, vec!["Hindi", "English"]);
        assert_eq!(details.experience, 4);
        assert_eq!(details.description.as_deref(), Some("Reads birth charts."));
        assert!(!details.created_at.is_empty());
    }

    #[tokio::test]
    async fn create_rejects_any_missing_required_field() {
        let (service, store) = service(None);

        let blank: Vec<fn(&mut AstrologerRequest)> = vec![
            |r| r.username = None,
            |r| r.username = Some("  ".into()),
            |r| r.language = None,
            |r| r.language = Some(vec![]),
            |r| r.expertise = None,
            |r| r.experience = None,
            |r| r.experience = Some(0),
            |r| r.price = None,
            |r| r.price = Some(0.0),
            |r| r.profile_pic = None,
            |r| r.description = None,
            |r| r.description = Some("".into()),
        ];
        for clear in blank {
            let mut req = request("Ramesh", 100.0);
            clear(&mut req);
            let err = service.create(req, None).await.unwrap_err();
            assert!(matches!(err, ServiceError::Validation(_)), "got {:?}", err);
        }
        assert_eq!(store.count(&Filter::True).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn create_rejects_duplicate_username() {
        let (service, store) = service(None);
        service.create(request("Ramesh", 100.0), None).await.unwrap();

        let err = service.create(request("Ramesh", 300.0), None).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict));
        assert_eq!(store.count(&Filter::True).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn create_uploads_supplied_image_and_stores_its_url() {
        let (service, _) = service(Some("https://media.test/hosted.png"));
        let mut req = request("Ramesh", 100.0);
        req.profile_pic = None;
        let image = UploadSource { file_name: "me.png".into(), bytes: vec![1, 2, 3] };
        service.create(req, Some(image)).await.unwrap();

        let found = service.search("Ramesh").await.unwrap();
        assert_eq!(found[0].profile_pic.as_deref(), Some("https://media.test/hosted.png"));
    }

    #[tokio::test]
    async fn create_aborts_before_any_write_when_upload_fails() {
        let (service, store) = service(None);
        let image = UploadSource { file_name: "me.png".into(), bytes: vec![1] };
        let err = service.create(request("Ramesh", 100.0), Some(image)).await.unwrap_err();
        assert!(matches!(err, ServiceError::Upload(_)));
        assert_eq!(store.count(&Filter::True).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn update_requires_at_least_one_field() {
        let (service, _) = service(None);
        service.create(request("Ramesh", 100.0), None).await.unwrap();
        let id = service.search("Ramesh").await.unwrap()[0].id.clone();

        let empty = AstrologerRequest {
            price: Some(0.0),
            description: Some("   ".into()),
            ..Default::default()
        };
        let err = service.update(&id, empty, None).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found() {
        let (service, _) = service(None);
        let patch = AstrologerRequest { price: Some(10.0), ..Default::default() };
        let err = service.update("missing", patch, None).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound));
    }

    #[tokio::test]
    async fn update_merges_only_truthy_fields() {
        let (service, _) = service(None);
        service.create(request("Ramesh", 100.0), None).await.unwrap();
        let id = service.search("Ramesh").await.unwrap()[0].id.clone();

        let patch = AstrologerRequest {
            price: Some(999.0),
            experience: Some(0),
            username: Some("".into()),
            ..Default::default()
        };
        service.update(&id, patch, None).await.unwrap();

        let details = service.details(&id).await.unwrap();
        assert_eq!(details.price, 999.0);
        assert_eq!(details.experience, 4);
        assert_eq!(details.username, "Ramesh");
        assert_eq!(details.description.as_deref(), Some("Reads birth charts."));
    }

    #[tokio::test]
    async fn update_with_image_overwrites_profile_pic() {
        let (service, _) = service(Some("https://media.test/new.png"));
        service.create(request("Ramesh", 100.0), None).await.unwrap();
        let id = service.search("Ramesh").await.unwrap()[0].id.clone();

        let image = UploadSource { file_name: "new.png".into(), bytes: vec![9] };
        service.update(&id, AstrologerRequest::default(), Some(image)).await.unwrap();

        let details = service.details(&id).await.unwrap();
        assert_eq!(details.profile_pic.as_deref(), Some("https://media.test/new.png"));
    }

    #[tokio::test]
    async fn delete_removes_the_record() {
        let (service, _) = service(None);
        service.create(request("Ramesh", 100.0), None).await.unwrap();
        let id = service.search("Ramesh").await.unwrap()[0].id.clone();

        service.delete(&id).await.unwrap();
        assert!(matches!(service.details(&id).await.unwrap_err(), ServiceError::NotFound));
        assert!(matches!(service.delete(&id).await.unwrap_err(), ServiceError::NotFound));
    }

    #[tokio::test]
    async fn list_pages_through_descending_prices() {
        let (service, _) = service(None);
        for (name, price) in
            [("Aarav", 100.0), ("Bhavna", 200.0), ("Chandra", 300.0), ("Divya", 400.0), ("Eshan", 500.0)]
        {
            service.create(request(name, price), None).await.unwrap();
        }

        let params = list_params(&[("limit", "2"), ("page", "2"), ("priceSort", "-1")]);
        let (page, count) = service.list(&params).await.unwrap();
        assert_eq!(count, 5);
        let prices: Vec<f64> = page.iter().map(|a| a.price).collect();
        assert_eq!(prices, vec![300.0, 200.0]);
        assert!(page[0].description.is_none());
    }

    #[tokio::test]
    async fn list_filters_languages_with_and_semantics() {
        let (service, _) = service(None);
        let mut hindi_english = request("Aarav", 100.0);
        hindi_english.language = Some(vec!["Hindi".into(), "English".into()]);
        let mut hindi_only = request("Bhavna", 200.0);
        hindi_only.language = Some(vec!["Hindi".into()]);
        let mut tamil_only = request("Chandra", 300.0);
        tamil_only.language = Some(vec!["Tamil".into()]);
        for req in [hindi_english, hindi_only, tamil_only] {
            service.create(req, None).await.unwrap();
        }

        let (page, count) =
            service.list(&list_params(&[("language", "hindi+english")])).await.unwrap();
        assert_eq!(count, 1);
        assert_eq!(page[0].username, "Aarav");

        // Partial patterns match inside elements.
        let (page, _) = service.list(&list_params(&[("language", "hi")])).await.unwrap();
        let names: Vec<&str> = page.iter().map(|a| a.username.as_str()).collect();
        assert_eq!(names, ["Aarav", "Bhavna"]);
    }

    #[tokio::test]
    async fn list_filters_expertise_independently() {
        let (service, _) = service(None);
        let mut tarot = request("Aarav", 100.0);
        tarot.expertise = Some(vec!["Tarot".into(), "Numerology".into()]);
        let mut vedic = request("Bhavna", 200.0);
        vedic.expertise = Some(vec!["Vedic".into()]);
        for req in [tarot, vedic] {
            service.create(req, None).await.unwrap();
        }

        let (page, count) =
            service.list(&list_params(&[("expertise", "tarot numer")])).await.unwrap();
        assert_eq!(count, 1);
        assert_eq!(page[0].username, "Aarav");
    }

    #[tokio::test]
    async fn list_on_empty_store_is_empty_not_an_error() {
        let (service, _) = service(None);
        let (page, count) = service.list(&ListAstrologersQuery::default()).await.unwrap();
        assert!(page.is_empty());
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn search_matches_case_insensitive_substrings() {
        let (service, _) = service(None);
        for name in ["Ramesh", "Shyamram", "Suresh"] {
            service.create(request(name, 100.0), None).await.unwrap();
        }

        let found = service.search("ram").await.unwrap();
        let names: Vec<&str> = found.iter().map(|a| a.username.as_str()).collect();
        assert_eq!(names, ["Ramesh", "Shyamram"]);

        assert!(service.search("zzz").await.unwrap().is_empty());
    }
}
