//! # Carousel Admin Service
//!
//! Upsert and delete for homepage carousel slides.
//!
//! ## Upsert
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  id given ──► get_carousel_slide(id)                                    │
//! │                 ├── None ──► NotFound (never falls through to insert)   │
//! │                 └── Some(current)                                       │
//! │                       resolve image, mobile_image  (Replace mode)       │
//! │                       update_carousel_slide(id, all fields)             │
//! │                       delete superseded references                      │
//! │                                                                         │
//! │  no id ─────► resolve image, mobile_image  (Create mode, no deletes)    │
//! │               insert_carousel_slide                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The read of the current slide and the final write are not atomic. Two
//! concurrent upserts of the same slide may both replace the same old
//! reference: last writer wins, and the loser's upload is left unreferenced.

use std::sync::Arc;

use tracing::info;

use vitrina_core::validation::{
    validate_color, validate_identifier, validate_reference_literal, validate_slide_text,
};
use vitrina_core::{
    AssetField, AssetInput, CarouselSlide, ContentError, ContentResult, Repository, SlideFields,
    WriteMode,
};

use crate::lifecycle::{AssetChanges, AssetLifecycleManager};

/// Form data for a slide upsert.
#[derive(Debug, Clone, Default)]
pub struct SlideUpsert {
    /// Existing slide to update; `None` inserts a new one.
    pub id: Option<i64>,
    pub text: String,
    pub color1: String,
    pub color2: String,
    pub image: AssetInput,
    pub mobile_image: AssetInput,
}

impl SlideUpsert {
    fn validate(&self) -> ContentResult<()> {
        if let Some(id) = self.id {
            validate_identifier(id)?;
        }
        validate_slide_text(&self.text)?;
        validate_color("color1", &self.color1)?;
        validate_color("color2", &self.color2)?;
        validate_reference_literal("image", self.image.literal.as_deref())?;
        validate_reference_literal("mobile_image", self.mobile_image.literal.as_deref())?;
        Ok(())
    }
}

#[derive(Clone)]
pub struct CarouselAdminService {
    repo: Arc<dyn Repository>,
    assets: AssetLifecycleManager,
}

impl CarouselAdminService {
    pub fn new(repo: Arc<dyn Repository>, assets: AssetLifecycleManager) -> Self {
        CarouselAdminService { repo, assets }
    }

    /// Updates the slide named by `input.id`, or inserts one when there is no id.
    ///
    /// ## Returns
    /// * `Ok(slide)` - The slide as written
    /// * `Err(ContentError::NotFound)` - `id` given but no such slide
    /// * `Err(ContentError::AssetIo)` - An upload failed; nothing was written
    /// * `Err(ContentError::StorageUnavailable)` - The write failed; uploads
    ///   made for it are orphaned
    pub async fn upsert(&self, input: SlideUpsert) -> ContentResult<CarouselSlide> {
        input.validate()?;

        match input.id {
            Some(id) => self.update(id, input).await,
            None => self.insert(input).await,
        }
    }

    async fn update(&self, id: i64, input: SlideUpsert) -> ContentResult<CarouselSlide> {
        let current = self
            .repo
            .get_carousel_slide(id)
            .await?
            .ok_or_else(|| ContentError::not_found("Carousel slide", id))?;

        let mut changes = AssetChanges::new();
        let image = self
            .assets
            .resolve(
                AssetField::SlideImage,
                Some(&current.image),
                &input.image,
                WriteMode::Replace,
                &mut changes,
            )
            .await?;
        let mobile_image = self
            .assets
            .resolve(
                AssetField::SlideMobileImage,
                Some(&current.mobile_image),
                &input.mobile_image,
                WriteMode::Replace,
                &mut changes,
            )
            .await?;

        let fields = SlideFields {
            text: input.text,
            image,
            mobile_image,
            color1: input.color1,
            color2: input.color2,
        };

        changes.keep_referenced(&[fields.image.as_str(), fields.mobile_image.as_str()]);
        let write = self.repo.update_carousel_slide(id, &fields).await;
        self.assets.settle(changes, write).await?;

        info!(id, "Carousel slide updated");
        Ok(fields.into_slide(id))
    }

    async fn insert(&self, input: SlideUpsert) -> ContentResult<CarouselSlide> {
        let mut changes = AssetChanges::new();
        let image = self
            .assets
            .resolve(AssetField::SlideImage, None, &input.image, WriteMode::Create, &mut changes)
            .await?;
        let mobile_image = self
            .assets
            .resolve(
                AssetField::SlideMobileImage,
                None,
                &input.mobile_image,
                WriteMode::Create,
                &mut changes,
            )
            .await?;

        let fields = SlideFields {
            text: input.text,
            image,
            mobile_image,
            color1: input.color1,
            color2: input.color2,
        };

        let write = self.repo.insert_carousel_slide(&fields).await;
        let slide = self.assets.settle(changes, write).await?;

        info!(id = slide.id, "Carousel slide created");
        Ok(slide)
    }

    /// Deletes the slide, then its images. Image delete failures are logged.
    pub async fn delete(&self, id: i64) -> ContentResult<()> {
        validate_identifier(id)?;

        let slide = self
            .repo
            .get_carousel_slide(id)
            .await?
            .ok_or_else(|| ContentError::not_found("Carousel slide", id))?;

        self.repo.delete_carousel_slide(id).await?;
        info!(id, "Carousel slide deleted");

        self.assets.release(AssetField::SlideImage, &slide.image).await;
        if slide.mobile_image != slide.image {
            self.assets
                .release(AssetField::SlideMobileImage, &slide.mobile_image)
                .await;
        }
        Ok(())
    }

    /// All slides in display order.
    pub async fn list(&self) -> ContentResult<Vec<CarouselSlide>> {
        Ok(self.repo.list_carousel_slides().await?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{slide_fields, FakeRepository, RecordingAssetStore};
    use vitrina_core::error::AssetStep;
    use vitrina_core::{Upload, ValidationError};

    struct Fixture {
        repo: Arc<FakeRepository>,
        store: Arc<RecordingAssetStore>,
        service: CarouselAdminService,
    }

    fn fixture() -> Fixture {
        let repo = Arc::new(FakeRepository::new());
        let store = Arc::new(RecordingAssetStore::new());
        let service =
            CarouselAdminService::new(repo.clone(), AssetLifecycleManager::new(store.clone()));
        Fixture {
            repo,
            store,
            service,
        }
    }

    fn form(id: Option<i64>) -> SlideUpsert {
        SlideUpsert {
            id,
            text: "Spring sale".into(),
            color1: "#112233".into(),
            color2: "#fff".into(),
            ..SlideUpsert::default()
        }
    }

    fn png(name: &str) -> AssetInput {
        AssetInput::upload(Upload::new(name, &b"png"[..]))
    }

    #[tokio::test]
    async fn test_replace_then_keep() {
        let f = fixture();
        let slide = f.repo.seed_slide(slide_fields("Old", "R1", "M1"));

        // Upload replaces R1 and deletes it exactly once
        let updated = f
            .service
            .upsert(SlideUpsert {
                image: png("new.png"),
                ..form(Some(slide.id))
            })
            .await
            .unwrap();
        let r2 = f.store.uploads()[0].clone();
        assert_eq!(updated.image, r2);
        assert_eq!(f.repo.slide(slide.id).unwrap().image, r2);
        assert_eq!(f.store.deletes(), vec!["R1".to_string()]);

        // No upload, no literal: R2 stays, no store calls
        let calls_before = f.store.total_calls();
        f.service.upsert(form(Some(slide.id))).await.unwrap();

        let stored = f.repo.slide(slide.id).unwrap();
        assert_eq!(stored.image, r2);
        assert_eq!(stored.mobile_image, "M1");
        assert_eq!(f.store.total_calls(), calls_before);
    }

    #[tokio::test]
    async fn test_fields_are_independent() {
        let f = fixture();
        let slide = f.repo.seed_slide(slide_fields("Old", "R1", "M1"));

        let updated = f
            .service
            .upsert(SlideUpsert {
                mobile_image: AssetInput::literal("https://cdn.example/m.jpg"),
                ..form(Some(slide.id))
            })
            .await
            .unwrap();

        assert_eq!(updated.image, "R1");
        assert_eq!(updated.mobile_image, "https://cdn.example/m.jpg");
        // A literal never deletes the old reference
        assert_eq!(f.store.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_replacing_image_keeps_shared_mobile_image() {
        let f = fixture();
        let slide = f.repo.seed_slide(slide_fields("x", "R1", "R1"));

        let updated = f
            .service
            .upsert(SlideUpsert {
                image: png("new.png"),
                ..form(Some(slide.id))
            })
            .await
            .unwrap();

        let stored = f.repo.slide(slide.id).unwrap();
        assert_ne!(updated.image, "R1");
        assert_eq!(stored.mobile_image, "R1");
        assert!(f.store.deletes().is_empty());
    }

    #[tokio::test]
    async fn test_replacing_both_shared_images_deletes_once() {
        let f = fixture();
        let slide = f.repo.seed_slide(slide_fields("x", "R1", "R1"));

        f.service
            .upsert(SlideUpsert {
                image: png("wide.png"),
                mobile_image: png("narrow.png"),
                ..form(Some(slide.id))
            })
            .await
            .unwrap();

        assert_eq!(f.store.deletes(), vec!["R1".to_string()]);
    }

    #[tokio::test]
    async fn test_insert_never_deletes() {
        let f = fixture();

        let slide = f
            .service
            .upsert(SlideUpsert {
                image: png("wide.png"),
                ..form(None)
            })
            .await
            .unwrap();

        assert_eq!(f.store.uploads().len(), 1);
        assert!(f.store.deletes().is_empty());
        assert_eq!(slide.mobile_image, "");
        assert_eq!(f.repo.slide(slide.id).unwrap(), slide);
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found_without_insert() {
        let f = fixture();

        let err = f
            .service
            .upsert(SlideUpsert {
                image: png("wide.png"),
                ..form(Some(404))
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ContentError::NotFound { .. }));
        assert_eq!(f.repo.calls("insert_carousel_slide"), 0);
        assert_eq!(f.repo.slide_count(), 0);
        assert_eq!(f.store.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_upload_failure_writes_nothing() {
        let f = fixture();
        let slide = f.repo.seed_slide(slide_fields("Old", "R1", "M1"));
        f.store.fail_uploads(true);

        let err = f
            .service
            .upsert(SlideUpsert {
                image: png("new.png"),
                ..form(Some(slide.id))
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ContentError::AssetIo {
                field: AssetField::SlideImage,
                step: AssetStep::Upload,
                ..
            }
        ));
        assert_eq!(f.repo.calls("update_carousel_slide"), 0);
        assert_eq!(f.repo.slide(slide.id).unwrap().image, "R1");
    }

    #[tokio::test]
    async fn test_failed_write_orphans_upload_and_keeps_old() {
        let f = fixture();
        let slide = f.repo.seed_slide(slide_fields("Old", "R1", "M1"));
        f.repo.fail_writes(true);

        let err = f
            .service
            .upsert(SlideUpsert {
                image: png("new.png"),
                ..form(Some(slide.id))
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ContentError::StorageUnavailable(_)));
        assert_eq!(f.store.uploads().len(), 1);
        assert!(f.store.deletes().is_empty());
    }

    #[tokio::test]
    async fn test_delete_failure_does_not_fail_update() {
        let f = fixture();
        let slide = f.repo.seed_slide(slide_fields("Old", "R1", "M1"));
        f.store.fail_deletes(true);

        let updated = f
            .service
            .upsert(SlideUpsert {
                image: png("new.png"),
                ..form(Some(slide.id))
            })
            .await
            .unwrap();

        assert_ne!(updated.image, "R1");
        assert_eq!(f.store.deletes(), vec!["R1".to_string()]);
    }

    #[tokio::test]
    async fn test_validation_runs_before_upload() {
        let f = fixture();

        let err = f
            .service
            .upsert(SlideUpsert {
                color1: "red".into(),
                image: png("new.png"),
                ..form(None)
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ContentError::Validation(ValidationError::InvalidFormat { .. })
        ));
        assert_eq!(f.store.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_delete_removes_both_images() {
        let f = fixture();
        let slide = f.repo.seed_slide(slide_fields("Old", "R1", ""));

        f.service.delete(slide.id).await.unwrap();

        assert!(f.repo.slide(slide.id).is_none());
        // Empty mobile image: nothing to delete
        assert_eq!(f.store.deletes(), vec!["R1".to_string()]);

        let err = f.service.delete(slide.id).await.unwrap_err();
        assert!(matches!(err, ContentError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_releases_shared_reference_once() {
        let f = fixture();
        let slide = f.repo.seed_slide(slide_fields("x", "R1", "R1"));

        f.service.delete(slide.id).await.unwrap();
        assert_eq!(f.store.deletes(), vec!["R1".to_string()]);
    }

    #[tokio::test]
    async fn test_delete_survives_store_failure() {
        let f = fixture();
        let slide = f.repo.seed_slide(slide_fields("Old", "R1", "M1"));
        f.store.fail_deletes(true);

        f.service.delete(slide.id).await.unwrap();
        assert!(f.repo.slide(slide.id).is_none());
        assert_eq!(f.store.deletes().len(), 2);
    }

    /// Two upserts of one slide interleave their read and write. Both read
    /// R1 as current, both delete it, and the first writer's upload ends up
    /// referenced by nothing. Last writer wins.
    #[tokio::test]
    async fn test_concurrent_upserts_race_on_old_reference() {
        let f = fixture();
        let slide = f.repo.seed_slide(slide_fields("Old", "R1", "M1"));
        let service = Arc::new(f.service.clone());

        let (entered, release) = f.store.gate_next_upload();
        let slow = tokio::spawn({
            let service = service.clone();
            let input = SlideUpsert {
                image: png("slow.png"),
                ..form(Some(slide.id))
            };
            async move { service.upsert(input).await }
        });

        // The slow writer has read R1 and is parked inside its upload
        entered.await.unwrap();

        let fast = service
            .upsert(SlideUpsert {
                image: png("fast.png"),
                ..form(Some(slide.id))
            })
            .await
            .unwrap();
        assert_eq!(f.repo.slide(slide.id).unwrap().image, fast.image);

        release.send(()).unwrap();
        let slow = slow.await.unwrap().unwrap();

        assert_eq!(f.repo.slide(slide.id).unwrap().image, slow.image);
        assert_eq!(f.store.deletes(), vec!["R1".to_string(), "R1".to_string()]);
        assert!(!f.store.deletes().contains(&fast.image));
    }
}
