//! # Site Admin Service
//!
//! The two singleton records: about-page content and site images.
//! Both live at the fixed id 1; every update overwrites that row.

use std::sync::Arc;

use tracing::info;

use vitrina_core::validation::validate_reference_literal;
use vitrina_core::{
    AboutContent, AssetField, AssetInput, ContentError, ContentResult, Repository, SiteImages,
    WriteMode, SINGLETON_ID,
};

use crate::lifecycle::{AssetChanges, AssetLifecycleManager};

/// Partial update of the about page. `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct AboutUpdate {
    pub title: Option<String>,
    pub text: Option<String>,
    pub image: AssetInput,
}

/// New logo and background; each follows the upload/literal/keep rule.
#[derive(Debug, Clone, Default)]
pub struct SiteImagesUpdate {
    pub logo: AssetInput,
    pub background: AssetInput,
}

#[derive(Clone)]
pub struct SiteAdminService {
    repo: Arc<dyn Repository>,
    assets: AssetLifecycleManager,
}

impl SiteAdminService {
    pub fn new(repo: Arc<dyn Repository>, assets: AssetLifecycleManager) -> Self {
        SiteAdminService { repo, assets }
    }

    pub async fn about(&self) -> ContentResult<AboutContent> {
        Ok(self.repo.get_about().await?)
    }

    pub async fn update_about(&self, update: AboutUpdate) -> ContentResult<AboutContent> {
        validate_reference_literal("image", update.image.literal.as_deref())?;

        let current = self.repo.get_about().await?;

        let mut changes = AssetChanges::new();
        let image = self
            .assets
            .resolve(
                AssetField::AboutImage,
                Some(&current.image),
                &update.image,
                WriteMode::Replace,
                &mut changes,
            )
            .await?;

        let about = AboutContent {
            title: update.title.unwrap_or(current.title),
            text: update.text.unwrap_or(current.text),
            image,
        };

        let write = self.repo.update_about(&about).await;
        self.assets.settle(changes, write).await?;

        info!("About content updated");
        Ok(about)
    }

    pub async fn site_images(&self) -> ContentResult<SiteImages> {
        Ok(self.repo.get_site_images().await?)
    }

    pub async fn update_site_images(&self, update: SiteImagesUpdate) -> ContentResult<SiteImages> {
        validate_reference_literal("logo", update.logo.literal.as_deref())?;
        validate_reference_literal("background", update.background.literal.as_deref())?;

        let current = self.repo.get_site_images().await?;

        let mut changes = AssetChanges::new();
        let logo = self
            .assets
            .resolve(
                AssetField::SiteLogo,
                Some(&current.logo),
                &update.logo,
                WriteMode::Replace,
                &mut changes,
            )
            .await?;
        let background = self
            .assets
            .resolve(
                AssetField::SiteBackground,
                Some(&current.background),
                &update.background,
                WriteMode::Replace,
                &mut changes,
            )
            .await?;

        let images = SiteImages { logo, background };
        changes.keep_referenced(&[images.logo.as_str(), images.background.as_str()]);
        let write = self.repo.update_site_images(&images).await;
        self.assets.settle(changes, write).await?;

        info!("Site images updated");
        Ok(images)
    }

    /// The logo reference, for redirecting `/logo` requests.
    ///
    /// ## Returns
    /// * `Err(ContentError::NotFound)` - No logo has been set
    pub async fn logo_reference(&self) -> ContentResult<String> {
        let images = self.repo.get_site_images().await?;
        if images.logo.trim().is_empty() {
            return Err(ContentError::not_found("Logo", SINGLETON_ID));
        }
        Ok(images.logo)
    }
}
