//! Command dispatch: each command calls one service operation and prints
//! the result as JSON.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use serde::Serialize;

use vitrina_content::{
    AboutUpdate, AssetLifecycleManager, CarouselAdminService, CatalogAdminService, ContentService,
    ProductInput, SiteAdminService, SiteImagesUpdate, SlideUpsert,
};
use vitrina_core::{AssetInput, AssetStore, Cache, PurchaseOutcome, Repository, Upload};

use crate::cli::{Command, ImageArgs, ProductAction, ProductArgs, SlideAction};

/// The services, built once from the process-wide clients.
pub struct Services {
    pub content: ContentService,
    pub carousel: CarouselAdminService,
    pub catalog: CatalogAdminService,
    pub site: SiteAdminService,
}

impl Services {
    pub fn new(
        repo: Arc<dyn Repository>,
        cache: Arc<dyn Cache>,
        store: Arc<dyn AssetStore>,
        cache_ttl: std::time::Duration,
    ) -> Self {
        let assets = AssetLifecycleManager::new(store);
        Services {
            content: ContentService::new(repo.clone(), cache).with_ttl(cache_ttl),
            carousel: CarouselAdminService::new(repo.clone(), assets.clone()),
            catalog: CatalogAdminService::new(repo.clone(), assets.clone()),
            site: SiteAdminService::new(repo, assets),
        }
    }
}

pub async fn run(command: Command, services: &Services) -> anyhow::Result<()> {
    match command {
        Command::Home => print(&services.content.homepage_view().await?),
        Command::Cart => print(&services.content.cart_view().await?),
        Command::Buy { id } => {
            let outcome = services.catalog.purchase(id).await?;
            if outcome == PurchaseOutcome::OutOfStock {
                eprintln!("Product {id} is out of stock");
            }
            print(&outcome)
        }
        Command::Product { action } => product(action, services).await,
        Command::Slide { action } => slide(action, services).await,
        Command::About(args) => {
            if args.is_empty() {
                return print(&services.site.about().await?);
            }
            let update = AboutUpdate {
                title: args.title,
                text: args.text,
                image: asset_input(args.image.file.as_deref(), args.image.url).await?,
            };
            print(&services.site.update_about(update).await?)
        }
        Command::Images(args) => {
            if args.is_empty() {
                return print(&services.site.site_images().await?);
            }
            let update = SiteImagesUpdate {
                logo: asset_input(args.logo_file.as_deref(), args.logo_url).await?,
                background: asset_input(args.background_file.as_deref(), args.background_url)
                    .await?,
            };
            print(&services.site.update_site_images(update).await?)
        }
        Command::Logo => {
            println!("{}", services.site.logo_reference().await?);
            Ok(())
        }
    }
}

async fn product(action: ProductAction, services: &Services) -> anyhow::Result<()> {
    let catalog = &services.catalog;
    match action {
        ProductAction::New(args) => print(&catalog.create(product_input(args).await?).await?),
        ProductAction::Edit { id, product } => {
            print(&catalog.edit(id, product_input(product).await?).await?)
        }
        ProductAction::Delete { id } => {
            catalog.delete(id).await?;
            println!("Deleted product {id}");
            Ok(())
        }
        ProductAction::Show { id } => print(&catalog.product(id).await?),
        ProductAction::Visibility { id, hidden } => {
            print(&catalog.set_visibility(id, !hidden).await?)
        }
    }
}

async fn slide(action: SlideAction, services: &Services) -> anyhow::Result<()> {
    match action {
        SlideAction::Upsert {
            id,
            text,
            color1,
            color2,
            image,
            mobile_image_file,
            mobile_image_url,
        } => {
            let input = SlideUpsert {
                id,
                text,
                color1,
                color2,
                image: image_input(image).await?,
                mobile_image: asset_input(mobile_image_file.as_deref(), mobile_image_url).await?,
            };
            print(&services.carousel.upsert(input).await?)
        }
        SlideAction::Delete { id } => {
            services.carousel.delete(id).await?;
            println!("Deleted slide {id}");
            Ok(())
        }
    }
}

async fn product_input(args: ProductArgs) -> anyhow::Result<ProductInput> {
    Ok(ProductInput {
        name: args.name,
        description: args.description,
        price_cents: args.price_cents,
        stock: args.stock,
        battery_percent: args.battery,
        storage: args.storage,
        condition: args.condition,
        visible: !args.hidden,
        image: image_input(args.image).await?,
    })
}

async fn image_input(args: ImageArgs) -> anyhow::Result<AssetInput> {
    asset_input(args.file.as_deref(), args.url).await
}

/// Reads `file` into an upload, or wraps `url` as a literal reference.
async fn asset_input(file: Option<&Path>, url: Option<String>) -> anyhow::Result<AssetInput> {
    let upload = match file {
        Some(path) => Some(read_upload(path).await?),
        None => None,
    };
    Ok(AssetInput {
        upload,
        literal: url,
    })
}

async fn read_upload(path: &Path) -> anyhow::Result<Upload> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("reading {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| PathBuf::from(path).display().to_string());
    Ok(Upload::new(file_name, bytes))
}

fn print<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
