//! Command line definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "vitrina-panel")]
#[command(author, version, about = "Vitrina storefront and admin panel")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the homepage view (products, carousel, about, images)
    Home,
    /// Print the cart view (products, about, images)
    Cart,
    /// Buy one unit of a product
    Buy {
        /// Product id
        id: i64,
    },
    /// Manage products
    Product {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Manage carousel slides
    Slide {
        #[command(subcommand)]
        action: SlideAction,
    },
    /// Show the about page, or update it when any option is given
    About(AboutArgs),
    /// Show the site images, or update them when any option is given
    Images(ImagesArgs),
    /// Print the logo reference
    Logo,
}

#[derive(Subcommand)]
pub enum ProductAction {
    /// Create a product
    New(ProductArgs),
    /// Overwrite a product's fields
    Edit {
        id: i64,
        #[command(flatten)]
        product: ProductArgs,
    },
    /// Delete a product and its image
    Delete { id: i64 },
    /// Print one product
    Show { id: i64 },
    /// Show or hide a product on the storefront
    Visibility {
        id: i64,
        /// Hide instead of show
        #[arg(long)]
        hidden: bool,
    },
}

#[derive(Args)]
pub struct ProductArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long, default_value = "")]
    pub description: String,

    /// Price in cents
    #[arg(long)]
    pub price_cents: i64,

    #[arg(long, default_value_t = 1)]
    pub stock: i64,

    /// Battery health, 0-100
    #[arg(long, default_value_t = 100)]
    pub battery: i64,

    #[arg(long, default_value = "")]
    pub storage: String,

    #[arg(long, default_value = "")]
    pub condition: String,

    /// Create/keep the product hidden from the storefront
    #[arg(long)]
    pub hidden: bool,

    #[command(flatten)]
    pub image: ImageArgs,
}

/// An image given either as a file to upload or as a URL to store verbatim.
#[derive(Args)]
pub struct ImageArgs {
    /// Image file to upload
    #[arg(long = "image-file")]
    pub file: Option<PathBuf>,

    /// Image URL to store as-is
    #[arg(long = "image-url")]
    pub url: Option<String>,
}

#[derive(Subcommand)]
pub enum SlideAction {
    /// Update the slide given by --id, or insert a new one
    Upsert {
        #[arg(long)]
        id: Option<i64>,

        #[arg(long, default_value = "")]
        text: String,

        #[arg(long, default_value = "#000000")]
        color1: String,

        #[arg(long, default_value = "#ffffff")]
        color2: String,

        #[command(flatten)]
        image: ImageArgs,

        /// Mobile image file to upload
        #[arg(long)]
        mobile_image_file: Option<PathBuf>,

        /// Mobile image URL to store as-is
        #[arg(long)]
        mobile_image_url: Option<String>,
    },
    /// Delete a slide and its images
    Delete { id: i64 },
}

#[derive(Args)]
pub struct AboutArgs {
    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub text: Option<String>,

    #[command(flatten)]
    pub image: ImageArgs,
}

impl AboutArgs {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.text.is_none()
            && self.image.file.is_none()
            && self.image.url.is_none()
    }
}

#[derive(Args)]
pub struct ImagesArgs {
    #[arg(long)]
    pub logo_file: Option<PathBuf>,

    #[arg(long)]
    pub logo_url: Option<String>,

    #[arg(long)]
    pub background_file: Option<PathBuf>,

    #[arg(long)]
    pub background_url: Option<String>,
}

impl ImagesArgs {
    pub fn is_empty(&self) -> bool {
        self.logo_file.is_none()
            && self.logo_url.is_none()
            && self.background_file.is_none()
            && self.background_url.is_none()
    }
}
