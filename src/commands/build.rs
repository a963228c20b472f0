//! Build the static site

use anyhow::Result;

use crate::generator::Generator;
use crate::Quill;

/// Load all content, validate it, and render the whole site.
pub fn run(quill: &Quill) -> Result<()> {
    let start = std::time::Instant::now();

    let catalog = quill.load_catalog()?;
    let pages = quill.load_pages()?;

    let drafts = catalog.posts().filter(|p| p.draft).count();
    tracing::info!(
        "loaded {} posts ({} drafts) and {} pages",
        catalog.len(),
        drafts,
        pages.len()
    );

    let generator = Generator::new(quill)?;
    generator.generate(&catalog, &pages)?;

    tracing::info!("built in {:.2}s", start.elapsed().as_secs_f64());
    Ok(())
}
