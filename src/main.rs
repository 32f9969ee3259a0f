use property_catalog::listing::{self, RECENT_COUNT, SUMMARY_CHARS};
use property_catalog::{open_store, CatalogConfig, Property, PropertyDraft, PropertyPatch};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn print_property(index: usize, property: &Property) {
    println!("{}. {} ({} €)", index + 1, property.title, property.price);
    println!("   Location: {}", property.location);
    println!("   {}", property.summary(SUMMARY_CHARS));
    println!("   ID: {}", property.id);
    println!();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("🏠 Property Catalog");

    let config = CatalogConfig::from_env()?;
    let mut store = open_store(&config)?;

    // Home page: the newest few listings
    let recent = listing::recent(store.list().await?, RECENT_COUNT);
    println!("Recent listings");
    for (i, property) in recent.iter().enumerate() {
        print_property(i, property);
    }

    // Add page
    let draft = PropertyDraft::new(
        "Canal-side Loft",
        "Strasbourg",
        "289000",
        "Open-plan loft with exposed beams, overlooking the Petite France canals.",
    );
    let created = store.create(draft).await?;
    info!("✅ Added property {}", created.id);

    // Add page, rejected input
    if let Err(e) = store.create(PropertyDraft::new("", "Lyon", "100", "x")).await {
        warn!("Add rejected: {}", e);
    }

    // Detail page
    match store.get_by_id(&created.id).await? {
        Some(property) => print_property(0, &property),
        None => warn!("Property {} not found", created.id),
    }

    // Edit page
    let updated = store
        .update(&created.id, PropertyPatch::default().price("275000"))
        .await?;
    info!("✏️  Updated property {} to {} €", updated.id, updated.price);

    // All listings page
    let all = listing::newest_first(store.list().await?);
    println!("All listings ({})", all.len());
    for (i, property) in all.iter().enumerate() {
        print_property(i, property);
    }

    // Delete from the edit page
    let removed = store.delete(&created.id).await?;
    info!("🗑️  Deleted property {}: {}", created.id, removed);

    Ok(())
}
