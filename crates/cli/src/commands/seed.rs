//! Seed the product catalog with the default Beauty Queen product set.

use rust_decimal::Decimal;
use secrecy::SecretString;

use beauty_queen_server::db::{self, ProductRepository, products::NewProduct};

/// Errors that can occur while seeding.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Repository error: {0}")]
    Repository(#[from] db::RepositoryError),
}

fn price(rupees: i64) -> Decimal {
    Decimal::new(rupees * 100, 2)
}

/// The default catalog.
fn default_products() -> Vec<NewProduct> {
    let items: [(&str, &str, i64, &str, i32); 8] = [
        (
            "Hydrating Face Serum",
            "Deeply hydrating serum with hyaluronic acid for glowing skin",
            1299,
            "skincare",
            50,
        ),
        (
            "Matte Lipstick - Rosewood",
            "Long-lasting matte lipstick in beautiful rosewood shade",
            599,
            "makeup",
            30,
        ),
        (
            "Nourishing Hair Oil",
            "Natural hair oil for strong and shiny hair",
            899,
            "haircare",
            40,
        ),
        (
            "Floral Perfume - Spring",
            "Fresh floral fragrance perfect for everyday wear",
            1999,
            "fragrance",
            25,
        ),
        (
            "Makeup Brush Set",
            "Professional 12-piece makeup brush set",
            1499,
            "accessories",
            20,
        ),
        (
            "Vitamin C Face Cream",
            "Brightening face cream with vitamin C",
            1599,
            "skincare",
            35,
        ),
        (
            "Eyeshadow Palette - Nudes",
            "12-shade nude eyeshadow palette",
            1299,
            "makeup",
            28,
        ),
        (
            "Anti-Dandruff Shampoo",
            "Effective anti-dandruff shampoo for healthy scalp",
            699,
            "haircare",
            45,
        ),
    ];

    items
        .into_iter()
        .map(|(name, description, rupees, category, stock)| NewProduct {
            name: name.to_owned(),
            description: description.to_owned(),
            price: price(rupees),
            image_url: None,
            category: category.to_owned(),
            stock,
        })
        .collect()
}

/// Seed the catalog.
///
/// # Errors
///
/// Returns an error if the database URL is missing or any insert fails.
pub async fn products(clear_existing: bool) -> Result<(), SeedError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("BQ_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| SeedError::MissingEnvVar("BQ_DATABASE_URL"))?;

    let pool = db::create_pool(&database_url).await?;
    tracing::info!("Connected to database");

    if clear_existing {
        let result = sqlx::query("DELETE FROM product").execute(&pool).await?;
        tracing::info!(removed = result.rows_affected(), "Cleared existing products");
    }

    let repo = ProductRepository::new(&pool);
    let catalog = default_products();
    let count = catalog.len();

    for product in &catalog {
        let created = repo.insert(product).await?;
        tracing::info!(id = %created.id, name = %created.name, "Seeded product");
    }

    tracing::info!(count, "Catalog seeded");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_conversion() {
        assert_eq!(price(1299), Decimal::new(129_900, 2));
    }

    #[test]
    fn test_default_products_well_formed() {
        let catalog = default_products();
        assert_eq!(catalog.len(), 8);
        assert!(catalog.iter().all(|p| !p.name.is_empty()));
        assert!(catalog.iter().all(|p| p.price > Decimal::ZERO));
        assert!(catalog.iter().all(|p| p.stock > 0));
    }
}
