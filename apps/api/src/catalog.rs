//! Static seed catalog.
//!
//! The catalog is an external collaborator in production; this API ships a
//! small seed listing so the storefront works end to end without it.

use storefront_core::{Amount, Product};

fn seed(
    id: &str,
    title: &str,
    price: &str,
    category: &str,
    brand: &str,
    rating: f64,
    discount: f64,
    stock: u32,
) -> Product {
    Product {
        id: id.to_string(),
        title: title.to_string(),
        price: Amount::from_rupees_str(price).unwrap_or_default(),
        category: category.to_string(),
        thumbnail: format!("https://cdn.example.com/products/{}.jpg", id),
        rating,
        discount_percentage: discount,
        brand: brand.to_string(),
        stock,
    }
}

/// The seed product listing.
pub fn list_products() -> Vec<Product> {
    vec![
        seed(
            "p-001",
            "Wireless Headphones",
            "499",
            "electronics",
            "SoundCore",
            4.5,
            10.0,
            120,
        ),
        seed(
            "p-002",
            "Mechanical Keyboard",
            "1299.50",
            "electronics",
            "KeyForge",
            4.7,
            5.0,
            45,
        ),
        seed(
            "p-003",
            "Cotton T-Shirt",
            "349",
            "apparel",
            "FabriCo",
            4.1,
            0.0,
            300,
        ),
        seed(
            "p-004",
            "Stainless Water Bottle",
            "599",
            "home",
            "HydraWare",
            4.3,
            15.0,
            80,
        ),
        seed(
            "p-005",
            "Desk Lamp",
            "899.99",
            "home",
            "Lumio",
            4.6,
            0.0,
            60,
        ),
        seed(
            "p-006",
            "Running Shoes",
            "2499",
            "footwear",
            "Stride",
            4.4,
            20.0,
            75,
        ),
        seed(
            "p-007",
            "Yoga Mat",
            "799",
            "fitness",
            "FlexFit",
            4.2,
            0.0,
            150,
        ),
        seed(
            "p-008",
            "Bluetooth Speaker",
            "1599",
            "electronics",
            "SoundCore",
            4.8,
            12.5,
            90,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_catalog_is_well_formed() {
        let products = list_products();
        assert!(!products.is_empty());

        for product in &products {
            assert!(product.price.is_positive(), "{} has no price", product.id);
            assert!(product.stock > 0);
        }

        // Unique ids
        let mut ids: Vec<_> = products.iter().map(|p| p.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), products.len());
    }
}
