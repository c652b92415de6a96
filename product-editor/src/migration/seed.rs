//! 演示数据 - 按行业写入示例产品
//!
//! Products are built through the variant engine, so seeded rows follow
//! the same expansion rules as hand-edited ones. Seeding never duplicates:
//! a product whose name already exists (case-insensitive) is skipped.

use crate::store::{PersistenceError, PersistenceResult, ProductStore, SaveProduct};
use crate::variants::{VariantEngine, VariantResult};
use shared::Session;
use shared::models::{Product, UnitInput, VariantDefaults, Vertical};
use shared::session::PRODUCTS_WRITE;
use std::collections::HashSet;

/// Result of one seeding run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub inserted: usize,
    pub skipped: usize,
}

struct DemoProduct {
    name: &'static str,
    category: &'static str,
    prefix: &'static str,
    cost_price: f64,
    price: f64,
    stock: i64,
    /// (name, conversion, own price); the first entry is the base unit
    units: &'static [(&'static str, f64, Option<f64>)],
    attributes: &'static [(&'static str, &'static [&'static str])],
}

const FASHION: &[DemoProduct] = &[
    DemoProduct {
        name: "Classic Tee",
        category: "tops",
        prefix: "TEE",
        cost_price: 7.5,
        price: 19.9,
        stock: 40,
        units: &[("Piece", 1.0, None)],
        attributes: &[("Color", &["Black", "White"]), ("Size", &["S", "M", "L"])],
    },
    DemoProduct {
        name: "Slim Jeans",
        category: "bottoms",
        prefix: "JEAN",
        cost_price: 22.0,
        price: 59.0,
        stock: 15,
        units: &[],
        attributes: &[("Size", &["30", "32", "34"]), ("Style", &["Slim"])],
    },
    DemoProduct {
        name: "Canvas Tote",
        category: "accessories",
        prefix: "TOTE",
        cost_price: 8.0,
        price: 24.0,
        stock: 25,
        units: &[],
        attributes: &[("Color", &["Natural", "Navy"]), ("Material", &["Canvas"])],
    },
];

const SPA: &[DemoProduct] = &[
    DemoProduct {
        name: "Aromatherapy Massage",
        category: "massage",
        prefix: "AROMA",
        cost_price: 20.0,
        price: 80.0,
        stock: 0,
        units: &[],
        attributes: &[
            ("Duration", &["60 min", "90 min"]),
            ("Therapist Level", &["Senior", "Master"]),
        ],
    },
    DemoProduct {
        name: "Hydrating Facial",
        category: "facial",
        prefix: "FACIAL",
        cost_price: 15.0,
        price: 65.0,
        stock: 0,
        units: &[],
        attributes: &[("Package", &["Single", "5 Sessions"])],
    },
];

const FOOD_BEVERAGE: &[DemoProduct] = &[
    DemoProduct {
        name: "Iced Latte",
        category: "coffee",
        prefix: "LATTE",
        cost_price: 1.2,
        price: 4.5,
        stock: 100,
        units: &[("Cup", 1.0, None)],
        attributes: &[
            ("Size", &["Regular", "Large"]),
            ("Sugar Level", &["None", "Half", "Full"]),
        ],
    },
    DemoProduct {
        name: "Green Tea",
        category: "tea",
        prefix: "GTEA",
        cost_price: 0.6,
        price: 3.0,
        stock: 100,
        units: &[("Cup", 1.0, None)],
        attributes: &[("Temperature", &["Hot", "Iced"])],
    },
];

const CONVENIENCE: &[DemoProduct] = &[
    DemoProduct {
        name: "Sparkling Water",
        category: "drinks",
        prefix: "SPARK",
        cost_price: 0.4,
        price: 1.2,
        stock: 240,
        units: &[
            ("Bottle", 1.0, None),
            ("Pack", 6.0, Some(6.5)),
            ("Carton", 24.0, Some(24.0)),
        ],
        attributes: &[("Flavor", &["Lemon", "Lime"])],
    },
    DemoProduct {
        name: "Potato Chips",
        category: "snacks",
        prefix: "CHIPS",
        cost_price: 0.9,
        price: 2.5,
        stock: 60,
        units: &[("Bag", 1.0, None)],
        attributes: &[("Flavor", &["Salted", "BBQ"]), ("Pack Size", &["70g"])],
    },
];

fn demo_set(vertical: Vertical) -> &'static [DemoProduct] {
    match vertical {
        Vertical::Fashion => FASHION,
        Vertical::Spa => SPA,
        Vertical::FoodBeverage => FOOD_BEVERAGE,
        Vertical::Convenience => CONVENIENCE,
    }
}

fn build(demo: &DemoProduct, vertical: Vertical) -> VariantResult<Product> {
    let defaults = VariantDefaults {
        cost_price: demo.cost_price,
        price: demo.price,
        stock: demo.stock,
    };
    let mut engine = VariantEngine::new(demo.prefix, defaults).with_vertical(vertical);
    for (name, conversion, price) in demo.units {
        let mut unit = UnitInput::new(*name, *conversion);
        unit.price = *price;
        engine.add_or_update_unit(unit)?;
    }
    for (name, values) in demo.attributes {
        let id = engine.add_attribute(name)?;
        for value in *values {
            engine.add_attribute_value(id, value)?;
        }
    }

    let mut product = Product::new(demo.name, demo.category);
    product.code_prefix = demo.prefix.to_string();
    product.vertical = vertical;
    product.cost_price = demo.cost_price;
    product.price = demo.price;
    product.stock = demo.stock;
    product.variant_properties = engine.to_properties();
    Ok(product)
}

/// Demo products of one vertical
pub fn demo_catalog(vertical: Vertical) -> VariantResult<Vec<Product>> {
    demo_set(vertical)
        .iter()
        .map(|demo| build(demo, vertical))
        .collect()
}

/// Insert the vertical's demo products that are not in the store yet
pub async fn seed_demo_catalog(
    store: &dyn ProductStore,
    session: &Session,
    vertical: Vertical,
) -> PersistenceResult<SeedReport> {
    if !session.has_permission(PRODUCTS_WRITE) {
        return Err(PersistenceError::PermissionDenied(PRODUCTS_WRITE.to_string()));
    }

    let mut existing: HashSet<String> = store
        .list()
        .await?
        .into_iter()
        .map(|p| p.product.name.trim().to_lowercase())
        .collect();

    let mut report = SeedReport::default();
    for product in demo_catalog(vertical)? {
        if !existing.insert(product.name.trim().to_lowercase()) {
            report.skipped += 1;
            continue;
        }
        store
            .save(SaveProduct::create(product, Some(session.username.clone())))
            .await?;
        report.inserted += 1;
    }

    tracing::info!(
        vertical = %vertical,
        inserted = report.inserted,
        skipped = report.skipped,
        "Demo catalog seeded"
    );
    Ok(report)
}
