//! Product model scenarios, written against the `ProductStore` trait so every
//! backend runs the same checks. Each scenario expects an empty store.

use rust_decimal::Decimal;
use serde_json::{Value as JsonValue, json};

use catalog_core::DataValidationError;
use catalog_infra::{ProductRecord, ProductStore, StoreError};
use catalog_products::product::{MAX_DESCRIPTION_CHARS, MAX_NAME_CHARS};
use catalog_products::{Category, PriceQuery, Product};

use super::ProductFactory;

pub async fn add_a_product<S: ProductStore + ?Sized>(store: &S) {
    assert!(store.all().await.unwrap().is_empty());

    let mut product = ProductFactory::build();
    product.create(store).await.unwrap();
    assert!(product.id.is_some());

    let products = store.all().await.unwrap();
    assert_eq!(products.len(), 1);
    let stored = &products[0];
    assert_eq!(stored.id, product.id);
    assert_eq!(stored.name, product.name);
    assert_eq!(stored.description, product.description);
    assert_eq!(stored.price, product.price);
    assert_eq!(stored.available, product.available);
    assert_eq!(stored.category, product.category);
}

pub async fn read_a_product<S: ProductStore + ?Sized>(store: &S) {
    let mut product = ProductFactory::build();
    product.create(store).await.unwrap();
    let id = product.id.expect("create assigns an id");

    let found = store.find(id).await.unwrap().expect("created product is found");
    assert_eq!(found, product);
}

pub async fn update_a_product<S: ProductStore + ?Sized>(store: &S) {
    let mut product = ProductFactory::build();
    product.create(store).await.unwrap();
    let original_id = product.id;

    product.description = "New description".to_string();
    product.update(store).await.unwrap();
    assert_eq!(product.id, original_id);

    let products = store.all().await.unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].id, original_id);
    assert_eq!(products[0].description, "New description");
}

pub async fn update_with_empty_id_fails<S: ProductStore + ?Sized>(store: &S) {
    let mut product = ProductFactory::build();
    product.create(store).await.unwrap();
    let stored_description = product.description.clone();

    product.description = "New description".to_string();
    product.id = None;
    let err = product.update(store).await.unwrap_err();
    assert!(err.is_validation());
    assert!(matches!(err, StoreError::Validation(DataValidationError::MissingId)));

    // Nothing was written.
    let products = store.all().await.unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].description, stored_description);
}

pub async fn delete_a_product<S: ProductStore + ?Sized>(store: &S) {
    let mut product = ProductFactory::build();
    product.create(store).await.unwrap();
    let id = product.id.expect("create assigns an id");
    assert_eq!(store.all().await.unwrap().len(), 1);

    product.delete(store).await.unwrap();
    assert!(store.all().await.unwrap().is_empty());
    assert_eq!(store.find(id).await.unwrap(), None);
    // The in-memory value survives deletion.
    assert_eq!(product.id, Some(id));
}

pub async fn read_all_products<S: ProductStore + ?Sized>(store: &S) {
    assert!(store.all().await.unwrap().is_empty());
    for mut product in ProductFactory::build_batch(5) {
        product.create(store).await.unwrap();
    }

    let products = store.all().await.unwrap();
    assert_eq!(products.len(), 5);
    let mut ids: Vec<_> = products.iter().filter_map(|p| p.id).collect();
    ids.dedup();
    assert_eq!(ids.len(), 5);
}

pub async fn find_by_name<S: ProductStore + ?Sized>(store: &S) {
    for mut product in ProductFactory::build_batch(5) {
        product.create(store).await.unwrap();
    }
    // Same name twice so the match is not trivially unique.
    let mut twin = ProductFactory::build();
    let all = store.all().await.unwrap();
    twin.name = all[0].name.clone();
    twin.create(store).await.unwrap();

    let all = store.all().await.unwrap();
    let name = all[0].name.clone();
    let expected = all.iter().filter(|p| p.name == name).count();

    let found = store.find_by_name(&name).await.unwrap();
    assert_eq!(found.len(), expected);
    assert!(found.len() >= 2);
    assert!(found.iter().all(|p| p.name == name));

    let shouted = name.to_uppercase();
    if shouted != name {
        assert!(store.find_by_name(&shouted).await.unwrap().is_empty());
    }
}

pub async fn find_by_availability<S: ProductStore + ?Sized>(store: &S) {
    let mut products = ProductFactory::build_batch(10);
    for product in products.iter_mut() {
        product.create(store).await.unwrap();
    }

    let available = products[0].available;
    let expected = products.iter().filter(|p| p.available == available).count();

    let found = store.find_by_availability(available).await.unwrap();
    assert_eq!(found.len(), expected);
    assert!(found.iter().all(|p| p.available == available));

    let others = store.find_by_availability(!available).await.unwrap();
    assert_eq!(found.len() + others.len(), products.len());
}

pub async fn find_by_category<S: ProductStore + ?Sized>(store: &S) {
    let mut products = ProductFactory::build_batch(10);
    for product in products.iter_mut() {
        product.create(store).await.unwrap();
    }

    let category = products[0].category;
    let expected = products.iter().filter(|p| p.category == category).count();

    let found = store.find_by_category(category).await.unwrap();
    assert_eq!(found.len(), expected);
    assert!(found.iter().all(|p| p.category == category));
}

pub async fn find_by_price<S: ProductStore + ?Sized>(store: &S) {
    let mut product = ProductFactory::build();
    product.create(store).await.unwrap();
    let mut other = ProductFactory::build();
    other.price = product.price + Decimal::ONE;
    other.create(store).await.unwrap();

    let found = store.find_by_price(PriceQuery::from(product.price)).await.unwrap();
    assert_eq!(found.iter().filter(|p| p.price == product.price).count(), 1);
    assert_eq!(found.len(), 1);
}

pub async fn find_by_price_string<S: ProductStore + ?Sized>(store: &S) {
    let mut product = ProductFactory::build();
    product.create(store).await.unwrap();

    let text = format!("\"{} \"", product.price);
    let found = store.find_by_price(PriceQuery::from(text)).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, product.id);

    let err = store
        .find_by_price(PriceQuery::from("not a price"))
        .await
        .unwrap_err();
    assert!(err.is_validation());
}

pub async fn fedora_lifecycle<S: ProductStore + ?Sized>(store: &S) {
    let mut fedora = Product::new("Fedora", "A red hat", Decimal::new(1250, 2), true, Category::Cloths);
    fedora.create(store).await.unwrap();

    let found = store.find_by_category(Category::Cloths).await.unwrap();
    assert_eq!(found, vec![fedora.clone()]);

    fedora.delete(store).await.unwrap();
    assert!(store.all().await.unwrap().is_empty());
}

pub async fn deserialize_then_create<S: ProductStore + ?Sized>(store: &S) {
    let data: JsonValue = json!({
        "name": "Wrench",
        "description": "Adjustable",
        "price": "15.75",
        "available": true,
        "category": "TOOLS",
    });

    let mut product = Product::default();
    product.deserialize(&data).unwrap();
    product.create(store).await.unwrap();

    let stored = store.find(product.id.unwrap()).await.unwrap().unwrap();
    let mut echoed = stored.serialize();
    assert_eq!(echoed.remove("id"), Some(json!(product.id.unwrap().get())));
    assert_eq!(echoed.remove("category"), Some(json!("TOOLS")));
    assert_eq!(echoed.remove("available"), Some(json!(true)));
}

pub async fn clear_removes_everything<S: ProductStore + ?Sized>(store: &S) {
    for mut product in ProductFactory::build_batch(3) {
        product.create(store).await.unwrap();
    }
    assert_eq!(store.clear().await.unwrap(), 3);
    assert!(store.all().await.unwrap().is_empty());
}

pub async fn column_limits_are_enforced<S: ProductStore + ?Sized>(store: &S) {
    let mut long_name = ProductFactory::build();
    long_name.name = "x".repeat(MAX_NAME_CHARS + 1);
    let err = long_name.create(store).await.unwrap_err();
    assert!(matches!(err, StoreError::Validation(DataValidationError::TooLong { .. })));

    let mut long_description = ProductFactory::build();
    long_description.description = "d".repeat(MAX_DESCRIPTION_CHARS + 1);
    let err = long_description.create(store).await.unwrap_err();
    assert!(matches!(err, StoreError::Validation(DataValidationError::TooLong { .. })));

    let mut sub_cent = ProductFactory::build();
    sub_cent.price = Decimal::new(1005, 3);
    let err = sub_cent.create(store).await.unwrap_err();
    assert!(matches!(err, StoreError::Validation(DataValidationError::PriceOutOfRange(_))));

    let mut too_large = ProductFactory::build();
    too_large.price = Decimal::new(123_456_789_00, 2);
    let err = too_large.create(store).await.unwrap_err();
    assert!(matches!(err, StoreError::Validation(DataValidationError::PriceOutOfRange(_))));

    assert!(store.all().await.unwrap().is_empty());

    // Values right at the limits round-trip unchanged, and updates are held
    // to the same limits.
    let mut widest = ProductFactory::build();
    widest.name = "x".repeat(MAX_NAME_CHARS);
    widest.description = "d".repeat(MAX_DESCRIPTION_CHARS);
    widest.price = Decimal::new(99_999_999_99, 2);
    widest.create(store).await.unwrap();
    let stored = store.find(widest.id.unwrap()).await.unwrap().unwrap();
    assert_eq!(stored, widest);

    let mut edited = widest.clone();
    edited.price = Decimal::new(1005, 3);
    assert!(edited.update(store).await.unwrap_err().is_validation());
    assert_eq!(store.find(widest.id.unwrap()).await.unwrap().unwrap(), widest);
}
