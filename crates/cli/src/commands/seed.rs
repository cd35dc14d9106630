//! Seed the database with a small sample catalogue.
//!
//! Everything goes through the API repositories, so the seeded rows look
//! exactly like rows created over HTTP.

use chrono::NaiveDate;
use secrecy::SecretString;
use tracing::info;

use online_shop_api::db::{
    self, AddressRepository, CategoryRepository, CustomerRepository, ProductRepository,
    Repository, WishListRepository,
};
use online_shop_api::models::{Address, Category, Customer, Product, WishList};
use online_shop_core::CategoryStatus;

use super::CommandError;

/// Number of rows inserted per table.
#[derive(Debug, Default, Clone, Copy)]
pub struct SeedSummary {
    pub customers: usize,
    pub products: usize,
    pub categories: usize,
}

/// Insert the sample catalogue.
///
/// # Errors
///
/// Returns `CommandError` if the database is unreachable or an insert fails.
pub async fn run(database_url: &SecretString) -> Result<SeedSummary, CommandError> {
    info!("Connecting to database...");
    let pool = db::create_pool(database_url).await?;

    let customers = CustomerRepository::new(pool.clone());
    let addresses = AddressRepository::new(pool.clone());
    let wish_lists = WishListRepository::new(pool.clone());
    let products = ProductRepository::new(pool.clone());
    let categories = CategoryRepository::new(pool);

    let mut summary = SeedSummary::default();
    let added = NaiveDate::from_ymd_opt(2026, 1, 15);

    let customer = customers
        .save(Customer {
            first_name: Some("Ada".to_owned()),
            last_name: Some("Lovelace".to_owned()),
            email: Some("ada@example.com".to_owned()),
            telephone: Some("+44 20 7946 0000".to_owned()),
            ..Customer::default()
        })
        .await?;
    summary.customers += 1;
    let owner = Customer::from_id(customer.id).map(Box::new);

    addresses
        .save(Address {
            address1: Some("12 St James's Square".to_owned()),
            city: Some("London".to_owned()),
            postcode: Some("SW1Y 4JH".to_owned()),
            country: Some("GB".to_owned()),
            customer: owner.clone(),
            ..Address::default()
        })
        .await?;

    let wish_list = wish_lists
        .save(WishList {
            title: Some("Birthday".to_owned()),
            restricted: Some(false),
            customer: owner,
            ..WishList::default()
        })
        .await?;
    let on_wish_list = WishList::from_id(wish_list.id).map(Box::new);

    let mut catalogue = Vec::new();
    for (title, rating) in [("Brass telescope", 5), ("Difference engine kit", 4)] {
        let product = products
            .save(Product {
                title: Some(title.to_owned()),
                rating: Some(rating),
                date_added: added,
                wish_list: on_wish_list.clone(),
                ..Product::default()
            })
            .await?;
        summary.products += 1;
        catalogue.push(product);
    }

    let parent = categories
        .save(Category {
            description: Some("Science".to_owned()),
            sort_order: Some(1),
            date_added: added,
            status: Some(CategoryStatus::Available),
            ..Category::default()
        })
        .await?;
    summary.categories += 1;

    categories
        .save(Category {
            description: Some("Instruments".to_owned()),
            sort_order: Some(2),
            date_added: added,
            status: Some(CategoryStatus::Available),
            parent: Category::from_id(parent.id).map(Box::new),
            products: catalogue,
            ..Category::default()
        })
        .await?;
    summary.categories += 1;

    info!(?summary, "Seed complete");
    Ok(summary)
}
