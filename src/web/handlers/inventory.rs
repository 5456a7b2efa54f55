//! Inventory page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Extension,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use url::form_urlencoded;

use crate::domain::entities::{CategoryCount, InventoryFilter, Product};
use crate::error::AppError;
use crate::state::AppState;
use crate::web::flash::{self, FlashLevel, FlashMessage};
use crate::web::handlers::dashboard::currency;
use crate::web::page::PageChrome;
use crate::web::session::CurrentUser;

#[derive(Debug, Deserialize, Default)]
pub struct InventoryQuery {
    pub category: Option<String>,
    pub search: Option<String>,
}

/// `/inventory` link keeping the search term.
fn inventory_href(category: Option<&str>, search: Option<&str>) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    if let Some(category) = category {
        query.append_pair("category", category);
    }
    if let Some(search) = search {
        query.append_pair("search", search);
    }

    let query = query.finish();
    if query.is_empty() {
        "/inventory".to_string()
    } else {
        format!("/inventory?{query}")
    }
}

pub struct CategoryTab {
    pub label: String,
    pub products: i64,
    pub href: String,
    pub active: bool,
}

pub struct ProductRow {
    pub product_id: String,
    pub name: String,
    pub category: String,
    pub price: String,
    pub stock: String,
    pub unit: String,
    pub status_label: &'static str,
    pub status_class: &'static str,
}

impl From<&Product> for ProductRow {
    fn from(p: &Product) -> Self {
        let status = p.status();
        Self {
            product_id: p.product_id.clone(),
            name: p.name.clone(),
            category: p.category.clone(),
            price: currency(p.price),
            stock: format!("{}/{}", p.current_stock, p.max_stock),
            unit: p.unit.clone(),
            status_label: status.label(),
            status_class: status.as_str(),
        }
    }
}

#[derive(Template, WebTemplate)]
#[template(path = "inventory.html")]
pub struct InventoryTemplate {
    messages: Vec<FlashMessage>,
    chrome: PageChrome,
    all_href: String,
    all_active: bool,
    total_products: i64,
    tabs: Vec<CategoryTab>,
    category: String,
    search: String,
    products: Vec<ProductRow>,
}

impl InventoryTemplate {
    fn build(
        chrome: PageChrome,
        filter: &InventoryFilter,
        categories: &[CategoryCount],
        products: &[Product],
        total_products: i64,
        messages: Vec<FlashMessage>,
    ) -> Self {
        let search = filter.search.as_deref();

        let tabs = categories
            .iter()
            .map(|c| CategoryTab {
                label: c.category.clone(),
                products: c.products,
                href: inventory_href(Some(&c.category), search),
                active: filter.category.as_deref() == Some(c.category.as_str()),
            })
            .collect();

        Self {
            messages,
            chrome,
            all_href: inventory_href(None, search),
            all_active: filter.category.is_none(),
            total_products,
            tabs,
            category: filter.category.clone().unwrap_or_default(),
            search: search.unwrap_or_default().to_string(),
            products: products.iter().map(ProductRow::from).collect(),
        }
    }
}

/// Lists the product catalogue with category tabs and a search box.
///
/// # Endpoint
///
/// `GET /inventory?category=<name>&search=<term>`
///
/// Requires the `view_inventory` permission. When the catalogue query fails
/// the user is sent back to `/dashboard` with an error message.
pub async fn inventory_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    session: Session,
    Query(query): Query<InventoryQuery>,
) -> Result<Response, AppError> {
    let filter = InventoryFilter::new(query.category, query.search);

    let listing = match state.inventory_service.listing(&filter).await {
        Ok(listing) => listing,
        Err(e) => {
            tracing::error!(email = %user.email, "Failed to load inventory: {}", e);
            flash::push(&session, FlashLevel::Error, "Error loading inventory data.").await?;
            return Ok(Redirect::to("/dashboard").into_response());
        }
    };

    let chrome = PageChrome::load(&state, &user, &session, "inventory").await?;
    let messages = flash::take(&session).await?;

    Ok(InventoryTemplate::build(
        chrome,
        &filter,
        &listing.categories,
        &listing.products,
        listing.total_products,
        messages,
    )
    .into_response())
}
