//! Dashboard page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Extension, extract::State};
use tower_sessions::Session;

use crate::domain::entities::{
    Comparison, DashboardMetrics, StockedProduct, Transaction, TrendPoint,
};
use crate::error::AppError;
use crate::state::AppState;
use crate::web::flash::{self, FlashLevel, FlashMessage};
use crate::web::page::PageChrome;
use crate::web::session::CurrentUser;

/// Low-stock table row.
pub struct LowStockRow {
    pub name: String,
    pub category: String,
    pub stock: String,
    pub unit: String,
    pub status_label: &'static str,
    pub status_class: &'static str,
}

impl From<&StockedProduct> for LowStockRow {
    fn from(p: &StockedProduct) -> Self {
        let status = p.status();
        Self {
            name: p.name.clone(),
            category: p.category.clone(),
            stock: p.stock_display(),
            unit: p.unit.clone(),
            status_label: status.label(),
            status_class: status.as_str(),
        }
    }
}

/// Recent transactions table row.
pub struct TransactionRow {
    pub sale_id: String,
    pub date: String,
    pub amount: String,
    pub payment_method: String,
    pub status: String,
}

impl From<&Transaction> for TransactionRow {
    fn from(t: &Transaction) -> Self {
        Self {
            sale_id: t.sale_id.clone(),
            date: t.sales_date.format("%d %b %Y, %H:%M").to_string(),
            amount: currency(t.total_amount),
            payment_method: t.payment_method.clone(),
            status: t.status.clone(),
        }
    }
}

/// One bar of the sales trend.
pub struct TrendRow {
    pub label: String,
    pub amount: String,
    /// Bar height relative to the best day, 0..=100.
    pub height: u8,
}

pub(crate) fn currency(amount: f64) -> String {
    format!("RM {:.2}", amount)
}

fn change<T>(comparison: &Comparison<T>) -> String {
    format!("{:+.1}%", comparison.percentage)
}

fn trend_rows(points: &[TrendPoint]) -> Vec<TrendRow> {
    let peak = points.iter().map(|p| p.amount).fold(0.0_f64, f64::max);

    points
        .iter()
        .map(|p| TrendRow {
            label: p.date.format("%a %d").to_string(),
            amount: currency(p.amount),
            height: if peak > 0.0 {
                (p.amount / peak * 100.0).round().clamp(0.0, 100.0) as u8
            } else {
                0
            },
        })
        .collect()
}

#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    messages: Vec<FlashMessage>,
    chrome: PageChrome,
    show_employee_stats: bool,
    sales_today: String,
    sales_yesterday: String,
    sales_change: String,
    sales_positive: bool,
    items_today: i32,
    items_change: String,
    items_positive: bool,
    employees_active: i64,
    employees_total: i64,
    employees_percentage: String,
    low_stock: Vec<LowStockRow>,
    transactions: Vec<TransactionRow>,
    trend: Vec<TrendRow>,
}

impl DashboardTemplate {
    fn build(chrome: PageChrome, metrics: &DashboardMetrics, messages: Vec<FlashMessage>) -> Self {
        Self {
            messages,
            show_employee_stats: chrome.permissions.view_employee_stats,
            chrome,
            sales_today: currency(metrics.sales.today),
            sales_yesterday: currency(metrics.sales.yesterday),
            sales_change: change(&metrics.sales),
            sales_positive: metrics.sales.is_positive,
            items_today: metrics.items.today,
            items_change: change(&metrics.items),
            items_positive: metrics.items.is_positive,
            employees_active: metrics.employees.active,
            employees_total: metrics.employees.total,
            employees_percentage: format!("{:.1}%", metrics.employees.percentage),
            low_stock: metrics.low_stock.iter().map(LowStockRow::from).collect(),
            transactions: metrics
                .recent_transactions
                .iter()
                .map(TransactionRow::from)
                .collect(),
            trend: trend_rows(&metrics.sales_trend),
        }
    }
}

/// Renders the dashboard for the signed-in user.
///
/// # Endpoint
///
/// `GET /dashboard`
///
/// Guarded by [`crate::web::middleware::web_auth`]. When the metrics query
/// fails the page still renders with zeroed figures and an error message.
pub async fn dashboard_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    session: Session,
) -> Result<DashboardTemplate, AppError> {
    let chrome = PageChrome::load(&state, &user, &session, "dashboard").await?;

    let metrics = match state.dashboard_service.metrics().await {
        Ok(metrics) => metrics,
        Err(e) => {
            tracing::error!(email = %user.email, "Failed to load dashboard metrics: {}", e);
            flash::push(&session, FlashLevel::Error, "Error loading dashboard data.").await?;
            DashboardMetrics::default()
        }
    };

    let messages = flash::take(&session).await?;

    Ok(DashboardTemplate::build(chrome, &metrics, messages))
}
