//! Sales report page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Extension, extract::State};
use chrono::Utc;
use tower_sessions::Session;

use crate::domain::entities::{BestCategory, BestSeller, MonthlyRevenue, SalesReport};
use crate::error::AppError;
use crate::state::AppState;
use crate::web::flash::{self, FlashLevel, FlashMessage};
use crate::web::handlers::dashboard::{LowStockRow, currency};
use crate::web::page::PageChrome;
use crate::web::session::CurrentUser;

fn growth(value: f64) -> String {
    format!("{:+.1}%", value)
}

pub struct RankedRow {
    pub rank: usize,
    pub name: String,
    pub detail: String,
    pub turnover: String,
    pub growth: String,
    pub growing: bool,
}

fn seller_rows(sellers: &[BestSeller]) -> Vec<RankedRow> {
    sellers
        .iter()
        .enumerate()
        .map(|(i, s)| RankedRow {
            rank: i + 1,
            name: s.name.clone(),
            detail: format!("{} · {} sold", s.category, s.units_sold),
            turnover: currency(s.turnover),
            growth: growth(s.growth),
            growing: s.growth >= 0.0,
        })
        .collect()
}

fn category_rows(categories: &[BestCategory]) -> Vec<RankedRow> {
    categories
        .iter()
        .enumerate()
        .map(|(i, c)| RankedRow {
            rank: i + 1,
            name: c.category.clone(),
            detail: String::new(),
            turnover: currency(c.turnover),
            growth: growth(c.growth),
            growing: c.growth >= 0.0,
        })
        .collect()
}

pub struct MonthRow {
    pub label: String,
    pub revenue: String,
    pub profit: String,
    /// Bar height relative to the best month, 0..=100.
    pub height: u8,
}

fn month_rows(months: &[MonthlyRevenue]) -> Vec<MonthRow> {
    let peak = months.iter().map(|m| m.revenue).fold(0.0_f64, f64::max);

    months
        .iter()
        .map(|m| MonthRow {
            label: m.month.format("%b %Y").to_string(),
            revenue: currency(m.revenue),
            profit: currency(m.profit),
            height: if peak > 0.0 {
                (m.revenue / peak * 100.0).round().clamp(0.0, 100.0) as u8
            } else {
                0
            },
        })
        .collect()
}

#[derive(Template, WebTemplate)]
#[template(path = "report.html")]
pub struct ReportTemplate {
    messages: Vec<FlashMessage>,
    chrome: PageChrome,
    report_id: String,
    reference: String,
    report_date: String,
    sales_today: String,
    sales_week: String,
    sales_month: String,
    best_sellers: Vec<RankedRow>,
    best_categories: Vec<RankedRow>,
    low_stock: Vec<LowStockRow>,
    months: Vec<MonthRow>,
}

impl ReportTemplate {
    fn build(chrome: PageChrome, report: &SalesReport, messages: Vec<FlashMessage>) -> Self {
        Self {
            messages,
            chrome,
            report_id: report.report_id(),
            reference: report.reference(),
            report_date: report.report_date(),
            sales_today: currency(report.totals.today),
            sales_week: currency(report.totals.week),
            sales_month: currency(report.totals.month),
            best_sellers: seller_rows(&report.best_sellers),
            best_categories: category_rows(&report.best_categories),
            low_stock: report.low_stock.iter().map(LowStockRow::from).collect(),
            months: month_rows(&report.revenue_trend),
        }
    }
}

/// Renders the sales report.
///
/// # Endpoint
///
/// `GET /report`
///
/// Requires the `view_reports` permission. When a report query fails the
/// page still renders with empty figures and an error message.
pub async fn report_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    session: Session,
) -> Result<ReportTemplate, AppError> {
    let report = match state.report_service.report().await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!(email = %user.email, "Failed to load report: {}", e);
            flash::push(&session, FlashLevel::Error, "Error loading report data.").await?;
            SalesReport::empty(Utc::now())
        }
    };

    let chrome = PageChrome::load(&state, &user, &session, "report").await?;
    let messages = flash::take(&session).await?;

    Ok(ReportTemplate::build(chrome, &report, messages))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Role;
    use chrono::{NaiveDate, TimeZone};

    #[test]
    fn test_month_heights_scale_to_best_month() {
        let months = vec![
            MonthlyRevenue::new(NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(), 0.0),
            MonthlyRevenue::new(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(), 400.0),
            MonthlyRevenue::new(NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(), 100.0),
        ];

        let rows = month_rows(&months);

        assert_eq!(rows[0].height, 0);
        assert_eq!(rows[1].height, 100);
        assert_eq!(rows[2].height, 25);
        assert_eq!(rows[1].label, "Mar 2025");
    }

    #[test]
    fn test_empty_report_renders_metadata() {
        let user = CurrentUser {
            user_id: "u1".to_string(),
            email: "boss@example.com".to_string(),
            access_token: "token".to_string(),
        };
        let chrome = PageChrome::new(&user, Some(Role::Manager), "form-token".to_string(), "report");
        let report = SalesReport::empty(Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap());

        let html = ReportTemplate::build(chrome, &report, vec![]).render().unwrap();

        assert!(html.contains("AB0325-01"));
        assert!(html.contains("INV-069"));
        assert!(html.contains("10 March, 2025"));
        assert!(html.contains(r#"class="badge">Manager<"#));
        assert!(html.contains("No sales this month."));
    }
}
