use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// Company fundamentals as reported by the provider's OVERVIEW function.
// Numeric values stay as the provider formats them ("None" and "-" included);
// nothing here does arithmetic on them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Overview {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(alias = "Symbol")]
    pub symbol: Option<String>,
    #[serde(alias = "AssetType")]
    pub asset_type: Option<String>,
    #[serde(alias = "Name")]
    pub name: Option<String>,
    #[serde(alias = "Description")]
    pub description: Option<String>,
    #[serde(alias = "CIK")]
    pub cik: Option<String>,
    #[serde(alias = "Exchange")]
    pub exchange: Option<String>,
    #[serde(alias = "Currency")]
    pub currency: Option<String>,
    #[serde(alias = "Country")]
    pub country: Option<String>,
    #[serde(alias = "Sector")]
    pub sector: Option<String>,
    #[serde(alias = "Industry")]
    pub industry: Option<String>,
    #[serde(alias = "Address")]
    pub address: Option<String>,
    #[serde(alias = "FiscalYearEnd")]
    pub fiscal_year_end: Option<String>,
    #[serde(alias = "LatestQuarter")]
    pub latest_quarter: Option<String>,
    #[serde(alias = "MarketCapitalization")]
    pub market_capitalization: Option<String>,
    #[serde(alias = "EBITDA")]
    pub ebitda: Option<String>,
    #[serde(alias = "PERatio")]
    pub pe_ratio: Option<String>,
    #[serde(alias = "PEGRatio")]
    pub peg_ratio: Option<String>,
    #[serde(alias = "BookValue")]
    pub book_value: Option<String>,
    #[serde(alias = "DividendPerShare")]
    pub dividend_per_share: Option<String>,
    #[serde(alias = "DividendYield")]
    pub dividend_yield: Option<String>,
    #[serde(alias = "EPS")]
    pub eps: Option<String>,
    #[serde(alias = "RevenuePerShareTTM")]
    pub revenue_per_share_ttm: Option<String>,
    #[serde(alias = "ProfitMargin")]
    pub profit_margin: Option<String>,
    #[serde(alias = "OperatingMarginTTM")]
    pub operating_margin_ttm: Option<String>,
    #[serde(alias = "ReturnOnAssetsTTM")]
    pub return_on_assets_ttm: Option<String>,
    #[serde(alias = "ReturnOnEquityTTM")]
    pub return_on_equity_ttm: Option<String>,
    #[serde(alias = "RevenueTTM")]
    pub revenue_ttm: Option<String>,
    #[serde(alias = "GrossProfitTTM")]
    pub gross_profit_ttm: Option<String>,
    #[serde(alias = "DilutedEPSTTM")]
    pub diluted_eps_ttm: Option<String>,
    #[serde(alias = "QuarterlyEarningsGrowthYOY")]
    pub quarterly_earnings_growth_yoy: Option<String>,
    #[serde(alias = "QuarterlyRevenueGrowthYOY")]
    pub quarterly_revenue_growth_yoy: Option<String>,
    #[serde(alias = "AnalystTargetPrice")]
    pub analyst_target_price: Option<String>,
    #[serde(alias = "TrailingPE")]
    pub trailing_pe: Option<String>,
    #[serde(alias = "ForwardPE")]
    pub forward_pe: Option<String>,
    #[serde(alias = "PriceToSalesRatioTTM")]
    pub price_to_sales_ratio_ttm: Option<String>,
    #[serde(alias = "PriceToBookRatio")]
    pub price_to_book_ratio: Option<String>,
    #[serde(alias = "EVToRevenue")]
    pub ev_to_revenue: Option<String>,
    #[serde(alias = "EVToEBITDA")]
    pub ev_to_ebitda: Option<String>,
    #[serde(alias = "Beta")]
    pub beta: Option<String>,
    #[serde(alias = "52WeekHigh")]
    pub week_52_high: Option<String>,
    #[serde(alias = "52WeekLow")]
    pub week_52_low: Option<String>,
    #[serde(alias = "50DayMovingAverage")]
    pub day_50_moving_average: Option<String>,
    #[serde(alias = "200DayMovingAverage")]
    pub day_200_moving_average: Option<String>,
    #[serde(alias = "SharesOutstanding")]
    pub shares_outstanding: Option<String>,
    #[serde(alias = "DividendDate")]
    pub dividend_date: Option<String>,
    #[serde(alias = "ExDividendDate")]
    pub ex_dividend_date: Option<String>,
}

impl Overview {
    /// The provider answers unknown symbols with `{}` rather than an error,
    /// so a record without a symbol carries no data.
    pub fn is_empty(&self) -> bool {
        self.symbol
            .as_deref()
            .map(|s| s.trim().is_empty())
            .unwrap_or(true)
    }

    /// Same record without the store-generated id.
    pub fn without_id(&self) -> Self {
        Self { id: None, ..self.clone() }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteAllResult {
    pub deleted: i64,
    pub message: String,
}
