use sqlx::PgPool;
use crate::models::Overview;

const SELECT_OVERVIEW: &str = "SELECT id, symbol, asset_type, name, description, cik, exchange,
        currency, country, sector, industry, address, fiscal_year_end, latest_quarter,
        market_capitalization, ebitda, pe_ratio, peg_ratio, book_value, dividend_per_share,
        dividend_yield, eps, revenue_per_share_ttm, profit_margin, operating_margin_ttm,
        return_on_assets_ttm, return_on_equity_ttm, revenue_ttm, gross_profit_ttm,
        diluted_eps_ttm, quarterly_earnings_growth_yoy, quarterly_revenue_growth_yoy,
        analyst_target_price, trailing_pe, forward_pe, price_to_sales_ratio_ttm,
        price_to_book_ratio, ev_to_revenue, ev_to_ebitda, beta, week_52_high, week_52_low,
        day_50_moving_average, day_200_moving_average, shares_outstanding, dividend_date,
        ex_dividend_date
    FROM overviews";

pub async fn fetch_all(pool: &PgPool) -> Result<Vec<Overview>, sqlx::Error> {
    sqlx::query_as::<_, Overview>(&format!("{} ORDER BY id", SELECT_OVERVIEW))
        .fetch_all(pool)
        .await
}

pub async fn fetch_one(pool: &PgPool, id: i64) -> Result<Option<Overview>, sqlx::Error> {
    sqlx::query_as::<_, Overview>(&format!("{} WHERE id = $1", SELECT_OVERVIEW))
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn fetch_by_symbol(pool: &PgPool, symbol: &str) -> Result<Option<Overview>, sqlx::Error> {
    sqlx::query_as::<_, Overview>(&format!("{} WHERE symbol = $1", SELECT_OVERVIEW))
        .bind(symbol)
        .fetch_optional(pool)
        .await
}

// Names are not unique in the table; the lowest id wins.
pub async fn fetch_by_name(pool: &PgPool, name: &str) -> Result<Option<Overview>, sqlx::Error> {
    sqlx::query_as::<_, Overview>(&format!("{} WHERE name = $1 ORDER BY id LIMIT 1", SELECT_OVERVIEW))
        .bind(name)
        .fetch_optional(pool)
        .await
}

pub async fn fetch_by_exchange(pool: &PgPool, exchange: &str) -> Result<Vec<Overview>, sqlx::Error> {
    sqlx::query_as::<_, Overview>(&format!("{} WHERE exchange = $1 ORDER BY id", SELECT_OVERVIEW))
        .bind(exchange)
        .fetch_all(pool)
        .await
}

pub async fn fetch_by_sector(pool: &PgPool, sector: &str) -> Result<Vec<Overview>, sqlx::Error> {
    sqlx::query_as::<_, Overview>(&format!("{} WHERE sector = $1 ORDER BY id", SELECT_OVERVIEW))
        .bind(sector)
        .fetch_all(pool)
        .await
}

pub async fn fetch_by_country(pool: &PgPool, country: &str) -> Result<Vec<Overview>, sqlx::Error> {
    sqlx::query_as::<_, Overview>(&format!("{} WHERE country = $1 ORDER BY id", SELECT_OVERVIEW))
        .bind(country)
        .fetch_all(pool)
        .await
}

pub async fn fetch_by_currency(pool: &PgPool, currency: &str) -> Result<Vec<Overview>, sqlx::Error> {
    sqlx::query_as::<_, Overview>(&format!("{} WHERE currency = $1 ORDER BY id", SELECT_OVERVIEW))
        .bind(currency)
        .fetch_all(pool)
        .await
}

pub async fn insert(pool: &PgPool, input: Overview) -> Result<Overview, sqlx::Error> {
    sqlx::query_as::<_, Overview>(
        "INSERT INTO overviews (symbol, asset_type, name, description, cik, exchange,
            currency, country, sector, industry, address, fiscal_year_end, latest_quarter,
            market_capitalization, ebitda, pe_ratio, peg_ratio, book_value, dividend_per_share,
            dividend_yield, eps, revenue_per_share_ttm, profit_margin, operating_margin_ttm,
            return_on_assets_ttm, return_on_equity_ttm, revenue_ttm, gross_profit_ttm,
            diluted_eps_ttm, quarterly_earnings_growth_yoy, quarterly_revenue_growth_yoy,
            analyst_target_price, trailing_pe, forward_pe, price_to_sales_ratio_ttm,
            price_to_book_ratio, ev_to_revenue, ev_to_ebitda, beta, week_52_high, week_52_low,
            day_50_moving_average, day_200_moving_average, shares_outstanding, dividend_date,
            ex_dividend_date)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16,
            $17, $18, $19, $20, $21, $22, $23, $24, $25, $26, $27, $28, $29, $30, $31,
            $32, $33, $34, $35, $36, $37, $38, $39, $40, $41, $42, $43, $44, $45, $46)
        RETURNING *",
    )
    .bind(input.symbol)
    .bind(input.asset_type)
    .bind(input.name)
    .bind(input.description)
    .bind(input.cik)
    .bind(input.exchange)
    .bind(input.currency)
    .bind(input.country)
    .bind(input.sector)
    .bind(input.industry)
    .bind(input.address)
    .bind(input.fiscal_year_end)
    .bind(input.latest_quarter)
    .bind(input.market_capitalization)
    .bind(input.ebitda)
    .bind(input.pe_ratio)
    .bind(input.peg_ratio)
    .bind(input.book_value)
    .bind(input.dividend_per_share)
    .bind(input.dividend_yield)
    .bind(input.eps)
    .bind(input.revenue_per_share_ttm)
    .bind(input.profit_margin)
    .bind(input.operating_margin_ttm)
    .bind(input.return_on_assets_ttm)
    .bind(input.return_on_equity_ttm)
    .bind(input.revenue_ttm)
    .bind(input.gross_profit_ttm)
    .bind(input.diluted_eps_ttm)
    .bind(input.quarterly_earnings_growth_yoy)
    .bind(input.quarterly_revenue_growth_yoy)
    .bind(input.analyst_target_price)
    .bind(input.trailing_pe)
    .bind(input.forward_pe)
    .bind(input.price_to_sales_ratio_ttm)
    .bind(input.price_to_book_ratio)
    .bind(input.ev_to_revenue)
    .bind(input.ev_to_ebitda)
    .bind(input.beta)
    .bind(input.week_52_high)
    .bind(input.week_52_low)
    .bind(input.day_50_moving_average)
    .bind(input.day_200_moving_average)
    .bind(input.shares_outstanding)
    .bind(input.dividend_date)
    .bind(input.ex_dividend_date)
    .fetch_one(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: i64) -> Result<Option<Overview>, sqlx::Error> {
    sqlx::query_as::<_, Overview>("DELETE FROM overviews WHERE id = $1 RETURNING *")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn delete_all(pool: &PgPool) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM overviews")
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM overviews")
        .fetch_one(pool)
        .await?;
    Ok(count)
}
