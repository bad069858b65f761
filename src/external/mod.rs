pub mod alphavantage;
pub mod overview_provider;
