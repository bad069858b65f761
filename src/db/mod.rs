pub mod overview_queries;
