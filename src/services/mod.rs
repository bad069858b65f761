pub mod overview_service;
