mod overview;

pub use overview::{DeleteAllResult, Overview};
