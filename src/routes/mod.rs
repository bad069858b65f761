pub(crate) mod health;
pub(crate) mod overview;
pub(crate) mod root;
