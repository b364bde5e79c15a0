//! Listing queries: filters, paging and sort order.

mod filter;
mod page;

pub use filter::{BoolField, EnumValue, NumericField, PlayerFilter, PlayerPredicate, TextField};
pub use page::{
    PageRequest, PlayerOrder, DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, ORDER_KEY, PAGE_NUMBER_KEY,
    PAGE_SIZE_KEY,
};
