mod base;
mod product;
mod product_parser;
pub mod selectors;

#[cfg(test)]
mod tests;

pub use base::Parser;
pub use product::ProductRecord;
pub use product_parser::ProductParser;
pub use selectors::{ProductSelectors, SelectorConfig};
