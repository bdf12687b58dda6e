//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod shopping_cart_command;
mod shopping_cart_repository;
mod shopping_list_query;
mod short_link_command;
mod short_link_query;
mod short_link_repository;

#[cfg(test)]
pub use shopping_cart_command::MockShoppingCartCommand;
pub use shopping_cart_command::ShoppingCartCommand;
#[cfg(test)]
pub use shopping_cart_repository::MockShoppingCartRepository;
pub use shopping_cart_repository::{
    CartInsertOutcome, ShoppingCartRepository, ShoppingCartRepositoryError,
};
#[cfg(test)]
pub use shopping_list_query::MockShoppingListQuery;
pub use shopping_list_query::ShoppingListQuery;
#[cfg(test)]
pub use short_link_command::MockShortLinkCommand;
pub use short_link_command::ShortLinkCommand;
#[cfg(test)]
pub use short_link_query::MockShortLinkQuery;
pub use short_link_query::ShortLinkQuery;
#[cfg(test)]
pub use short_link_repository::MockShortLinkRepository;
pub use short_link_repository::{
    ShortLinkInsertOutcome, ShortLinkRepository, ShortLinkRepositoryError,
};
