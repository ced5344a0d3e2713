//! Domain models and wire types.
//!
//! Domain structs are what repositories return; the `*Request` and `*View`
//! types define the JSON contract (camelCase field names throughout).

pub mod address;
pub mod cart;
pub mod order;
pub mod principal;
pub mod profile;

pub use address::{Address, AddressFields, AddressSnapshot};
pub use cart::{AddToCartRequest, CartLine};
pub use order::{CheckoutItem, CheckoutRequest, OrderHeader, OrderItem, OrderItemView, OrderView};
pub use principal::{Principal, session_keys};
pub use profile::{DeletedCounts, Profile};
