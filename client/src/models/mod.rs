// client/src/models/mod.rs

//! Wire records exchanged with the marketplace backend.

pub mod cart_line;
pub mod complaint;
pub mod de;
pub mod delivery;
pub mod item;
pub mod order;
pub mod price;
pub mod review;
pub mod user;

pub use cart_line::{CartLine, NewCartLine, QuantityUpdate};
pub use complaint::Complaint;
pub use delivery::{Delivery, DeliveryConfirmation, DeliveryStatusUpdate, NewDelivery};
pub use item::Item;
pub use order::{Order, OrderStatus, OrderTaken};
pub use price::Price;
pub use review::{NewReview, Review};
pub use user::{Address, AddressEnvelope, ProfileUpdate, SellerRecord, UserProfile, UserType};
