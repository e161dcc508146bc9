pub mod campaign;
pub mod category;
pub mod coupon;
pub mod customer;
pub mod de;
pub mod entity;
pub mod envelope;
pub mod inventory;
pub mod order;
pub mod params;
pub mod payment;
pub mod product;
pub mod resource;
pub mod review;
pub mod role;
pub mod staff;
pub mod tenant;

pub use entity::{Entity, Reference};
pub use envelope::{DecodeError, Page};
pub use params::ListParams;
pub use resource::{FilterMode, Resource};
