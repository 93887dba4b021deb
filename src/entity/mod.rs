pub mod favorites;

pub use favorites::Entity as Favorites;
