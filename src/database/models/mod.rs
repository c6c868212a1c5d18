pub mod country;
pub mod grape;
pub mod producer;
pub mod region;
pub mod user;
pub mod wine;
pub mod wine_type;

pub use country::Country;
pub use grape::{Grape, NewGrape};
pub use producer::{NewProducer, Producer};
pub use region::{NewRegion, Region};
pub use user::{NewUser, User};
pub use wine::{NewWine, Wine};
pub use wine_type::WineType;
