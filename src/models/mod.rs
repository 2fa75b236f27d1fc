pub mod card;
pub mod outcome;
pub mod page;
pub mod popularity;

pub use card::*;
pub use outcome::*;
pub use page::*;
pub use popularity::*;
