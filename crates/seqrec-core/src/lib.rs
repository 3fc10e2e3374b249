pub mod feature;
pub mod record;

pub use feature::*;
pub use record::*;
