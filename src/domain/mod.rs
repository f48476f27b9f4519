pub mod category;
pub mod record;

pub use category::{Category, classify};
pub use record::{CanonicalRecord, Center, OsmId, RawRecord, Tags};
