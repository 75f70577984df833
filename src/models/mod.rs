pub mod visit;

pub use visit::{NewVisit, Visit, UNKNOWN_IP};
