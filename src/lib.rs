pub mod diff;
pub mod encode;
pub mod model;
pub mod resolve;
pub mod scenario;
pub mod session;
pub mod store;
pub mod web;

pub use model::{FilterSet, Position, Settlement, SettlementId, Tier};
pub use scenario::{Scenario, ScenarioLoader};
pub use session::{MapError, MapFrame, MapSession, Marker, Selection};
