pub mod catalog;
pub mod error;
pub mod model;
pub mod seed;
pub mod simulator;

pub use catalog::Catalog;
pub use error::{HealthError, Result};
pub use model::*;
pub use simulator::{CaseChange, ReportingSimulator, SimulatorSettings, SubmitOutcome, TickSummary};
