pub mod parser;
pub mod report;
pub mod session;
pub mod wizard;

// Re-export common items
pub use parser::{load_scenarios, OptionTag, ScenarioRecord};
pub use session::WalkthroughSession;
pub use wizard::WizardServer;
