//! Agent configuration domain: typed model, output schema, instruction.

mod instruction;
mod model;
mod schema;
mod section;

pub use instruction::SYSTEM_INSTRUCTION;
pub use model::*;
pub use schema::agent_configuration_schema;
pub use section::ConfigurationSection;
