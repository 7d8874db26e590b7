//! Print the configuration model as JSON Schema, next to the schema that is
//! actually sent to the provider.

use blueprint::schemars::schema_for;
use blueprint::{agent_configuration_schema, AgentConfiguration, SchemaDialect};

fn main() -> Result<(), serde_json::Error> {
    let derived = schema_for!(AgentConfiguration);
    println!("// Derived from the Rust model");
    println!("{}", serde_json::to_string_pretty(&derived)?);

    println!("\n// Sent with each request (Gemini dialect)");
    println!(
        "{}",
        serde_json::to_string_pretty(
            &agent_configuration_schema().to_value(SchemaDialect::Gemini)
        )?
    );

    Ok(())
}
