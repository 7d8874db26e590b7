//! The fixed output schema for agent configurations.

use crate::schema::{ObjectSchema, SchemaNode};
use once_cell::sync::Lazy;

static AGENT_CONFIGURATION_SCHEMA: Lazy<SchemaNode> = Lazy::new(build);

/// Schema every generated [`AgentConfiguration`](super::AgentConfiguration) must satisfy.
pub fn agent_configuration_schema() -> &'static SchemaNode {
    &AGENT_CONFIGURATION_SCHEMA
}

fn build() -> SchemaNode {
    ObjectSchema::new()
        .property(
            "agent_creation_id",
            SchemaNode::string().describe("A unique identifier for the agent creation job."),
        )
        .property("goal_analysis", goal_analysis())
        .property("agent_architecture", agent_architecture())
        .property("deployment_config", deployment_config())
        .property("generated_code", generated_code())
        .property("monitoring_setup", monitoring_setup())
        .property("performance_predictions", performance_predictions())
        .required([
            "agent_creation_id",
            "goal_analysis",
            "agent_architecture",
            "deployment_config",
            "generated_code",
            "monitoring_setup",
            "performance_predictions",
        ])
        .into()
}

fn goal_analysis() -> ObjectSchema {
    let parsed_requirements = ObjectSchema::new()
        .property("primary_tasks", SchemaNode::string_array())
        .property("data_sources", SchemaNode::string_array())
        .property("output_format", SchemaNode::string())
        .property("complexity_score", SchemaNode::number())
        .property("estimated_runtime", SchemaNode::string())
        .required([
            "primary_tasks",
            "data_sources",
            "output_format",
            "complexity_score",
            "estimated_runtime",
        ]);

    let resource_requirements = ObjectSchema::new()
        .property("cpu_cores", SchemaNode::integer())
        .property("memory_gb", SchemaNode::integer())
        .property("storage_gb", SchemaNode::integer())
        .property("network_bandwidth", SchemaNode::string())
        .required(["cpu_cores", "memory_gb", "storage_gb", "network_bandwidth"]);

    ObjectSchema::new()
        .property("original_goal", SchemaNode::string())
        .property("parsed_requirements", parsed_requirements)
        .property("resource_requirements", resource_requirements)
        .required(["original_goal", "parsed_requirements", "resource_requirements"])
}

// Tool `config` and task-loop `schedule` are free-form objects. Providers
// reject object nodes without properties, so both are left out of the schema
// and described to the model by the system instruction instead.
fn agent_architecture() -> ObjectSchema {
    let memory_component = ObjectSchema::new()
        .property("type", SchemaNode::string())
        .property("purpose", SchemaNode::string())
        .property("size_limit", SchemaNode::string())
        .property("retention_days", SchemaNode::integer())
        .required(["type", "purpose"]);

    let memory_system = ObjectSchema::new()
        .property("type", SchemaNode::string())
        .property("components", SchemaNode::array(memory_component))
        .required(["type", "components"]);

    let tool = ObjectSchema::new()
        .property("tool_name", SchemaNode::string())
        .property("version", SchemaNode::string())
        .required(["tool_name", "version"]);

    let task_loop = ObjectSchema::new()
        .property("type", SchemaNode::string())
        .property("error_handling", SchemaNode::string())
        .property("failover", SchemaNode::string())
        .required(["type", "error_handling", "failover"]);

    ObjectSchema::new()
        .property("agent_type", SchemaNode::string())
        .property("memory_system", memory_system)
        .property("tool_configuration", SchemaNode::array(tool))
        .property("task_loop", task_loop)
        .required(["agent_type", "memory_system", "tool_configuration", "task_loop"])
}

fn deployment_config() -> ObjectSchema {
    let environment_variables = ObjectSchema::new()
        .describe("Environment variables for the container.")
        .property(
            "LOG_LEVEL",
            SchemaNode::string().describe("The logging level, e.g., 'INFO', 'DEBUG'."),
        )
        .property(
            "MONITORING_INTERVAL",
            SchemaNode::string().describe("The interval in seconds for monitoring, e.g., '300'."),
        );

    let resource_limits = ObjectSchema::new()
        .property("cpu", SchemaNode::string())
        .property("memory", SchemaNode::string())
        .property("storage", SchemaNode::string())
        .required(["cpu", "memory", "storage"]);

    let container_spec = ObjectSchema::new()
        .property("base_image", SchemaNode::string())
        .property("dependencies", SchemaNode::string_array())
        .property("environment_variables", environment_variables)
        .property("resource_limits", resource_limits)
        .required([
            "base_image",
            "dependencies",
            "environment_variables",
            "resource_limits",
        ]);

    let networking = ObjectSchema::new()
        .property("internal_service", SchemaNode::boolean())
        .property("ingress_enabled", SchemaNode::boolean())
        .property("security_groups", SchemaNode::string_array())
        .required(["internal_service", "ingress_enabled", "security_groups"]);

    let kubernetes_config = ObjectSchema::new()
        .property("namespace", SchemaNode::string())
        .property("deployment_type", SchemaNode::string())
        .property("replicas", SchemaNode::integer())
        .property("persistent_volumes", SchemaNode::string_array())
        .property("secrets", SchemaNode::string_array())
        .property("networking", networking)
        .required([
            "namespace",
            "deployment_type",
            "replicas",
            "persistent_volumes",
            "secrets",
            "networking",
        ]);

    ObjectSchema::new()
        .property("container_spec", container_spec)
        .property("kubernetes_config", kubernetes_config)
        .required(["container_spec", "kubernetes_config"])
}

fn generated_code() -> ObjectSchema {
    ObjectSchema::new()
        .property("main_agent_file", SchemaNode::string())
        .property("config_files", SchemaNode::string_array())
        .property("dockerfile", SchemaNode::string())
        .property("k8s_manifests", SchemaNode::string_array())
        .property("total_lines_of_code", SchemaNode::integer())
        .property("code_quality_score", SchemaNode::number())
        .required([
            "main_agent_file",
            "config_files",
            "dockerfile",
            "k8s_manifests",
            "total_lines_of_code",
            "code_quality_score",
        ])
}

fn monitoring_setup() -> ObjectSchema {
    let alerting_rule = ObjectSchema::new()
        .property("condition", SchemaNode::string())
        .property("action", SchemaNode::string())
        .required(["condition", "action"]);

    ObjectSchema::new()
        .property("metrics_enabled", SchemaNode::string_array())
        .property("alerting_rules", SchemaNode::array(alerting_rule))
        .property("dashboard_url", SchemaNode::string())
        .required(["metrics_enabled", "alerting_rules", "dashboard_url"])
}

fn performance_predictions() -> ObjectSchema {
    ObjectSchema::new()
        .property("estimated_daily_mentions_processed", SchemaNode::integer())
        .property("report_generation_time_minutes", SchemaNode::number())
        .property("monthly_cost_estimate", SchemaNode::string())
        .property("confidence_interval", SchemaNode::number())
        .required([
            "estimated_daily_mentions_processed",
            "report_generation_time_minutes",
            "monthly_cost_estimate",
            "confidence_interval",
        ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaDialect;

    #[test]
    fn test_top_level_requires_all_seven_groups() {
        let SchemaNode::Object(root) = agent_configuration_schema() else {
            panic!("root must be an object");
        };
        assert_eq!(root.required.len(), 7);
        for name in &root.required {
            assert!(root.get(name).is_some(), "{} has no property", name);
        }
    }

    #[test]
    fn test_every_required_name_is_a_declared_property() {
        fn walk(node: &SchemaNode) {
            match node {
                SchemaNode::Object(object) => {
                    for name in &object.required {
                        assert!(object.get(name).is_some(), "undeclared required {}", name);
                    }
                    object.properties.iter().for_each(|p| walk(&p.schema));
                }
                SchemaNode::Array { items, .. } => walk(items),
                _ => {}
            }
        }
        walk(agent_configuration_schema());
    }

    #[test]
    fn test_gemini_rendering() {
        let rendered = agent_configuration_schema().to_value(SchemaDialect::Gemini);
        let networking = &rendered["properties"]["deployment_config"]["properties"]
            ["kubernetes_config"]["properties"]["networking"];
        assert_eq!(networking["properties"]["ingress_enabled"]["type"], "BOOLEAN");

        let env = &rendered["properties"]["deployment_config"]["properties"]["container_spec"]
            ["properties"]["environment_variables"];
        assert!(env.get("required").is_none());
        assert_eq!(env["description"], "Environment variables for the container.");
    }
}
