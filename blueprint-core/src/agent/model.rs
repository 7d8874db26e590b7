//! Typed agent configuration returned by the generation API.
//!
//! Field names match the wire format exactly. Optional fields are the ones the
//! output schema does not require; free-form branches are kept as raw JSON.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// A complete, generated agent configuration.
///
/// Only ever built wholesale from a successful response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct AgentConfiguration {
    /// Identifier of the creation job. Not guaranteed unique.
    pub agent_creation_id: String,
    pub goal_analysis: GoalAnalysis,
    pub agent_architecture: AgentArchitecture,
    pub deployment_config: DeploymentConfig,
    pub generated_code: GeneratedCode,
    pub monitoring_setup: MonitoringSetup,
    pub performance_predictions: PerformancePredictions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct GoalAnalysis {
    /// The goal as submitted by the user
    pub original_goal: String,
    pub parsed_requirements: ParsedRequirements,
    pub resource_requirements: ResourceRequirements,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct ParsedRequirements {
    pub primary_tasks: Vec<String>,
    pub data_sources: Vec<String>,
    pub output_format: String,
    pub complexity_score: f64,
    pub estimated_runtime: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct ResourceRequirements {
    pub cpu_cores: i64,
    pub memory_gb: i64,
    pub storage_gb: i64,
    pub network_bandwidth: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct AgentArchitecture {
    pub agent_type: String,
    pub memory_system: MemorySystem,
    pub tool_configuration: Vec<ToolConfiguration>,
    pub task_loop: TaskLoop,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct MemorySystem {
    #[serde(rename = "type")]
    pub kind: String,
    pub components: Vec<MemoryComponent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct MemoryComponent {
    #[serde(rename = "type")]
    pub kind: String,
    pub purpose: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_limit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retention_days: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct ToolConfiguration {
    pub tool_name: String,
    pub version: String,
    /// Free-form tool settings; not part of the output schema
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct TaskLoop {
    #[serde(rename = "type")]
    pub kind: String,
    /// Free-form schedule; not part of the output schema
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Map<String, Value>>,
    pub error_handling: String,
    pub failover: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct DeploymentConfig {
    pub container_spec: ContainerSpec,
    pub kubernetes_config: KubernetesConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct ContainerSpec {
    pub base_image: String,
    pub dependencies: Vec<String>,
    pub environment_variables: BTreeMap<String, String>,
    pub resource_limits: ResourceLimits,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct ResourceLimits {
    pub cpu: String,
    pub memory: String,
    pub storage: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct KubernetesConfig {
    pub namespace: String,
    pub deployment_type: String,
    pub replicas: i64,
    pub persistent_volumes: Vec<String>,
    pub secrets: Vec<String>,
    pub networking: Networking,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct Networking {
    pub internal_service: bool,
    pub ingress_enabled: bool,
    pub security_groups: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct GeneratedCode {
    pub main_agent_file: String,
    pub config_files: Vec<String>,
    pub dockerfile: String,
    pub k8s_manifests: Vec<String>,
    pub total_lines_of_code: i64,
    pub code_quality_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct MonitoringSetup {
    pub metrics_enabled: Vec<String>,
    pub alerting_rules: Vec<AlertingRule>,
    pub dashboard_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct AlertingRule {
    pub condition: String,
    pub action: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct PerformancePredictions {
    pub estimated_daily_mentions_processed: i64,
    pub report_generation_time_minutes: f64,
    pub monthly_cost_estimate: String,
    pub confidence_interval: f64,
}
