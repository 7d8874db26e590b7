//! Inspectable sections of a generated configuration.

use super::model::AgentConfiguration;
use serde::Serialize;
use std::fmt;

/// One of the six groups shown when inspecting a configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigurationSection {
    GoalAnalysis,
    Architecture,
    Deployment,
    GeneratedCode,
    Monitoring,
    Predictions,
}

impl ConfigurationSection {
    /// All sections in display order
    pub const ALL: [ConfigurationSection; 6] = [
        ConfigurationSection::GoalAnalysis,
        ConfigurationSection::Architecture,
        ConfigurationSection::Deployment,
        ConfigurationSection::GeneratedCode,
        ConfigurationSection::Monitoring,
        ConfigurationSection::Predictions,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ConfigurationSection::GoalAnalysis => "Goal Analysis",
            ConfigurationSection::Architecture => "Architecture",
            ConfigurationSection::Deployment => "Deployment",
            ConfigurationSection::GeneratedCode => "Generated Code",
            ConfigurationSection::Monitoring => "Monitoring",
            ConfigurationSection::Predictions => "Predictions",
        }
    }

    /// Wire name of the group this section shows
    pub fn key(self) -> &'static str {
        match self {
            ConfigurationSection::GoalAnalysis => "goal_analysis",
            ConfigurationSection::Architecture => "agent_architecture",
            ConfigurationSection::Deployment => "deployment_config",
            ConfigurationSection::GeneratedCode => "generated_code",
            ConfigurationSection::Monitoring => "monitoring_setup",
            ConfigurationSection::Predictions => "performance_predictions",
        }
    }

    /// Pretty-printed JSON of this section
    pub fn render(self, config: &AgentConfiguration) -> Result<String, serde_json::Error> {
        fn pretty<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
            serde_json::to_string_pretty(value)
        }

        match self {
            ConfigurationSection::GoalAnalysis => pretty(&config.goal_analysis),
            ConfigurationSection::Architecture => pretty(&config.agent_architecture),
            ConfigurationSection::Deployment => pretty(&config.deployment_config),
            ConfigurationSection::GeneratedCode => pretty(&config.generated_code),
            ConfigurationSection::Monitoring => pretty(&config.monitoring_setup),
            ConfigurationSection::Predictions => pretty(&config.performance_predictions),
        }
    }
}

impl fmt::Display for ConfigurationSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
