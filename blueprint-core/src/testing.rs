//! Test doubles shared by the unit tests in this crate.

use crate::error::BlueprintError;
use crate::provider::Provider;
use crate::types::*;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

/// A configuration literal that satisfies the output schema.
pub(crate) fn sample_configuration_json() -> serde_json::Value {
    serde_json::json!({
        "agent_creation_id": "agent-7f3c",
        "goal_analysis": {
            "original_goal": "Monitor social media for brand mentions",
            "parsed_requirements": {
                "primary_tasks": ["Collect mentions", "Score sentiment", "Write daily report"],
                "data_sources": ["Twitter API", "Reddit API"],
                "output_format": "PDF report",
                "complexity_score": 7.5,
                "estimated_runtime": "24/7"
            },
            "resource_requirements": {
                "cpu_cores": 4,
                "memory_gb": 16,
                "storage_gb": 100,
                "network_bandwidth": "100 Mbps"
            }
        },
        "agent_architecture": {
            "agent_type": "ReAct",
            "memory_system": {
                "type": "hybrid",
                "components": [
                    {"type": "vector", "purpose": "mention embeddings", "size_limit": "10GB", "retention_days": 30},
                    {"type": "episodic", "purpose": "report history"}
                ]
            },
            "tool_configuration": [
                {"tool_name": "twitter-client", "version": "2.1.0", "config": {"rate_limit": 450}},
                {"tool_name": "roberta-base-sentiment", "version": "1.2"}
            ],
            "task_loop": {
                "type": "scheduled",
                "schedule": {"report": "0 9 * * *"},
                "error_handling": "exponential backoff",
                "failover": "standby replica"
            }
        },
        "deployment_config": {
            "container_spec": {
                "base_image": "python:3.11-slim",
                "dependencies": ["tweepy", "transformers"],
                "environment_variables": {"LOG_LEVEL": "INFO", "MONITORING_INTERVAL": "300"},
                "resource_limits": {"cpu": "4", "memory": "16Gi", "storage": "100Gi"}
            },
            "kubernetes_config": {
                "namespace": "agents",
                "deployment_type": "Deployment",
                "replicas": 2,
                "persistent_volumes": ["vector-store"],
                "secrets": ["twitter-token"],
                "networking": {
                    "internal_service": true,
                    "ingress_enabled": false,
                    "security_groups": ["agents-internal"]
                }
            }
        },
        "generated_code": {
            "main_agent_file": "agent.py",
            "config_files": ["config.yaml"],
            "dockerfile": "FROM python:3.11-slim",
            "k8s_manifests": ["deployment.yaml", "service.yaml"],
            "total_lines_of_code": 1240,
            "code_quality_score": 8.7
        },
        "monitoring_setup": {
            "metrics_enabled": ["mentions_per_minute", "api_error_rate"],
            "alerting_rules": [
                {"condition": "api_error_rate > 15%", "action": "Restart agent"}
            ],
            "dashboard_url": "https://grafana.example.com/d/agents"
        },
        "performance_predictions": {
            "estimated_daily_mentions_processed": 50000,
            "report_generation_time_minutes": 4.5,
            "monthly_cost_estimate": "$420",
            "confidence_interval": 0.85
        }
    })
}

/// In-memory provider with a scripted reply, an optional delay and an
/// optional gate that holds the call open until released.
#[derive(Debug)]
pub(crate) struct MockProvider {
    info: Arc<ProviderInfo>,
    /// `None` fails every call
    reply: Option<String>,
    delay: Duration,
    gate: Option<Arc<Notify>>,
    calls: AtomicUsize,
    last_request: Mutex<Option<GenerationRequest>>,
}

impl MockProvider {
    fn with_reply(reply: Option<String>) -> Self {
        Self {
            info: Arc::new(ProviderInfo {
                id: "gemini".to_string(),
                name: "Mock".to_string(),
            }),
            reply,
            delay: Duration::ZERO,
            gate: None,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Answer every call with `text`
    pub(crate) fn replying(text: impl Into<String>) -> Self {
        Self::with_reply(Some(text.into()))
    }

    /// Answer with the sample configuration
    pub(crate) fn sample() -> Self {
        Self::replying(sample_configuration_json().to_string())
    }

    /// Fail every call with a provider error
    pub(crate) fn failing() -> Self {
        Self::with_reply(None)
    }

    pub(crate) fn with_id(mut self, id: &str) -> Self {
        self.info = Arc::new(ProviderInfo {
            id: id.to_string(),
            name: "Mock".to_string(),
        });
        self
    }

    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub(crate) fn with_gate(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn last_request(&self) -> Option<GenerationRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl Provider for MockProvider {
    fn info(&self) -> Arc<ProviderInfo> {
        self.info.clone()
    }

    async fn generate(&self, req: GenerationRequest) -> Result<GenerationResponse, BlueprintError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(req.clone());

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        match self.reply.clone() {
            Some(text) => Ok(GenerationResponse {
                id: "mock-response".to_string(),
                model: req.model,
                choices: vec![Choice {
                    index: 0,
                    message: Message::assistant(text),
                    finish_reason: FinishReason::Stop,
                }],
                usage: Usage::default(),
                created: None,
            }),
            None => Err(BlueprintError::authentication("API key not valid")),
        }
    }
}
