use log::debug;
use serde_json::Value;

use crate::metrics::METRICS;
use crate::models::{ContainerListing, ContainerRecord};
use crate::services::tool::{run_tool, ExternalTools, ToolError};

const DOCKER_PS_ARGS: [&str; 3] = ["ps", "--format", "{{json .}}"];

/// 逐行解析 `docker ps` 的 JSON 输出，无法解析的行直接跳过
pub fn parse_container_lines(output: &str) -> Vec<ContainerRecord> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| match serde_json::from_str::<Value>(line) {
            Ok(Value::Object(record)) => Some(record),
            Ok(other) => {
                debug!("Skipping non-object container line: {}", other);
                None
            }
            Err(e) => {
                debug!("Skipping malformed container line: {}", e);
                None
            }
        })
        .collect()
}

pub async fn list_containers(tools: &ExternalTools) -> Result<Vec<ContainerRecord>, ToolError> {
    let docker = tools.docker.as_deref().ok_or(ToolError::NotFound("docker"))?;
    let output = run_tool(docker, &DOCKER_PS_ARGS, tools.timeout).await?;
    Ok(parse_container_lines(&output))
}

/// 列出运行中的容器，任何失败都不会返回错误
pub async fn collect_containers(tools: &ExternalTools) -> ContainerListing {
    match list_containers(tools).await {
        Ok(records) => ContainerListing::Listed(records),
        Err(ToolError::NotFound(_)) => {
            METRICS.observe_degraded("containers");
            ContainerListing::Unavailable
        }
        Err(e) => {
            debug!("Container listing failed: {}", e);
            METRICS.observe_degraded("containers");
            ContainerListing::Listed(Vec::new())
        }
    }
}
