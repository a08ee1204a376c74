use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use crate::services::tool::{run_tool, ExternalTools, ToolError};

/// lm-sensors 输出中代表 CPU 温度的标签
const CPU_LABELS: [&str; 3] = ["Package id 0", "Tctl:", "Core 0"];

lazy_static! {
    // 第一个 '+' 之后到第一个 '°' 之前的内容
    static ref SIGNED_READING: Regex = Regex::new(r"^[^+]*\+([^°]*)").unwrap();
}

/// 从 `sensors` 输出中解析 CPU 温度
///
/// 只看第一条同时包含 CPU 标签和 `+` 的行，解析失败即视为无温度数据，
/// 不会继续匹配后面的行。
pub fn parse_cpu_temperature(output: &str) -> Option<f64> {
    let line = output
        .lines()
        .find(|line| CPU_LABELS.iter().any(|label| line.contains(label)) && line.contains('+'))?;

    let captures = SIGNED_READING.captures(line)?;
    captures[1].trim().parse::<f64>().ok()
}

pub async fn read_cpu_temperature(tools: &ExternalTools) -> Result<Option<f64>, ToolError> {
    let sensors = tools.sensors.as_deref().ok_or(ToolError::NotFound("sensors"))?;
    let output = run_tool(sensors, &[], tools.timeout).await?;
    Ok(parse_cpu_temperature(&output))
}

/// 读取 CPU 温度，任何失败都返回 `None`
pub async fn cpu_temperature(tools: &ExternalTools) -> Option<f64> {
    match read_cpu_temperature(tools).await {
        Ok(temp) => temp,
        Err(e) => {
            debug!("CPU temperature unavailable: {}", e);
            crate::metrics::METRICS.observe_degraded("temperature");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SENSORS_INTEL: &str = "\
coretemp-isa-0000
Adapter: ISA adapter
Package id 0:  +52.0°C  (high = +80.0°C, crit = +100.0°C)
Core 0:        +45.0°C  (high = +80.0°C, crit = +100.0°C)
Core 1:        +47.0°C  (high = +80.0°C, crit = +100.0°C)
";

    #[test]
    fn test_single_core_line() {
        assert_eq!(parse_cpu_temperature("Core 0: +45.0°C"), Some(45.0));
    }

    #[test]
    fn test_first_match_wins() {
        assert_eq!(parse_cpu_temperature(SENSORS_INTEL), Some(52.0));

        let two_cores = "Core 0:  +41.5°C  (high = +80.0°C)\nCore 0:  +60.0°C\n";
        assert_eq!(parse_cpu_temperature(two_cores), Some(41.5));
    }

    #[test]
    fn test_amd_tctl() {
        let out = "k10temp-pci-00c3\nAdapter: PCI adapter\nTctl:         +63.9°C\n";
        assert_eq!(parse_cpu_temperature(out), Some(63.9));
    }

    #[test]
    fn test_no_qualifying_line() {
        assert_eq!(parse_cpu_temperature(""), None);
        assert_eq!(parse_cpu_temperature("acpitz-acpi-0\ntemp1:  +27.8°C\n"), None);
        // 有标签但没有 '+'
        assert_eq!(parse_cpu_temperature("Core 0:  N/A\n"), None);
    }

    #[test]
    fn test_unparseable_first_match_is_absent() {
        let out = "Core 0:  +abc°C\nCore 0:  +50.0°C\n";
        assert_eq!(parse_cpu_temperature(out), None);
    }

    #[tokio::test]
    async fn test_missing_sensors_tool() {
        let tools = ExternalTools::none(std::time::Duration::from_secs(1));
        assert!(matches!(
            read_cpu_temperature(&tools).await,
            Err(ToolError::NotFound("sensors"))
        ));
        assert_eq!(cpu_temperature(&tools).await, None);
    }
}
