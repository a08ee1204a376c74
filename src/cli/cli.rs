use clap::Parser;
use std::path::PathBuf;

use crate::config::DEFAULT_CONFIG_PATH;

/// NetMon - 主机遥测与 CPU 压测控制服务
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// 监听端口
    #[arg(short, long, env = "PORT", default_value_t = 5001)]
    pub port: u16,

    /// 监听地址
    #[arg(short = 'a', long, env = "ADDRESS", default_value = "0.0.0.0")]
    pub address: String,

    /// YAML 配置文件路径
    #[arg(short, long, env = "NETMON_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_arguments() {
        // 命令行参数优先于 PORT/ADDRESS/NETMON_CONFIG 环境变量
        let args = CommandArgs::try_parse_from([
            "netmon",
            "-p",
            "8080",
            "-a",
            "127.0.0.1",
            "-c",
            "/etc/netmon.yaml",
        ])
        .unwrap();
        assert_eq!(args.port, 8080);
        assert_eq!(args.address, "127.0.0.1");
        assert_eq!(args.config, PathBuf::from("/etc/netmon.yaml"));
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        assert!(CommandArgs::try_parse_from(["netmon", "--port", "not-a-port"]).is_err());
    }
}
