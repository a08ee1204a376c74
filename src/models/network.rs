use serde::Serialize;
use std::collections::BTreeMap;

/// 单个网卡的累计收发字节数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceCounters {
    /// 网卡名称
    pub interface_name: String,
    /// 累计发送字节数
    pub bytes_sent: u64,
    /// 累计接收字节数
    pub bytes_received: u64,
}

/// 接口输出格式: `{"eth0": {"bytes_sent": .., "bytes_recv": ..}}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InterfaceTraffic {
    pub bytes_sent: u64,
    pub bytes_recv: u64,
}

impl InterfaceCounters {
    pub fn into_map(counters: Vec<InterfaceCounters>) -> BTreeMap<String, InterfaceTraffic> {
        counters
            .into_iter()
            .map(|c| {
                (
                    c.interface_name,
                    InterfaceTraffic {
                        bytes_sent: c.bytes_sent,
                        bytes_recv: c.bytes_received,
                    },
                )
            })
            .collect()
    }
}
