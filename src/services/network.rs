use sysinfo::Networks;

use crate::models::InterfaceCounters;

/// 采集所有网卡的累计流量，按网卡名排序
pub fn collect_network() -> Vec<InterfaceCounters> {
    let networks = Networks::new_with_refreshed_list();
    interface_counters(networks.iter().map(|(name, data)| {
        (
            name.as_str(),
            data.total_transmitted(),
            data.total_received(),
        )
    }))
}

/// (网卡名, 发送字节, 接收字节) -> InterfaceCounters
pub fn interface_counters<'a, I>(readings: I) -> Vec<InterfaceCounters>
where
    I: IntoIterator<Item = (&'a str, u64, u64)>,
{
    let mut counters: Vec<InterfaceCounters> = readings
        .into_iter()
        .map(|(name, sent, received)| InterfaceCounters {
            interface_name: name.to_string(),
            bytes_sent: sent,
            bytes_received: received,
        })
        .collect();

    counters.sort_by(|a, b| a.interface_name.cmp(&b.interface_name));
    counters
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_keys_match_reported_interfaces() {
        let stub = [("wlan0", 10, 20), ("lo", 500, 500), ("eth0", 1, 2)];

        let counters = interface_counters(stub);
        let names: BTreeSet<_> = counters.iter().map(|c| c.interface_name.as_str()).collect();
        assert_eq!(names, BTreeSet::from(["eth0", "lo", "wlan0"]));

        let map = InterfaceCounters::into_map(counters);
        assert_eq!(map.len(), 3);
        assert_eq!(map["wlan0"].bytes_sent, 10);
        assert_eq!(map["wlan0"].bytes_recv, 20);
    }

    #[test]
    fn test_no_interfaces() {
        assert!(interface_counters(std::iter::empty()).is_empty());
    }

    #[test]
    fn test_wire_format() {
        let map = InterfaceCounters::into_map(interface_counters([("eth0", 3, 4)]));
        let json = serde_json::to_value(&map).unwrap();
        assert_eq!(json, serde_json::json!({"eth0": {"bytes_sent": 3, "bytes_recv": 4}}));
    }

    #[test]
    fn test_collect_network_does_not_fail() {
        let counters = collect_network();
        let mut names: Vec<_> = counters.iter().map(|c| c.interface_name.clone()).collect();
        names.dedup();
        assert_eq!(names.len(), counters.len());
    }
}
