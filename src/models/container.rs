use serde_json::{Map, Value};

/// `docker ps --format '{{json .}}'` 输出的一行，原样透传
pub type ContainerRecord = Map<String, Value>;

/// 容器列表结果
#[derive(Debug, Clone, PartialEq)]
pub enum ContainerListing {
    /// PATH 中没有 docker
    Unavailable,
    /// docker 调用失败时为空列表
    Listed(Vec<ContainerRecord>),
}

impl ContainerListing {
    pub fn into_records(self) -> Vec<ContainerRecord> {
        match self {
            ContainerListing::Unavailable => Vec::new(),
            ContainerListing::Listed(records) => records,
        }
    }
}
