//! REST paths of the ML Commons plugin

use common::error::{Error, Result};
use common::types::RemoteId;
use common::utils::path_segment;

/// Model group collection
pub const MODEL_GROUPS: &str = "/_plugins/_ml/model_groups";

/// Model group creation
pub const MODEL_GROUP_REGISTER: &str = "/_plugins/_ml/model_groups/_register";

/// Connector collection
pub const CONNECTORS: &str = "/_plugins/_ml/connectors";

/// Connector creation
pub const CONNECTOR_CREATE: &str = "/_plugins/_ml/connectors/_create";

/// Model collection
pub const MODELS: &str = "/_plugins/_ml/models";

/// Model registration, deployed once registered
pub const MODEL_REGISTER: &str = "/_plugins/_ml/models/_register?deploy=true";

/// Path of one artifact within a collection; the id is percent-encoded
pub fn artifact_path(collection: &str, id: &RemoteId) -> Result<String> {
    let segment = path_segment(id.as_str())
        .map_err(|e| Error::InvalidArgument(format!("{} for {}", e, collection)))?;

    Ok(format!("{}/{}", collection, segment))
}
