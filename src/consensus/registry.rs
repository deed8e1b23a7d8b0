use std::collections::BTreeSet;
use std::sync::Mutex;

use url::Url;

use crate::error::LedgerError;

/// Reduce a peer address to `host[:port]`.
///
/// Accepts full URLs (`http://10.0.0.5:5000/anything`) as well as bare
/// authorities (`10.0.0.5:5000`). Hosts are lowercased by the URL parser.
pub fn normalize_address(address: &str) -> Result<String, LedgerError> {
    let invalid = || LedgerError::InvalidNodeAddress(address.to_string());

    let trimmed = address.trim();
    if trimmed.is_empty() {
        return Err(invalid());
    }

    let candidate = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    };
    let url = Url::parse(&candidate).map_err(|_| invalid())?;
    let host = url.host_str().filter(|h| !h.is_empty()).ok_or_else(invalid)?;

    Ok(match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    })
}

/// Deduplicated set of known peers. Iterates in sorted order.
#[derive(Debug, Default)]
pub struct NodeRegistry {
    nodes: Mutex<BTreeSet<String>>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize and insert `address`; re-registering is a no-op.
    /// Returns the normalized form.
    pub fn register(&self, address: &str) -> Result<String, LedgerError> {
        let node = normalize_address(address)?;
        self.nodes
            .lock()
            .expect("mutex poisoned")
            .insert(node.clone());
        Ok(node)
    }

    pub fn list(&self) -> Vec<String> {
        self.nodes
            .lock()
            .expect("mutex poisoned")
            .iter()
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.nodes.lock().expect("mutex poisoned").len()
    }
}
