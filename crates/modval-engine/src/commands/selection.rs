//! Selection-count validation

use modval_core::errors::ModvalError;
use modval_core::{HostGraph, NodeId};

/// Read the host selection once and require exactly `expected` nodes
///
/// # Errors
///
/// Returns `InvalidSelection` for any other count.
pub fn require_selection<H: HostGraph + ?Sized>(
    host: &H,
    expected: usize,
) -> Result<Vec<NodeId>, ModvalError> {
    let selected = host.selected_nodes();
    if selected.len() != expected {
        return Err(ModvalError::InvalidSelection {
            expected,
            actual: selected.len(),
        });
    }
    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use modval_core::host::memory::{MemoryHost, NodeTemplate};

    #[test]
    fn test_count_enforced() {
        let mut host = MemoryHost::new();
        let a = host.add_node(NodeTemplate::new("Blur"));
        let b = host.add_node(NodeTemplate::new("Blur"));

        assert!(require_selection(&host, 1).is_err());
        host.select(&[a.clone()]);
        assert_eq!(require_selection(&host, 1).unwrap(), [a.clone()]);
        host.select(&[a, b]);
        assert!(matches!(
            require_selection(&host, 1),
            Err(ModvalError::InvalidSelection { expected: 1, actual: 2 })
        ));
    }
}
