mod content;
mod node;

use std::collections::HashMap;

pub use content::Content;
pub use node::Element;

/// Find an element by ID in the tree.
pub fn find_element<'a>(root: &'a Element, id: &str) -> Option<&'a Element> {
    if root.id == id {
        return Some(root);
    }

    for child in root.child_elements() {
        if let Some(found) = find_element(child, id) {
            return Some(found);
        }
    }

    None
}

/// Find an element by ID in the tree, mutably.
pub fn find_element_mut<'a>(root: &'a mut Element, id: &str) -> Option<&'a mut Element> {
    if root.id == id {
        return Some(root);
    }

    for child in root.child_elements_mut() {
        if let Some(found) = find_element_mut(child, id) {
            return Some(found);
        }
    }

    None
}

/// Walk from the element with `target_id` up to `root` and return the first
/// element matching `predicate`, the target itself included.
pub fn closest<'a>(
    root: &'a Element,
    target_id: &str,
    predicate: impl Fn(&Element) -> bool,
) -> Option<&'a Element> {
    let mut path = Vec::new();
    if !path_to(root, target_id, &mut path) {
        return None;
    }
    path.into_iter().rev().find(|el| predicate(el))
}

fn path_to<'a>(node: &'a Element, target_id: &str, path: &mut Vec<&'a Element>) -> bool {
    path.push(node);
    if node.id == target_id {
        return true;
    }
    for child in node.child_elements() {
        if path_to(child, target_id, path) {
            return true;
        }
    }
    path.pop();
    false
}

/// Collect every descendant tagged with `data-element`, keyed by its value.
pub fn sub_elements(root: &Element) -> HashMap<String, &Element> {
    let mut found = HashMap::new();
    collect_sub_elements(root, &mut found);
    found
}

fn collect_sub_elements<'a>(node: &'a Element, found: &mut HashMap<String, &'a Element>) {
    if let Some(name) = node.data_attr("element") {
        found.insert(name.to_string(), node);
    }
    for child in node.child_elements() {
        collect_sub_elements(child, found);
    }
}

/// Collect every element in the tree matching `predicate`, in document order.
pub fn query_all<'a>(root: &'a Element, predicate: &impl Fn(&Element) -> bool) -> Vec<&'a Element> {
    let mut found = Vec::new();
    if predicate(root) {
        found.push(root);
    }
    for child in root.child_elements() {
        found.extend(query_all(child, predicate));
    }
    found
}
