mod content;
mod node;

pub use content::Content;
pub use node::Element;

/// Find an element by ID in the tree.
pub fn find_element<'a>(root: &'a Element, id: &str) -> Option<&'a Element> {
    if root.id == id {
        return Some(root);
    }

    if let Content::Children(children) = &root.content {
        for child in children {
            if let Some(found) = find_element(child, id) {
                return Some(found);
            }
        }
    }

    None
}

/// Find an element by ID in the tree, mutably.
pub fn find_element_mut<'a>(root: &'a mut Element, id: &str) -> Option<&'a mut Element> {
    if root.id == id {
        return Some(root);
    }

    if let Content::Children(children) = &mut root.content {
        for child in children {
            if let Some(found) = find_element_mut(child, id) {
                return Some(found);
            }
        }
    }

    None
}

/// IDs from the root down to the parent of `id`, or `None` if `id` is not in the tree.
pub fn ancestor_ids(root: &Element, id: &str) -> Option<Vec<String>> {
    if root.id == id {
        return Some(Vec::new());
    }

    for child in root.content.children() {
        if let Some(mut path) = ancestor_ids(child, id) {
            path.insert(0, root.id.clone());
            return Some(path);
        }
    }

    None
}

/// Collect descendants of `root` (excluding `root`) matching `pred`, in document order.
pub fn collect_descendants<'a>(
    root: &'a Element,
    pred: &dyn Fn(&Element) -> bool,
    out: &mut Vec<&'a Element>,
) {
    for child in root.content.children() {
        if pred(child) {
            out.push(child);
        }
        collect_descendants(child, pred, out);
    }
}
