//! Comment stripping for the final document

use kuchiki::NodeRef;

/// Remove every comment node under `root` whose text does not start with `[`
///
/// Conditional-comment markers such as `<!--[if IE]>...<![endif]-->` survive.
/// Returns the number of comments removed.
pub fn strip_comments(root: &NodeRef) -> usize {
    let doomed: Vec<NodeRef> = root
        .descendants()
        .filter(|node| {
            node.as_comment()
                .is_some_and(|text| !text.borrow().starts_with('['))
        })
        .collect();

    for comment in &doomed {
        comment.detach();
    }

    doomed.len()
}
