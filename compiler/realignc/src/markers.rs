//! Suppression markers.
//!
//! Plain-text comment directives that gate analysis of one declaration:
//! - the ignore marker in a declaration's doc comment skips it
//! - the check marker in a doc comment opts it in under `-opt_in`
//! - the ignore marker in a `//` comment at the top of the field list
//!   skips it as well

use realign_ir::StructNode;

use crate::config::Config;

/// Marker strings for one run.
#[derive(Clone, Copy, Debug)]
pub struct Markers<'c> {
    ignore: &'c str,
    check: &'c str,
}

impl<'c> Markers<'c> {
    pub fn new(config: &'c Config) -> Self {
        Markers {
            ignore: &config.ignore_marker,
            check: &config.check_marker,
        }
    }

    /// The declaration's doc comment carries the ignore marker.
    pub fn ignored(&self, node: &StructNode) -> bool {
        node.doc.iter().any(|line| line.contains(self.ignore))
    }

    /// The declaration's doc comment carries the check marker.
    pub fn opted_in(&self, node: &StructNode) -> bool {
        node.doc.iter().any(|line| line.contains(self.check))
    }

    /// A line comment on the `{` line, or directly above the first field,
    /// carries the ignore marker.
    pub fn field_list_ignored(&self, node: &StructNode) -> bool {
        let opening = node.opening_comments.iter().map(String::as_str);
        let first = node
            .slots
            .first()
            .into_iter()
            .flat_map(|slot| slot.leading_comments().map(str::trim_start));
        opening
            .chain(first)
            .any(|comment| comment.starts_with("//") && comment.contains(self.ignore))
    }
}
