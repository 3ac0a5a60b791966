//! Text dumps of the tree shape.

use std::fmt::Display;

use crate::arena::Arena;
use crate::types::NodeId;

/// Renders one child subtree given the indentation prefix for its lines.
pub type PrintChild<'a> = dyn Fn(&str) -> String + 'a;

/// Appends `children` below the current line using box-drawing branches.
///
/// Trailing `None` children are dropped; a `None` in the middle still
/// reserves its branch.
pub fn print_tree(tab: &str, children: &[Option<&PrintChild<'_>>]) -> String {
    let mut out = String::new();

    let Some(last) = children.iter().rposition(Option::is_some) else {
        return out;
    };

    for (i, child_opt) in children.iter().enumerate().take(last + 1) {
        let Some(child_fn) = *child_opt else {
            continue;
        };

        let is_last = i == last;
        let child_tab = format!("{tab}{}  ", if is_last { " " } else { "│" });
        let child = child_fn(&child_tab);
        let branch = if child.is_empty() {
            "│"
        } else if is_last {
            "└─"
        } else {
            "├─"
        };

        out.push('\n');
        out.push_str(tab);
        out.push_str(branch);
        if !child.is_empty() {
            out.push(' ');
            out.push_str(&child);
        }
    }

    out
}

/// Dumps the subtree at `node` as `value h=height`, one node per line.
///
/// Leaves print no children; a node with one child prints `∅` for the
/// missing side so left and right stay distinguishable.
pub(crate) fn print_node<T: Display>(arena: &Arena<T>, node: Option<NodeId>, tab: &str) -> String {
    let Some(id) = node else {
        return "∅".to_string();
    };
    let n = &arena[id];
    let head = format!("{} h={}", n.v, n.height);
    if n.is_leaf() {
        return head;
    }
    let left: &PrintChild<'_> = &|tab: &str| print_node(arena, n.l, tab);
    let right: &PrintChild<'_> = &|tab: &str| print_node(arena, n.r, tab);
    head + &print_tree(tab, &[Some(left), Some(right)])
}
