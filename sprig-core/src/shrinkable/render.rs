//! Text rendering of shrink trees for debugging and the command line.
//!
//! Trees may be infinite, so every renderer takes explicit bounds.

use super::Shrinkable;
use std::fmt::Display;

impl<T> Shrinkable<T>
where
    T: Display + Clone + 'static,
{
    /// Render the top of the tree, `depth` levels deep and `breadth` children wide.
    pub fn render(&self, depth: usize, breadth: usize) -> String {
        let mut result = String::new();
        self.render_recursive(&mut result, "", true, depth, breadth);
        result
    }

    fn render_recursive(
        &self,
        result: &mut String,
        prefix: &str,
        is_last: bool,
        depth: usize,
        breadth: usize,
    ) {
        result.push_str(prefix);
        result.push_str(if is_last { "└── " } else { "├── " });
        result.push_str(&format!("{}\n", self.value));

        if depth == 0 {
            return;
        }

        let child_prefix = if is_last {
            format!("{prefix}    ")
        } else {
            format!("{prefix}│   ")
        };

        let mut children = self.shrinks().take(breadth + 1).collect::<Vec<_>>();
        let truncated = children.len() > breadth;
        children.truncate(breadth);

        let count = children.len();
        for (i, child) in children.into_iter().enumerate() {
            let child_is_last = i + 1 == count && !truncated;
            child.render_recursive(result, &child_prefix, child_is_last, depth - 1, breadth);
        }
        if truncated {
            result.push_str(&format!("{child_prefix}└── …\n"));
        }
    }

    /// Render the direct children on one line.
    pub fn render_shrinks(&self, breadth: usize) -> String {
        let children: Vec<String> = self
            .shrinks()
            .take(breadth)
            .map(|child| child.value.to_string())
            .collect();
        if children.is_empty() {
            format!("{} (no shrinks)", self.value)
        } else {
            format!("{} → [{}]", self.value, children.join(", "))
        }
    }

    /// Render the first-child path as numbered steps.
    pub fn render_path(&self, limit: usize) -> String {
        let path = self.first_child_path(limit);
        let mut result = format!("Original: {}\n", path[0]);
        for (i, value) in path.iter().enumerate().skip(1) {
            result.push_str(&format!("  {i}: {value}\n"));
        }
        result
    }
}
