use std::fmt;

use crate::config::DEFAULT_INDENTATION;
use crate::inspect::Literal;

/// One emitted assertion or diagnostic comment.
///
/// Children of a [`AssertLine::NotNull`] are owned by it; the root has no parent.
#[derive(Debug, Clone, PartialEq)]
pub enum AssertLine {
    Null {
        path: String,
    },
    NotNull {
        path: String,
        children: Vec<AssertLine>,
    },
    Equals {
        path: String,
        expected: Literal,
    },
    /// An accessor failed; holds the accessor path and the failure description.
    Comment {
        path: String,
        description: String,
    },
}

impl AssertLine {
    pub fn null(path: impl Into<String>) -> Self {
        AssertLine::Null { path: path.into() }
    }

    pub fn not_null(path: impl Into<String>) -> Self {
        AssertLine::NotNull {
            path: path.into(),
            children: Vec::new(),
        }
    }

    pub fn equals(path: impl Into<String>, expected: Literal) -> Self {
        AssertLine::Equals {
            path: path.into(),
            expected,
        }
    }

    pub fn comment(path: impl Into<String>, description: impl Into<String>) -> Self {
        AssertLine::Comment {
            path: path.into(),
            description: description.into(),
        }
    }

    pub fn path(&self) -> &str {
        match self {
            AssertLine::Null { path }
            | AssertLine::NotNull { path, .. }
            | AssertLine::Equals { path, .. }
            | AssertLine::Comment { path, .. } => path,
        }
    }

    /// Nested lines; empty for everything but `NotNull`.
    pub fn children(&self) -> &[AssertLine] {
        match self {
            AssertLine::NotNull { children, .. } => children,
            _ => &[],
        }
    }

    /// Number of lines in this subtree, this one included.
    pub fn line_count(&self) -> usize {
        1 + self.children().iter().map(AssertLine::line_count).sum::<usize>()
    }

    pub(crate) fn push(&mut self, line: AssertLine) {
        if let AssertLine::NotNull { children, .. } = self {
            children.push(line);
        }
    }

    /// Renders the subtree, one statement per line, `indentation` repeated per depth.
    pub fn render(&self, indentation: &str) -> String {
        let mut out = Vec::new();
        self.render_into(&mut out, indentation, 0);
        out.join("\n")
    }

    fn render_into(&self, out: &mut Vec<String>, indentation: &str, depth: usize) {
        let prefix = indentation.repeat(depth);
        match self {
            AssertLine::Null { path } => out.push(format!("{prefix}assertThat({path}).isNull();")),
            AssertLine::NotNull { path, children } => {
                out.push(format!("{prefix}assertThat({path}).isNotNull();"));
                for child in children {
                    child.render_into(out, indentation, depth + 1);
                }
            }
            AssertLine::Equals { path, expected } => {
                out.push(format!("{prefix}assertThat({path}).isEqualTo({expected});"))
            }
            AssertLine::Comment { path, description } => out.push(format!("{prefix}// {path} threw: {description}")),
        }
    }
}

impl fmt::Display for AssertLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(DEFAULT_INDENTATION))
    }
}
