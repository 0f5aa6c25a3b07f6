use std::{fmt, str};

/// Separator for attribute path components.
const PATH_SEPARATOR: char = '.';

/// Reason a textual attribute path was rejected.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum PathError {
    /// The path has no segments.
    #[error("attribute path is empty")]
    Empty,
    /// A segment between separators has no name.
    #[error("attribute path `{0}` has an empty segment")]
    EmptySegment(String),
    /// A list index is not a closed, non-negative integer.
    #[error("attribute path `{0}` has a malformed index")]
    MalformedIndex(String),
}

/// One named step of a path, optionally followed by list indexes.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Segment {
    /// Attribute name at this step.
    pub name: String,
    /// List indexes applied after the name, outermost first.
    pub indexes: Vec<usize>,
}

/// Reference to an attribute: a bare name or a path into nested maps and lists.
///
/// `From<&str>` takes the text as a single bare name, dots included. Parse the
/// text to follow dots and indexes:
///
/// ```rust
/// use dynamodb_codec::common::path::AttributeName;
///
/// let path: AttributeName = "middle.list[1]".parse().unwrap();
/// assert_eq!(path, AttributeName::new("middle").field("list").index(1));
/// assert_eq!(path.to_string(), "middle.list[1]");
/// ```
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct AttributeName {
    segments: Vec<Segment>,
}

impl AttributeName {
    /// A bare attribute name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            segments: vec![Segment {
                name: name.into(),
                indexes: Vec::new(),
            }],
        }
    }

    /// Step into a map field.
    pub fn field(mut self, name: impl Into<String>) -> Self {
        self.segments.push(Segment {
            name: name.into(),
            indexes: Vec::new(),
        });
        self
    }

    /// Step into a list element.
    pub fn index(mut self, index: usize) -> Self {
        if let Some(last) = self.segments.last_mut() {
            last.indexes.push(index);
        }
        self
    }

    /// Steps of the path, never empty.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Render the path replacing every segment name with a placeholder.
    ///
    /// `placeholder` receives the segment position and name.
    pub(crate) fn render(&self, mut placeholder: impl FnMut(usize, &str) -> String) -> String {
        let mut path = String::new();
        for (position, segment) in self.segments.iter().enumerate() {
            if position > 0 {
                path.push(PATH_SEPARATOR);
            }
            path.push_str(&placeholder(position, &segment.name));
            for index in &segment.indexes {
                path.push_str(&format!("[{index}]"));
            }
        }
        path
    }
}

impl From<&str> for AttributeName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for AttributeName {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl str::FromStr for AttributeName {
    type Err = PathError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        if text.is_empty() {
            return Err(PathError::Empty);
        }
        let mut segments = Vec::new();
        for part in text.split(PATH_SEPARATOR) {
            let (name, mut rest) = match part.find('[') {
                Some(start) => part.split_at(start),
                None => (part, ""),
            };
            if name.is_empty() {
                return Err(PathError::EmptySegment(text.to_string()));
            }
            let mut indexes = Vec::new();
            while !rest.is_empty() {
                let index = rest
                    .strip_prefix('[')
                    .and_then(|inner| inner.split_once(']'))
                    .and_then(|(digits, tail)| Some((digits.parse::<usize>().ok()?, tail)));
                match index {
                    Some((index, tail)) => {
                        indexes.push(index);
                        rest = tail;
                    }
                    None => return Err(PathError::MalformedIndex(text.to_string())),
                }
            }
            segments.push(Segment {
                name: name.to_string(),
                indexes,
            });
        }
        Ok(Self { segments })
    }
}

impl fmt::Display for AttributeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(|_, name| name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case::bare("a", AttributeName::new("a"))]
    #[case::nested(
        "middle.inner.session",
        AttributeName::new("middle").field("inner").field("session")
    )]
    #[case::indexed("middle.list[1]", AttributeName::new("middle").field("list").index(1))]
    #[case::nested_indexes("a[0][2].b", AttributeName::new("a").index(0).index(2).field("b"))]
    fn test_parse(#[case] text: &str, #[case] expected: AttributeName) {
        let actual: AttributeName = text.parse().unwrap();
        assert_eq!(actual, expected);
        assert_eq!(actual.to_string(), text);
    }

    #[rstest]
    #[case::empty("", PathError::Empty)]
    #[case::empty_segment("a..b", PathError::EmptySegment("a..b".to_string()))]
    #[case::leading_index("[1]", PathError::EmptySegment("[1]".to_string()))]
    #[case::unclosed("a[1", PathError::MalformedIndex("a[1".to_string()))]
    #[case::negative("a[-1]", PathError::MalformedIndex("a[-1]".to_string()))]
    #[case::trailing("a[1]x", PathError::MalformedIndex("a[1]x".to_string()))]
    fn test_parse_error(#[case] text: &str, #[case] expected: PathError) {
        assert_eq!(text.parse::<AttributeName>(), Err(expected));
    }

    #[test]
    fn test_bare_name_keeps_dots() {
        let name = AttributeName::from("a.b");
        assert_eq!(name.segments().len(), 1);
        assert_eq!(name.segments()[0].name, "a.b");
    }

    #[test]
    fn test_render_placeholders() {
        let path = AttributeName::new("a").index(3).field("b");
        let actual = path.render(|position, _| format!("#p_{position}"));
        assert_eq!(actual, "#p_0[3].#p_1");
    }
}
