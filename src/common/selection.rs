use crate::common::{self, path::AttributeName};

/// Prefix of the placeholders a projection renders.
const PROJECTION_PREFIX: &str = "proj";

/// Attributes to retrieve, as a projection expression.
///
/// ```rust
/// use dynamodb_codec::common::{path::AttributeName, selection::Projection};
///
/// let projection = Projection(vec![
///     AttributeName::new("id"),
///     AttributeName::new("profile").field("name"),
/// ]);
/// assert_eq!(projection.render().expression, "#proj0, #proj1.#proj2");
/// ```
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Projection(pub Vec<AttributeName>);

impl Projection {
    /// Render into expression text and name placeholders.
    pub fn render(&self) -> common::ExpressionInput {
        let mut placeholders = common::Placeholders::new(PROJECTION_PREFIX);
        let paths: Vec<_> = self
            .0
            .iter()
            .map(|path| placeholders.path(path))
            .collect();
        placeholders.finish(paths.join(", "))
    }
}

impl From<Projection> for common::ExpressionInput {
    fn from(projection: Projection) -> Self {
        projection.render()
    }
}

impl<N: Into<AttributeName>> FromIterator<N> for Projection {
    fn from_iter<I: IntoIterator<Item = N>>(names: I) -> Self {
        Self(names.into_iter().map(Into::into).collect())
    }
}
