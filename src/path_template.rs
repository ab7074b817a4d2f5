use std::fmt::{Display, Formatter};

/// A backend-relative path with `{param}` placeholders, e.g.
/// `/groups/{id}/expenses`. Parsed once at startup; rendered per request
/// from the already-resolved route match parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct PathTemplate {
  segments: Box<[Segment]>,
}

#[derive(Debug, Clone, PartialEq)]
enum Segment {
  Literal(Box<str>),
  Param(Box<str>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum TemplateError {
  UnclosedBrace(String),
  EmptyParam(String),
  UnresolvedParam(String),
}

impl Display for TemplateError {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      TemplateError::UnclosedBrace(template) => {
        write!(f, "unclosed '{{' in path template '{}'", template)
      }
      TemplateError::EmptyParam(template) => {
        write!(f, "empty '{{}}' parameter in path template '{}'", template)
      }
      TemplateError::UnresolvedParam(name) => {
        write!(f, "no value resolved for path parameter '{}'", name)
      }
    }
  }
}

impl std::error::Error for TemplateError {}

impl PathTemplate {
  pub fn parse(template: &str) -> Result<PathTemplate, TemplateError> {
    let mut segments: Vec<Segment> = Vec::new();
    let mut rest = template;

    while let Some(open) = rest.find('{') {
      if open > 0 {
        segments.push(Segment::Literal(Box::from(&rest[..open])));
      }

      let after_open = &rest[open + 1..];
      let close = after_open
        .find('}')
        .ok_or_else(|| TemplateError::UnclosedBrace(template.to_string()))?;

      let name = &after_open[..close];
      if name.is_empty() {
        return Err(TemplateError::EmptyParam(template.to_string()));
      }

      segments.push(Segment::Param(Box::from(name)));
      rest = &after_open[close + 1..];
    }

    if !rest.is_empty() {
      segments.push(Segment::Literal(Box::from(rest)));
    }

    Ok(PathTemplate {
      segments: segments.into_boxed_slice(),
    })
  }

  /// Names of all `{param}` placeholders, in order of appearance.
  pub fn param_names(&self) -> impl Iterator<Item = &str> {
    self.segments.iter().filter_map(|segment| match segment {
      Segment::Param(name) => Some(name.as_ref()),
      Segment::Literal(_) => None,
    })
  }

  /// Renders the template by substituting every placeholder through
  /// `lookup`. Every parameter must resolve before the path is usable;
  /// a missing one is an error, never an empty segment.
  pub fn render<'a, F>(&self, lookup: F) -> Result<String, TemplateError>
  where
    F: Fn(&str) -> Option<&'a str>,
  {
    let mut path = String::new();

    for segment in self.segments.iter() {
      match segment {
        Segment::Literal(text) => path.push_str(text),
        Segment::Param(name) => {
          let value = lookup(name)
            .ok_or_else(|| TemplateError::UnresolvedParam(name.to_string()))?;
          path.push_str(value);
        }
      }
    }

    Ok(path)
  }
}
