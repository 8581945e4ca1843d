use std::sync::OnceLock;

use regex::{Regex, RegexBuilder};

use crate::{
    error::{DefinitionError, Result},
    utils::encoding::{encode_segment, segments},
};

use super::methods::{MethodDeclaration, Methods};

const DEFAULT_PATTERN: &str = ".*";

fn parameter_grammar() -> &'static Regex {
    static GRAMMAR: OnceLock<Regex> = OnceLock::new();
    GRAMMAR.get_or_init(|| {
        Regex::new(r"^\{(\w+)(?::((?:[^}\\]|\\.)+))?\}$").expect("parameter grammar is valid")
    })
}

/// Compiles `pattern` so that it has to match a whole segment.
///
/// Classes such as `\d`, `\w` and `\s` are ASCII only. Patterns that are
/// not valid without Unicode mode (`.`, negated classes) are compiled with it.
fn anchored(pattern: &str) -> std::result::Result<Regex, regex::Error> {
    let anchored = format!("^(?:{pattern})$");
    RegexBuilder::new(&anchored)
        .unicode(false)
        .build()
        .or_else(|_| Regex::new(&anchored))
}

/// One path segment following the base path of a route.
#[derive(Debug, Clone)]
pub enum Slot {
    /// Fixed segment, matched exactly and not reported as a parameter.
    Literal { value: String, pattern: Regex },
    Parameter { name: String, pattern: Regex },
}

impl Slot {
    pub fn literal(value: &str) -> Self {
        Self::Literal {
            value: value.to_string(),
            pattern: Regex::new(&format!("^{}$", regex::escape(value)))
                .expect("escaped literal is a valid pattern"),
        }
    }

    pub fn parameter(name: &str, pattern: &str) -> std::result::Result<Self, regex::Error> {
        Ok(Self::Parameter {
            name: name.to_string(),
            pattern: anchored(pattern)?,
        })
    }

    pub fn pattern(&self) -> &Regex {
        match self {
            Self::Literal { pattern, .. } | Self::Parameter { pattern, .. } => pattern,
        }
    }

    /// Parameter name, `None` for literal slots.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Literal { .. } => None,
            Self::Parameter { name, .. } => Some(name),
        }
    }

    /// The pattern as declared, without the anchors added for matching.
    pub fn source(&self) -> &str {
        let anchored = self.pattern().as_str();
        match self {
            Self::Literal { .. } => &anchored[1..anchored.len() - 1],
            Self::Parameter { .. } => &anchored[4..anchored.len() - 2],
        }
    }

    pub fn is_match(&self, segment: &str) -> bool {
        self.pattern().is_match(segment)
    }
}

/// Base path, slots and trailing slash flag of a parsed path template.
#[derive(Debug, Clone)]
pub struct PathTemplate {
    pub base_path: String,
    pub has_trailing_slash: bool,
    pub slots: Vec<Slot>,
}

impl PathTemplate {
    pub fn parse(path: &str) -> Result<Self> {
        let mut segments = segments(path).peekable();
        let mut base_path = String::from("/");
        while let Some(segment) = segments.next_if(|segment| !segment.starts_with('{')) {
            base_path.push_str(&encode_segment(segment));
            base_path.push('/');
        }

        let mut slots: Vec<Slot> = Vec::new();
        for segment in segments {
            if !segment.starts_with('{') {
                slots.push(Slot::literal(segment));
                continue;
            }
            let captures =
                parameter_grammar()
                    .captures(segment)
                    .ok_or_else(|| DefinitionError::InvalidPath {
                        path: path.to_string(),
                        segment: segment.to_string(),
                    })?;
            let name = &captures[1];
            if slots.iter().any(|slot| slot.name() == Some(name)) {
                return Err(DefinitionError::DuplicateParameter {
                    path: path.to_string(),
                    name: name.to_string(),
                });
            }
            let pattern = captures.get(2).map_or(DEFAULT_PATTERN, |m| m.as_str());
            slots.push(Slot::parameter(name, pattern).map_err(|source| {
                DefinitionError::InvalidPattern {
                    path: path.to_string(),
                    name: name.to_string(),
                    source,
                }
            })?);
        }

        Ok(Self {
            base_path,
            has_trailing_slash: path.ends_with('/'),
            slots,
        })
    }
}

/// A single parsed route.
#[derive(Debug, Clone)]
pub struct RouteDefinition {
    pub base_path: String,
    pub has_trailing_slash: bool,
    pub slots: Vec<Slot>,
    pub methods: Methods,
    pub handler: String,
}

impl RouteDefinition {
    pub fn new(
        path: &str,
        methods: &MethodDeclaration,
        handler: impl Into<String>,
    ) -> Result<Self> {
        let PathTemplate {
            base_path,
            has_trailing_slash,
            slots,
        } = PathTemplate::parse(path)?;
        Ok(Self {
            base_path,
            has_trailing_slash,
            slots,
            methods: Methods::canonicalize(methods),
            handler: handler.into(),
        })
    }

    /// Names of the true parameters in template order.
    pub fn parameters(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().filter_map(Slot::name)
    }
}

#[cfg(test)]
mod tests {
    use http::Method;
    use pretty_assertions::assert_eq;

    use super::*;

    fn sources(template: &PathTemplate) -> Vec<(Option<&str>, &str)> {
        template
            .slots
            .iter()
            .map(|slot| (slot.name(), slot.source()))
            .collect()
    }

    #[test]
    fn test_literal_templates() {
        for (path, base) in [
            ("/", "/"),
            ("", "/"),
            ("/hello", "/hello/"),
            ("//hello///world/", "/hello/world/"),
            ("/a b/ä", "/a%20b/%C3%A4/"),
        ] {
            let template = PathTemplate::parse(path).unwrap();
            assert_eq!(template.base_path, base);
            assert!(template.slots.is_empty());
        }
    }

    #[test]
    fn test_trailing_slash() {
        assert!(PathTemplate::parse("/user/{id}/").unwrap().has_trailing_slash);
        assert!(!PathTemplate::parse("/user/{id}").unwrap().has_trailing_slash);
        assert!(PathTemplate::parse("/").unwrap().has_trailing_slash);
    }

    #[test]
    fn test_parameters() {
        let template = PathTemplate::parse(r"/user/{id:\d+}/edit/{section}").unwrap();
        assert_eq!(template.base_path, "/user/");
        assert_eq!(
            sources(&template),
            vec![
                (Some("id"), r"\d+"),
                (None, "edit"),
                (Some("section"), ".*"),
            ]
        );
    }

    #[test]
    fn test_literal_slots_are_escaped() {
        let template = PathTemplate::parse("/{a}/v1.0").unwrap();
        let literal = &template.slots[1];
        assert!(literal.is_match("v1.0"));
        assert!(!literal.is_match("v1x0"));
        assert!(!literal.is_match("v1.0.1"));
    }

    #[test]
    fn test_patterns_match_whole_segment() {
        let template = PathTemplate::parse(r"/{id:\d+}").unwrap();
        assert!(template.slots[0].is_match("42"));
        assert!(!template.slots[0].is_match("42a"));
        assert!(!template.slots[0].is_match("a42"));
    }

    #[test]
    fn test_perl_classes_are_ascii() {
        let template = PathTemplate::parse(r"/{n:\d+}/{w:\w+}/{any}/{other:[^.]+}").unwrap();
        assert!(template.slots[0].is_match("42"));
        assert!(!template.slots[0].is_match("\u{663}"));
        assert!(template.slots[1].is_match("a_1"));
        assert!(!template.slots[1].is_match("ä"));
        assert!(template.slots[2].is_match("Jürgen"));
        assert!(template.slots[3].is_match("ä"));
        assert_eq!(sources(&template)[0], (Some("n"), r"\d+"));
    }

    #[test]
    fn test_alternation_is_anchored_as_a_group() {
        let template = PathTemplate::parse("/{kind:cat|dog}").unwrap();
        assert!(template.slots[0].is_match("dog"));
        assert!(!template.slots[0].is_match("hotdog"));
    }

    #[test]
    fn test_escaped_brace_in_pattern() {
        let template = PathTemplate::parse(r"/{x:a\}}").unwrap();
        assert!(template.slots[0].is_match("a}"));
    }

    #[test]
    fn test_invalid_grammar() {
        for path in ["/{}", "/{id", "/{id}x", "/{i-d}", "/{id:}", "/{id:a}b}"] {
            assert!(
                matches!(
                    PathTemplate::parse(path),
                    Err(DefinitionError::InvalidPath { .. })
                ),
                "{path} should be rejected"
            );
        }
    }

    #[test]
    fn test_duplicate_parameter() {
        let error = PathTemplate::parse("/a/{id}/b/{id:\\d+}").unwrap_err();
        assert!(matches!(
            error,
            DefinitionError::DuplicateParameter { ref name, .. } if name == "id"
        ));
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(matches!(
            PathTemplate::parse("/{id:(}"),
            Err(DefinitionError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_route_definition() {
        let route = RouteDefinition::new("/user/{id}/{tab}", &"get".into(), "user").unwrap();
        assert_eq!(route.parameters().collect::<Vec<_>>(), vec!["id", "tab"]);
        assert_eq!(
            route.methods.iter().cloned().collect::<Vec<_>>(),
            vec![Method::GET, Method::HEAD]
        );
        assert_eq!(route.handler, "user");
    }
}
