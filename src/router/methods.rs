use essentials::debug;
use http::Method;
use serde::{Deserialize, Serialize};

/// Every method a route may accept, in canonical order.
pub const KNOWN_METHODS: [Method; 9] = [
    Method::GET,
    Method::HEAD,
    Method::POST,
    Method::PUT,
    Method::DELETE,
    Method::CONNECT,
    Method::OPTIONS,
    Method::TRACE,
    Method::PATCH,
];

const WILDCARDS: [&str; 3] = ["", "*", "ANY"];

/// Methods as written in a route declaration: a single token or a list of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MethodDeclaration {
    Single(String),
    List(Vec<String>),
}

impl MethodDeclaration {
    pub fn tokens(&self) -> &[String] {
        match self {
            Self::Single(token) => std::slice::from_ref(token),
            Self::List(tokens) => tokens,
        }
    }
}

impl From<&str> for MethodDeclaration {
    fn from(token: &str) -> Self {
        Self::Single(token.to_string())
    }
}

impl From<String> for MethodDeclaration {
    fn from(token: String) -> Self {
        Self::Single(token)
    }
}

impl From<Method> for MethodDeclaration {
    fn from(method: Method) -> Self {
        Self::Single(method.as_str().to_string())
    }
}

impl From<Vec<&str>> for MethodDeclaration {
    fn from(tokens: Vec<&str>) -> Self {
        Self::List(tokens.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for MethodDeclaration {
    fn from(tokens: [&str; N]) -> Self {
        Self::List(tokens.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<Method>> for MethodDeclaration {
    fn from(methods: Vec<Method>) -> Self {
        Self::List(
            methods
                .iter()
                .map(|method| method.as_str().to_string())
                .collect(),
        )
    }
}

/// The canonical set of methods accepted by a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Methods(Box<[Method]>);

impl Methods {
    pub fn any() -> Self {
        Self(KNOWN_METHODS.to_vec().into_boxed_slice())
    }

    /// Upper-cases the declared tokens and keeps the known ones. A leading
    /// empty, `*` or `ANY` token accepts every known method. GET and HEAD
    /// are always accepted together.
    pub fn canonicalize(declaration: &MethodDeclaration) -> Self {
        let tokens = declaration
            .tokens()
            .iter()
            .map(|token| token.to_uppercase())
            .collect::<Vec<_>>();
        if tokens
            .first()
            .map_or(true, |first| WILDCARDS.contains(&first.as_str()))
        {
            return Self::any();
        }
        for token in &tokens {
            if !KNOWN_METHODS.iter().any(|method| method == token.as_str()) {
                debug!(method = token.as_str(), "Dropping unknown method");
            }
        }
        let has_synonym = tokens.iter().any(|token| token == "GET" || token == "HEAD");
        Self(
            KNOWN_METHODS
                .iter()
                .filter(|method| {
                    (has_synonym && (**method == Method::GET || **method == Method::HEAD))
                        || tokens.iter().any(|token| *method == token.as_str())
                })
                .cloned()
                .collect(),
        )
    }

    pub fn contains(&self, method: &Method) -> bool {
        self.0.contains(method)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Method> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Method> for Methods {
    fn from_iter<T: IntoIterator<Item = Method>>(methods: T) -> Self {
        Self(methods.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Methods {
    type Item = &'a Method;
    type IntoIter = std::slice::Iter<'a, Method>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
