use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Go module path used in generated import lines unless the document overrides it.
pub const DEFAULT_MODULE: &str = "my-crud-api";
pub const DEFAULT_PORT: u16 = 8080;

/// Path parameter looked up when a route path declares none.
pub const DEFAULT_LOOKUP_PARAM: &str = "id";

/// The decoded input document.
///
/// Models are kept in sorted maps so every emitter walks them, and their
/// fields, in the same order on every run.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Schema {
    #[serde(default)]
    pub models: BTreeMap<String, BTreeMap<String, String>>,
    #[serde(default)]
    pub routes: Vec<Route>,
    #[serde(default)]
    pub generator: GenConfig,
}

/// Settings for the generated project layout, the optional `generator` section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GenConfig {
    pub module: String,
    pub port: u16,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            module: DEFAULT_MODULE.to_owned(),
            port: DEFAULT_PORT,
        }
    }
}

/// One endpoint. Omitted keys decode as empty strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Route {
    pub path: String,
    pub method: String,
    pub controller: String,
    pub model: String,
}

impl Route {
    pub fn new(
        path: impl Into<String>,
        method: impl Into<String>,
        controller: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            method: method.into(),
            controller: controller.into(),
            model: model.into(),
        }
    }

    pub fn method(&self) -> Method {
        Method::from(self.method.as_str())
    }

    pub fn path_template(&self) -> PathTemplate {
        PathTemplate::parse(&self.path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    /// Anything else; handlers for it are emitted with an empty body.
    Other(String),
}

impl From<&str> for Method {
    fn from(value: &str) -> Self {
        match value {
            "GET" => Method::Get,
            "POST" => Method::Post,
            "PUT" => Method::Put,
            "DELETE" => Method::Delete,
            other => Method::Other(other.to_owned()),
        }
    }
}

/// A route path split into segments, with `{name}` segments treated as parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
    params: Vec<String>,
}

impl PathTemplate {
    pub fn parse(path: &str) -> Self {
        let params = path
            .split('/')
            .filter_map(|segment| segment.strip_prefix('{')?.strip_suffix('}'))
            .filter(|name| !name.is_empty())
            .map(str::to_owned)
            .collect();
        Self { params }
    }

    pub fn has_params(&self) -> bool {
        !self.params.is_empty()
    }

    /// The parameter a single-record handler looks its record up by.
    pub fn lookup_param(&self) -> &str {
        self.params
            .first()
            .map(String::as_str)
            .unwrap_or(DEFAULT_LOOKUP_PARAM)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub ty: String,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }
}

/// One model with its fields in name order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Model {
    pub name: String,
    pub fields: Vec<Field>,
}

/// Problems in a schema that still generates, but generates broken code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    UnknownModel { controller: String, model: String },
    UnknownMethod { controller: String, method: String },
    DuplicateController { controller: String, count: usize },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnknownModel { controller, model } => write!(
                f,
                "route {controller} references undeclared model {model}; no handler is generated but the route is still registered"
            ),
            Diagnostic::UnknownMethod { controller, method } => write!(
                f,
                "route {controller} uses method {method:?}; its handler body is left empty"
            ),
            Diagnostic::DuplicateController { controller, count } => write!(
                f,
                "controller {controller} is declared by {count} routes; the generated functions will collide"
            ),
        }
    }
}

impl Schema {
    pub fn models(&self) -> Vec<Model> {
        self.models
            .iter()
            .map(|(name, fields)| Model {
                name: name.clone(),
                fields: fields
                    .iter()
                    .map(|(field, ty)| Field::new(field.clone(), ty.clone()))
                    .collect(),
            })
            .collect()
    }

    /// Routes owned by `model`, in document order.
    pub fn routes_for<'a>(&'a self, model: &'a str) -> impl Iterator<Item = &'a Route> + 'a {
        self.routes.iter().filter(move |route| route.model == model)
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        let mut diagnostics = vec![];
        let mut controllers: HashMap<&str, usize> = HashMap::new();
        for route in &self.routes {
            if !self.models.contains_key(&route.model) {
                diagnostics.push(Diagnostic::UnknownModel {
                    controller: route.controller.clone(),
                    model: route.model.clone(),
                });
            }
            if let Method::Other(method) = route.method() {
                diagnostics.push(Diagnostic::UnknownMethod {
                    controller: route.controller.clone(),
                    method,
                });
            }
            *controllers.entry(route.controller.as_str()).or_insert(0) += 1;
        }
        // walk routes again so duplicates are reported in document order
        for route in &self.routes {
            if let Some(count) = controllers.remove(route.controller.as_str()) {
                if count > 1 {
                    diagnostics.push(Diagnostic::DuplicateController {
                        controller: route.controller.clone(),
                        count,
                    });
                }
            }
        }
        diagnostics
    }
}
