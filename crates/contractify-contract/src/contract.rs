use std::collections::BTreeMap;

use contractify_schema::SchemaRef;

use crate::method::HttpMethod;

/// Schemas for the two response shapes of a method. Both are mandatory.
#[derive(Debug, Clone)]
pub struct ResponseSpec {
    pub success: SchemaRef,
    pub error: SchemaRef,
}

/// Input and output schemas for one HTTP method on one route.
///
/// A missing input schema means the corresponding value is forwarded as-is.
#[derive(Debug, Clone)]
pub struct MethodSpec {
    pub query: Option<SchemaRef>,
    pub body: Option<SchemaRef>,
    pub params: Option<SchemaRef>,
    pub response: ResponseSpec,
}

impl MethodSpec {
    /// A spec with no input schemas.
    pub fn new(success: SchemaRef, error: SchemaRef) -> Self {
        Self {
            query: None,
            body: None,
            params: None,
            response: ResponseSpec { success, error },
        }
    }

    pub fn with_query(mut self, schema: SchemaRef) -> Self {
        self.query = Some(schema);
        self
    }

    pub fn with_body(mut self, schema: SchemaRef) -> Self {
        self.body = Some(schema);
        self
    }

    pub fn with_params(mut self, schema: SchemaRef) -> Self {
        self.params = Some(schema);
        self
    }
}

/// A route plus the methods it supports.
#[derive(Debug, Clone)]
pub struct Contract {
    route: String,
    methods: BTreeMap<HttpMethod, MethodSpec>,
}

impl Contract {
    /// A contract with no methods yet.
    pub fn new(route: impl Into<String>) -> Self {
        Self {
            route: route.into(),
            methods: BTreeMap::new(),
        }
    }

    /// Declare (or replace) the `MethodSpec` for `method`.
    pub fn with_method(mut self, method: HttpMethod, spec: MethodSpec) -> Self {
        self.methods.insert(method, spec);
        self
    }

    pub fn route(&self) -> &str {
        &self.route
    }

    pub fn method(&self, method: HttpMethod) -> Option<&MethodSpec> {
        self.methods.get(&method)
    }

    pub fn supports(&self, method: HttpMethod) -> bool {
        self.methods.contains_key(&method)
    }

    /// Declared methods in canonical order.
    pub fn methods(&self) -> impl Iterator<Item = HttpMethod> + '_ {
        self.methods.keys().copied()
    }
}
