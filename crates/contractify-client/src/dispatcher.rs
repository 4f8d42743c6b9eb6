use std::sync::Arc;

use contractify_contract::{HttpMethod, Registry};
use contractify_schema::{Schema, SchemaRef};
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::environment::ExecutionEnvironment;
use crate::error::{DispatchError, Field, Result, ValidationError, ValidationKind};
use crate::transport::{Headers, Transport, TransportRequest};

/// Per-call inputs. Values left as `None` are forwarded as absent.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub query: Option<Value>,
    pub body: Option<Value>,
    pub params: Option<Value>,
    pub headers: Headers,
    pub cancellation: Option<CancellationToken>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(mut self, query: Value) -> Self {
        self.query = Some(query);
        self
    }

    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn params(mut self, params: Value) -> Self {
        self.params = Some(params);
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }
}

/// Resolves, validates and executes calls against a contract registry.
///
/// Cloning is cheap; clones share the registry and transport. No state is
/// kept between calls, so concurrent requests never interfere.
#[derive(Clone)]
pub struct Dispatcher {
    transport: Arc<dyn Transport>,
    registry: Arc<Registry>,
    validate_responses: bool,
}

/// Builder for [`Dispatcher`].
pub struct DispatcherBuilder {
    transport: Arc<dyn Transport>,
    registry: Arc<Registry>,
    environment: ExecutionEnvironment,
    validate_responses: Option<bool>,
}

impl DispatcherBuilder {
    /// Environment used to pick the response-validation default.
    pub fn environment(mut self, environment: ExecutionEnvironment) -> Self {
        self.environment = environment;
        self
    }

    /// Explicit response-validation setting; overrides the environment.
    pub fn validate_responses(mut self, validate: bool) -> Self {
        self.validate_responses = Some(validate);
        self
    }

    pub fn build(self) -> Dispatcher {
        let validate_responses = self
            .validate_responses
            .unwrap_or_else(|| self.environment.validates_responses_by_default());
        Dispatcher {
            transport: self.transport,
            registry: self.registry,
            validate_responses,
        }
    }
}

impl Dispatcher {
    /// Start building a dispatcher over `transport` and `registry`.
    pub fn builder(
        transport: impl Transport + 'static,
        registry: impl Into<Arc<Registry>>,
    ) -> DispatcherBuilder {
        DispatcherBuilder {
            transport: Arc::new(transport),
            registry: registry.into(),
            environment: ExecutionEnvironment::default(),
            validate_responses: None,
        }
    }

    /// Dispatcher with default settings (responses validated).
    pub fn new(transport: impl Transport + 'static, registry: impl Into<Arc<Registry>>) -> Self {
        Self::builder(transport, registry).build()
    }

    pub fn validates_responses(&self) -> bool {
        self.validate_responses
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Resolve `route` and `method`, validate inputs, call the transport and
    /// validate the response.
    ///
    /// Input failures return before the transport is touched.
    pub async fn request(
        &self,
        route: &str,
        method: HttpMethod,
        options: RequestOptions,
    ) -> Result<Value> {
        let contract = self
            .registry
            .get(route)
            .ok_or_else(|| DispatchError::RouteNotFound(route.to_string()))?;
        let spec = contract
            .method(method)
            .ok_or_else(|| DispatchError::MethodNotSupported {
                route: route.to_string(),
                method,
            })?;
        debug!(route, %method, "dispatching request");

        let RequestOptions {
            query,
            body,
            params,
            headers,
            cancellation,
        } = options;
        let query = validate_input(spec.query.as_ref(), Field::Query, query)?;
        let body = validate_input(spec.body.as_ref(), Field::Body, body)?;
        let params = validate_input(spec.params.as_ref(), Field::Params, params)?;

        let response = self
            .transport
            .send(TransportRequest {
                url: route.to_string(),
                method,
                query,
                body,
                params,
                headers,
                cancellation,
            })
            .await
            .map_err(DispatchError::Transport)?;

        if !self.validate_responses {
            return Ok(response.data);
        }
        spec.response.success.parse(response.data).map_err(|source| {
            debug!(route, %method, "response rejected by success schema");
            ValidationError {
                kind: ValidationKind::Output,
                field: Field::Response,
                source,
            }
            .into()
        })
    }

    pub async fn get(&self, route: &str, options: RequestOptions) -> Result<Value> {
        self.request(route, HttpMethod::Get, options).await
    }

    pub async fn post(&self, route: &str, options: RequestOptions) -> Result<Value> {
        self.request(route, HttpMethod::Post, options).await
    }

    pub async fn put(&self, route: &str, options: RequestOptions) -> Result<Value> {
        self.request(route, HttpMethod::Put, options).await
    }

    pub async fn patch(&self, route: &str, options: RequestOptions) -> Result<Value> {
        self.request(route, HttpMethod::Patch, options).await
    }

    pub async fn delete(&self, route: &str, options: RequestOptions) -> Result<Value> {
        self.request(route, HttpMethod::Delete, options).await
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("routes", &self.registry.len())
            .field("validate_responses", &self.validate_responses)
            .finish()
    }
}

/// Undeclared inputs pass through untouched. Declared ones are parsed, with
/// an absent value presented to the schema as `null`.
fn validate_input(
    schema: Option<&SchemaRef>,
    field: Field,
    value: Option<Value>,
) -> Result<Option<Value>> {
    let Some(schema) = schema else {
        return Ok(value);
    };
    schema
        .parse(value.unwrap_or(Value::Null))
        .map(Some)
        .map_err(|source| {
            ValidationError {
                kind: ValidationKind::Input,
                field,
                source,
            }
            .into()
        })
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;
    use contractify_contract::{Contract, MethodSpec};
    use contractify_schema::{JsonSchema, SchemaError};
    use serde_json::json;

    use super::*;
    use crate::transport::{BoxError, TransportResponse};

    /// Replies with a fixed payload and records every request.
    struct RecordingTransport {
        reply: Value,
        requests: Mutex<Vec<TransportRequest>>,
    }

    impl RecordingTransport {
        fn replying(reply: Value) -> Arc<Self> {
            Arc::new(Self {
                reply,
                requests: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> usize {
            self.requests.lock().unwrap().len()
        }

        fn last(&self) -> TransportRequest {
            self.requests.lock().unwrap().last().cloned().unwrap()
        }
    }

    #[async_trait]
    impl Transport for RecordingTransport {
        async fn send(
            &self,
            request: TransportRequest,
        ) -> std::result::Result<TransportResponse, BoxError> {
            self.requests.lock().unwrap().push(request);
            Ok(TransportResponse::new(self.reply.clone()))
        }
    }

    /// Echoes the route and query back after a delay.
    struct EchoTransport;

    #[async_trait]
    impl Transport for EchoTransport {
        async fn send(
            &self,
            request: TransportRequest,
        ) -> std::result::Result<TransportResponse, BoxError> {
            let delay = if request.url == "/slow" { 30 } else { 5 };
            tokio::time::sleep(Duration::from_millis(delay)).await;
            Ok(TransportResponse::new(json!({
                "route": request.url,
                "query": request.query,
            })))
        }
    }

    struct FailingTransport;

    #[async_trait]
    impl Transport for FailingTransport {
        async fn send(
            &self,
            _request: TransportRequest,
        ) -> std::result::Result<TransportResponse, BoxError> {
            Err("connection reset".into())
        }
    }

    /// Accepts anything and counts invocations.
    fn counting(counter: &Arc<AtomicUsize>) -> SchemaRef {
        let counter = Arc::clone(counter);
        Arc::new(move |value: Value| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok::<_, SchemaError>(value)
        })
    }

    fn json_schema(document: Value) -> SchemaRef {
        Arc::new(JsonSchema::compile(&document).unwrap())
    }

    fn user_schema() -> SchemaRef {
        json_schema(json!({
            "type": "object",
            "properties": {
                "id": { "type": "number" },
                "name": { "type": "string" }
            },
            "required": ["id", "name"]
        }))
    }

    fn registry() -> Registry {
        Registry::from_contracts([
            Contract::new("/users").with_method(
                HttpMethod::Get,
                MethodSpec::new(json_schema(json!({"type": "array"})), json_schema(json!({}))),
            ),
            Contract::new("/users/:id").with_method(
                HttpMethod::Get,
                MethodSpec::new(user_schema(), json_schema(json!({}))).with_params(json_schema(
                    json!({
                        "type": "object",
                        "properties": { "id": { "type": "number" } },
                        "required": ["id"]
                    }),
                )),
            ),
        ])
    }

    #[tokio::test]
    async fn undeclared_query_passes_through_without_validation() {
        let counter = Arc::new(AtomicUsize::new(0));
        let registry = Registry::from_contracts([Contract::new("/users").with_method(
            HttpMethod::Get,
            MethodSpec::new(counting(&counter), counting(&counter)),
        )]);
        let transport = RecordingTransport::replying(json!([]));
        let dispatcher = Dispatcher::builder(transport.clone(), registry)
            .validate_responses(false)
            .build();

        let data = dispatcher
            .request("/users", HttpMethod::Get, RequestOptions::new())
            .await
            .unwrap();

        assert_eq!(data, json!([]));
        assert_eq!(counter.load(Ordering::SeqCst), 0);
        assert_eq!(transport.calls(), 1);
        let sent = transport.last();
        assert_eq!(sent.url, "/users");
        assert_eq!(sent.method, HttpMethod::Get);
        assert!(sent.query.is_none());
        assert!(sent.body.is_none());
    }

    #[tokio::test]
    async fn undeclared_inputs_are_forwarded_unchanged() {
        let transport = RecordingTransport::replying(json!([]));
        let dispatcher = Dispatcher::new(transport.clone(), registry());

        let token = CancellationToken::new();
        dispatcher
            .get(
                "/users",
                RequestOptions::new()
                    .query(json!({"page": "2"}))
                    .header("authorization", "Bearer t")
                    .cancellation(token.clone()),
            )
            .await
            .unwrap();

        let sent = transport.last();
        assert_eq!(sent.query, Some(json!({"page": "2"})));
        assert_eq!(sent.headers.get("authorization").unwrap(), "Bearer t");
        assert!(sent.cancellation.is_some());
    }

    #[tokio::test]
    async fn invalid_params_fail_before_transport() {
        let transport = RecordingTransport::replying(json!({"id": 1, "name": "ada"}));
        let dispatcher = Dispatcher::new(transport.clone(), registry());

        let err = dispatcher
            .get("/users/:id", RequestOptions::new().params(json!({})))
            .await
            .unwrap_err();

        let validation = err.as_validation().unwrap();
        assert_eq!(validation.kind, ValidationKind::Input);
        assert_eq!(validation.field, Field::Params);
        assert!(matches!(validation.source, SchemaError::Invalid { .. }));
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn missing_declared_input_is_validated_as_null() {
        let transport = RecordingTransport::replying(json!({"id": 1, "name": "ada"}));
        let dispatcher = Dispatcher::new(transport.clone(), registry());

        let err = dispatcher
            .get("/users/:id", RequestOptions::new())
            .await
            .unwrap_err();

        assert_eq!(err.validation_kind(), Some(ValidationKind::Input));
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn valid_params_reach_transport_without_touching_url() {
        let transport = RecordingTransport::replying(json!({"id": 5, "name": "ada"}));
        let dispatcher = Dispatcher::new(transport.clone(), registry());

        let data = dispatcher
            .get("/users/:id", RequestOptions::new().params(json!({"id": 5})))
            .await
            .unwrap();

        assert_eq!(data, json!({"id": 5, "name": "ada"}));
        let sent = transport.last();
        assert_eq!(sent.url, "/users/:id");
        assert_eq!(sent.params, Some(json!({"id": 5})));
    }

    #[tokio::test]
    async fn malformed_response_fails_output_validation() {
        let transport = RecordingTransport::replying(json!({"id": "5"}));
        let dispatcher = Dispatcher::builder(transport.clone(), registry())
            .validate_responses(true)
            .build();

        let err = dispatcher
            .get("/users/:id", RequestOptions::new().params(json!({"id": 5})))
            .await
            .unwrap_err();

        let validation = err.as_validation().unwrap();
        assert_eq!(validation.kind, ValidationKind::Output);
        assert_eq!(validation.field, Field::Response);
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test]
    async fn malformed_response_is_returned_when_validation_disabled() {
        let transport = RecordingTransport::replying(json!({"id": "5"}));
        let dispatcher = Dispatcher::builder(transport, registry())
            .validate_responses(false)
            .build();

        let data = dispatcher
            .get("/users/:id", RequestOptions::new().params(json!({"id": 5})))
            .await
            .unwrap();

        assert_eq!(data, json!({"id": "5"}));
    }

    #[tokio::test]
    async fn environment_picks_default_and_explicit_flag_wins() {
        let transport = RecordingTransport::replying(json!({}));

        let production = Dispatcher::builder(transport.clone(), registry())
            .environment(ExecutionEnvironment::Production)
            .build();
        assert!(!production.validates_responses());

        let development = Dispatcher::builder(transport.clone(), registry()).build();
        assert!(development.validates_responses());

        let forced = Dispatcher::builder(transport, registry())
            .environment(ExecutionEnvironment::Production)
            .validate_responses(true)
            .build();
        assert!(forced.validates_responses());
    }

    #[tokio::test]
    async fn unknown_route_and_method_are_distinct_errors() {
        let transport = RecordingTransport::replying(json!({}));
        let dispatcher = Dispatcher::new(transport.clone(), registry());

        let err = dispatcher
            .get("/posts", RequestOptions::new())
            .await
            .unwrap_err();
        assert!(matches!(err, DispatchError::RouteNotFound(ref route) if route == "/posts"));

        let err = dispatcher
            .delete("/users", RequestOptions::new())
            .await
            .unwrap_err();
        match err {
            DispatchError::MethodNotSupported { route, method } => {
                assert_eq!(route, "/users");
                assert_eq!(method, HttpMethod::Delete);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn convenience_methods_fix_the_method() {
        let any = || -> SchemaRef { Arc::new(|value: Value| Ok::<_, SchemaError>(value)) };
        let mut contract = Contract::new("/items");
        for method in [
            HttpMethod::Get,
            HttpMethod::Post,
            HttpMethod::Put,
            HttpMethod::Patch,
            HttpMethod::Delete,
        ] {
            contract = contract.with_method(method, MethodSpec::new(any(), any()));
        }
        let transport = RecordingTransport::replying(json!(null));
        let dispatcher = Dispatcher::new(transport.clone(), Registry::from_contracts([contract]));

        dispatcher.get("/items", RequestOptions::new()).await.unwrap();
        assert_eq!(transport.last().method, HttpMethod::Get);
        dispatcher.post("/items", RequestOptions::new()).await.unwrap();
        assert_eq!(transport.last().method, HttpMethod::Post);
        dispatcher.put("/items", RequestOptions::new()).await.unwrap();
        assert_eq!(transport.last().method, HttpMethod::Put);
        dispatcher.patch("/items", RequestOptions::new()).await.unwrap();
        assert_eq!(transport.last().method, HttpMethod::Patch);
        dispatcher.delete("/items", RequestOptions::new()).await.unwrap();
        assert_eq!(transport.last().method, HttpMethod::Delete);
    }

    #[tokio::test]
    async fn body_schema_output_is_what_gets_sent() {
        let trim: SchemaRef = Arc::new(|value: Value| match value {
            Value::String(s) => Ok(Value::String(s.trim().to_string())),
            _ => Err(SchemaError::invalid("expected a string")),
        });
        let any: SchemaRef = Arc::new(|value: Value| Ok::<_, SchemaError>(value));
        let registry = Registry::from_contracts([Contract::new("/notes").with_method(
            HttpMethod::Post,
            MethodSpec::new(any.clone(), any).with_body(trim),
        )]);
        let transport = RecordingTransport::replying(json!({}));
        let dispatcher = Dispatcher::new(transport.clone(), registry);

        dispatcher
            .post("/notes", RequestOptions::new().body(json!("  hello ")))
            .await
            .unwrap();
        assert_eq!(transport.last().body, Some(json!("hello")));

        let err = dispatcher
            .post("/notes", RequestOptions::new().body(json!(7)))
            .await
            .unwrap_err();
        assert_eq!(err.as_validation().unwrap().field, Field::Body);
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test]
    async fn transport_errors_pass_through() {
        let dispatcher = Dispatcher::new(FailingTransport, registry());

        let err = dispatcher
            .get("/users", RequestOptions::new())
            .await
            .unwrap_err();
        match err {
            DispatchError::Transport(source) => assert_eq!(source.to_string(), "connection reset"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn concurrent_requests_do_not_interfere() {
        let any = || -> SchemaRef { Arc::new(|value: Value| Ok::<_, SchemaError>(value)) };
        let registry = Registry::from_contracts(["/slow", "/fast"].map(|route| {
            Contract::new(route).with_method(
                HttpMethod::Get,
                MethodSpec::new(any(), any()).with_query(any()),
            )
        }));
        let dispatcher = Dispatcher::new(EchoTransport, registry);

        let slow = tokio::spawn({
            let dispatcher = dispatcher.clone();
            async move {
                dispatcher
                    .get("/slow", RequestOptions::new().query(json!({"tag": "slow"})))
                    .await
            }
        });
        let fast = tokio::spawn({
            let dispatcher = dispatcher.clone();
            async move {
                dispatcher
                    .get("/fast", RequestOptions::new().query(json!({"tag": "fast"})))
                    .await
            }
        });

        let (slow, fast) = (slow.await.unwrap().unwrap(), fast.await.unwrap().unwrap());
        assert_eq!(slow, json!({"route": "/slow", "query": {"tag": "slow"}}));
        assert_eq!(fast, json!({"route": "/fast", "query": {"tag": "fast"}}));
    }

    #[test]
    fn dispatcher_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Dispatcher>();
    }
}
