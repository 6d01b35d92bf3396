//! OpenAPI document for the entities REST surface.
//!
//! Operations are described per [`RestResource`] so every entity gets the same
//! set of routes; component schemas are collected from the DTO types the way
//! `utoipa` reports them, including their transitive dependencies.

use std::collections::BTreeMap;

use utoipa::openapi::{
    ComponentsBuilder, InfoBuilder, OpenApi, OpenApiBuilder, Ref, RefOr, Required,
    content::ContentBuilder,
    path::{
        HttpMethod, Operation, OperationBuilder, ParameterBuilder, ParameterIn, PathItemBuilder,
        PathsBuilder,
    },
    request_body::RequestBodyBuilder,
    response::{Response, ResponseBuilder, ResponsesBuilder},
    schema::{Array, KnownFormat, ObjectBuilder, Schema, SchemaFormat, SchemaType, Type},
    security::{HttpAuthScheme, HttpBuilder, SecurityRequirement, SecurityScheme},
};
use utoipa::{IntoParams, PartialSchema, ToSchema};

use super::binding::RestResource;
use super::dto::{BatchDeleteReq, BatchDeleteResponse, DeleteResponse, HealthDto, ListParams};
use super::problem::{APPLICATION_PROBLEM_JSON, Problem};
use crate::infra::storage::{ContactSubmissions, PaymentSettings, Transactions};

pub const API_PREFIX: &str = "/api/v1/entities";

const APPLICATION_JSON: &str = "application/json";
const BEARER_AUTH: &str = "bearerAuth";

/// Accumulates paths and component schemas, then renders an [`OpenApi`].
pub struct ApiDocBuilder {
    paths: BTreeMap<String, Vec<(HttpMethod, Operation)>>,
    schemas: BTreeMap<String, RefOr<Schema>>,
}

impl Default for ApiDocBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiDocBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            paths: BTreeMap::new(),
            schemas: BTreeMap::new(),
        }
    }

    /// Register `T` and everything it references; returns its component name.
    pub fn ensure_schema<T: ToSchema + PartialSchema>(&mut self) -> String {
        let root = T::name().into_owned();
        let mut collected = vec![(root.clone(), <T as PartialSchema>::schema())];
        T::schemas(&mut collected);
        for (name, schema) in collected {
            self.schemas.entry(name).or_insert(schema);
        }
        root
    }

    fn insert_schema(&mut self, name: String, schema: Schema) -> String {
        self.schemas.insert(name.clone(), RefOr::T(schema));
        name
    }

    fn operation(&mut self, path: &str, method: HttpMethod, op: Operation) {
        self.paths
            .entry(path.to_owned())
            .or_default()
            .push((method, op));
    }

    /// Describe the full route set of one entity.
    pub fn resource<B: RestResource>(&mut self) {
        let dto = self.ensure_schema::<B::Dto>();
        let create = self.ensure_schema::<B::CreateReq>();
        let update = self.ensure_schema::<B::UpdateReq>();
        self.ensure_schema::<Problem>();
        let page = self.page_schema(&dto);
        let batch_create = self.batch_create_schema(&create);
        let batch_update = self.batch_update_schema(&update);
        let batch_delete = self.ensure_schema::<BatchDeleteReq>();
        let delete_resp = self.ensure_schema::<DeleteResponse>();
        let batch_delete_resp = self.ensure_schema::<BatchDeleteResponse>();

        let base = format!("{API_PREFIX}/{}", B::PATH);
        let by_id = format!("{base}/{{id}}");
        let batch = format!("{base}/batch");
        let all = format!("{base}/all");

        let list = op::<B>("list", "List records visible to the caller", true)
            .parameters(Some(ListParams::into_params(|| Some(ParameterIn::Query))))
            .responses(
                ResponsesBuilder::new()
                    .response("200", json_response("One page of records", schema_ref(&page)))
                    .response("400", problem_response("Malformed query, sort or pagination"))
                    .response("401", problem_response("Caller is not authenticated"))
                    .build(),
            )
            .build();
        self.operation(&base, HttpMethod::Get, list);

        let list_all = op::<B>("list_all", "List records across all owners", false)
            .parameters(Some(ListParams::into_params(|| Some(ParameterIn::Query))))
            .responses(
                ResponsesBuilder::new()
                    .response("200", json_response("One page of records", schema_ref(&page)))
                    .response("400", problem_response("Malformed query, sort or pagination"))
                    .build(),
            )
            .build();
        self.operation(&all, HttpMethod::Get, list_all);

        let get = op::<B>("get", "Fetch one record by id", true)
            .parameter(id_param())
            .responses(single_responses("The record", &dto, "200"))
            .build();
        self.operation(&by_id, HttpMethod::Get, get);

        let create_op = op::<B>("create", "Create a record", true)
            .request_body(Some(json_body(&create)))
            .responses(single_responses("Created record", &dto, "201"))
            .build();
        self.operation(&base, HttpMethod::Post, create_op);

        let update_op = op::<B>("update", "Apply a partial update", true)
            .parameter(id_param())
            .request_body(Some(json_body(&update)))
            .responses(single_responses("Updated record", &dto, "200"))
            .build();
        self.operation(&by_id, HttpMethod::Put, update_op);

        let delete_op = op::<B>("delete", "Delete a record", true)
            .parameter(id_param())
            .responses(single_responses("Deletion receipt", &delete_resp, "200"))
            .build();
        self.operation(&by_id, HttpMethod::Delete, delete_op);

        let items = RefOr::T(Schema::Array(Array::new(schema_ref(&dto))));
        let create_many = op::<B>("create_batch", "Create several records at once", true)
            .request_body(Some(json_body(&batch_create)))
            .responses(batch_responses("Created records", items.clone(), "201"))
            .build();
        self.operation(&batch, HttpMethod::Post, create_many);

        let update_many = op::<B>("update_batch", "Update several records", true)
            .request_body(Some(json_body(&batch_update)))
            .responses(batch_responses("Records that were updated", items, "200"))
            .build();
        self.operation(&batch, HttpMethod::Put, update_many);

        let delete_many = op::<B>("delete_batch", "Delete several records", true)
            .request_body(Some(json_body(&batch_delete)))
            .responses(batch_responses(
                "Number of deleted records",
                schema_ref(&batch_delete_resp),
                "200",
            ))
            .build();
        self.operation(&batch, HttpMethod::Delete, delete_many);
    }

    fn page_schema(&mut self, dto: &str) -> String {
        let u64_schema = || {
            ObjectBuilder::new()
                .schema_type(SchemaType::Type(Type::Integer))
                .format(Some(SchemaFormat::KnownFormat(KnownFormat::Int64)))
                .minimum(Some(0))
                .build()
        };
        let schema = ObjectBuilder::new()
            .property("items", Array::new(schema_ref(dto)))
            .required("items")
            .property("total", u64_schema())
            .required("total")
            .property("skip", u64_schema())
            .required("skip")
            .property("limit", u64_schema())
            .required("limit")
            .build();
        self.insert_schema(format!("{dto}Page"), Schema::Object(schema))
    }

    fn batch_create_schema(&mut self, create: &str) -> String {
        let schema = ObjectBuilder::new()
            .property("items", Array::new(schema_ref(create)))
            .required("items")
            .build();
        self.insert_schema(format!("Batch{create}"), Schema::Object(schema))
    }

    fn batch_update_schema(&mut self, update: &str) -> String {
        let item = ObjectBuilder::new()
            .property(
                "id",
                ObjectBuilder::new()
                    .schema_type(SchemaType::Type(Type::Integer))
                    .format(Some(SchemaFormat::KnownFormat(KnownFormat::Int32))),
            )
            .required("id")
            .property("updates", schema_ref(update))
            .required("updates")
            .build();
        let schema = ObjectBuilder::new()
            .property("items", Array::new(item))
            .required("items")
            .build();
        self.insert_schema(format!("Batch{update}"), Schema::Object(schema))
    }

    fn service_routes(&mut self) {
        let health = self.ensure_schema::<HealthDto>();
        let op = OperationBuilder::new()
            .operation_id(Some("health"))
            .summary(Some("Liveness probe"))
            .tag("Health")
            .responses(
                ResponsesBuilder::new()
                    .response("200", json_response("Service is up", schema_ref(&health)))
                    .build(),
            )
            .build();
        self.operation("/health", HttpMethod::Get, op);
    }

    /// Render the collected document.
    #[must_use]
    pub fn build(self, title: &str, version: &str) -> OpenApi {
        let mut components = ComponentsBuilder::new();
        for (name, schema) in self.schemas {
            components = components.schema(name, schema);
        }
        components = components.security_scheme(
            BEARER_AUTH,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("token")
                    .build(),
            ),
        );

        let mut paths = PathsBuilder::new();
        for (path, ops) in self.paths {
            let mut item = PathItemBuilder::new();
            for (method, op) in ops {
                item = item.operation(method, op);
            }
            paths = paths.path(path, item.build());
        }

        OpenApiBuilder::new()
            .info(
                InfoBuilder::new()
                    .title(title)
                    .version(version)
                    .description(Some("CRUD over storefront entities"))
                    .build(),
            )
            .paths(paths.build())
            .components(Some(components.build()))
            .build()
    }
}

/// The document served at `/openapi.json`.
#[must_use]
pub fn api_doc() -> OpenApi {
    let mut doc = ApiDocBuilder::new();
    doc.resource::<ContactSubmissions>();
    doc.resource::<PaymentSettings>();
    doc.resource::<Transactions>();
    doc.service_routes();
    doc.build("Storefront Entities API", env!("CARGO_PKG_VERSION"))
}

fn op<B: RestResource>(verb: &str, summary: &str, secured: bool) -> OperationBuilder {
    let mut builder = OperationBuilder::new()
        .operation_id(Some(format!("{verb}_{}", B::PATH)))
        .summary(Some(summary))
        .tag(B::TAG);
    if secured && B::owner_column().is_some() {
        builder = builder.security(SecurityRequirement::new(BEARER_AUTH, Vec::<String>::new()));
    }
    builder
}

fn schema_ref(name: &str) -> RefOr<Schema> {
    RefOr::Ref(Ref::from_schema_name(name))
}

fn id_param() -> utoipa::openapi::path::Parameter {
    ParameterBuilder::new()
        .name("id")
        .parameter_in(ParameterIn::Path)
        .required(Required::True)
        .schema(Some(
            ObjectBuilder::new()
                .schema_type(SchemaType::Type(Type::Integer))
                .format(Some(SchemaFormat::KnownFormat(KnownFormat::Int32))),
        ))
        .build()
}

fn json_body(schema: &str) -> utoipa::openapi::request_body::RequestBody {
    RequestBodyBuilder::new()
        .content(
            APPLICATION_JSON,
            ContentBuilder::new().schema(Some(schema_ref(schema))).build(),
        )
        .required(Some(Required::True))
        .build()
}

fn json_response(description: &str, schema: RefOr<Schema>) -> Response {
    ResponseBuilder::new()
        .description(description)
        .content(
            APPLICATION_JSON,
            ContentBuilder::new().schema(Some(schema)).build(),
        )
        .build()
}

fn problem_response(description: &str) -> Response {
    ResponseBuilder::new()
        .description(description)
        .content(
            APPLICATION_PROBLEM_JSON,
            ContentBuilder::new()
                .schema(Some(schema_ref("Problem")))
                .build(),
        )
        .build()
}

fn single_responses(
    description: &str,
    schema: &str,
    status: &str,
) -> utoipa::openapi::response::Responses {
    ResponsesBuilder::new()
        .response(status, json_response(description, schema_ref(schema)))
        .response("400", problem_response("Invalid id or request body"))
        .response("401", problem_response("Caller is not authenticated"))
        .response("404", problem_response("No such record for this caller"))
        .build()
}

fn batch_responses(
    description: &str,
    schema: RefOr<Schema>,
    status: &str,
) -> utoipa::openapi::response::Responses {
    ResponsesBuilder::new()
        .response(status, json_response(description, schema))
        .response("400", problem_response("Invalid request body"))
        .response("401", problem_response("Caller is not authenticated"))
        .build()
}
