use flowserve_config::{AnyOrList, CorsConfig};
use http::Method;
use http::header::HeaderName;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

/// Build a Tower CORS layer from configuration
///
/// With `credentials = true` a wildcard is answered by mirroring the request,
/// since `*` may not be combined with credentials.
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let mirror = config.credentials;

    let mut layer = CorsLayer::new()
        .allow_origin(origins(&config.origins, mirror))
        .allow_methods(methods(&config.methods, mirror))
        .allow_headers(headers(&config.headers, mirror))
        .allow_credentials(config.credentials);

    if let Some(duration) = config.max_age_duration() {
        layer = layer.max_age(duration);
    }

    layer
}

fn origins(value: &AnyOrList, mirror: bool) -> AllowOrigin {
    match value {
        AnyOrList::Any if mirror => AllowOrigin::mirror_request(),
        AnyOrList::Any => AllowOrigin::any(),
        AnyOrList::List(origins) => AllowOrigin::list(origins.iter().filter_map(|o| o.parse().ok())),
    }
}

fn methods(value: &AnyOrList, mirror: bool) -> AllowMethods {
    match value {
        AnyOrList::Any if mirror => AllowMethods::mirror_request(),
        AnyOrList::Any => AllowMethods::any(),
        AnyOrList::List(methods) => AllowMethods::list(methods.iter().filter_map(|m| m.parse::<Method>().ok())),
    }
}

fn headers(value: &AnyOrList, mirror: bool) -> AllowHeaders {
    match value {
        AnyOrList::Any if mirror => AllowHeaders::mirror_request(),
        AnyOrList::Any => AllowHeaders::any(),
        AnyOrList::List(headers) => AllowHeaders::list(headers.iter().filter_map(|h| h.parse::<HeaderName>().ok())),
    }
}
