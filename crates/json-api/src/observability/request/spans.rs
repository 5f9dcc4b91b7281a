//! HTTP span helpers.

use uuid::Uuid;

#[derive(Debug, Clone)]
pub(super) struct RequestSpanName {
    pub(super) otel_path: String,
    pub(super) otel_span_name: String,
}

pub(super) fn request_span_name(method: &str, path: &str) -> RequestSpanName {
    let otel_path = normalise_path_for_span_name(path);
    let otel_span_name = format!("{method} {otel_path}");

    RequestSpanName {
        otel_path,
        otel_span_name,
    }
}

/// Replace identifier segments with the route parameter they fill, keeping metric labels
/// bounded.
fn normalise_path_for_span_name(path: &str) -> String {
    if path == "/" {
        return "/".to_owned();
    }

    let mut normalised = String::from("/");
    let mut previous = "";

    for (index, segment) in path.trim_start_matches('/').split('/').enumerate() {
        if index > 0 {
            normalised.push('/');
        }

        if Uuid::parse_str(segment).is_ok() {
            normalised.push_str(placeholder_for(previous));
        } else {
            normalised.push_str(segment);
        }

        previous = segment;
    }

    normalised
}

fn placeholder_for(collection: &str) -> &'static str {
    match collection {
        "items" => "{variant}",
        "orders" => "{order}",
        _ => "{uuid}",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cart_item_paths_collapse_to_the_route() {
        let names = request_span_name(
            "PUT",
            "/cart/items/0191c2d4-7a5e-7c2b-9f0e-2a4c6b8d0e1f",
        );

        assert_eq!(names.otel_path, "/cart/items/{variant}");
        assert_eq!(names.otel_span_name, "PUT /cart/items/{variant}");
    }

    #[test]
    fn order_paths_collapse_to_the_route() {
        let names = request_span_name("GET", "/orders/0191c2d4-7a5e-7c2b-9f0e-2a4c6b8d0e1f");

        assert_eq!(names.otel_path, "/orders/{order}");
    }

    #[test]
    fn static_paths_are_untouched() {
        assert_eq!(request_span_name("GET", "/").otel_path, "/");
        assert_eq!(request_span_name("POST", "/checkout").otel_path, "/checkout");
    }
}
