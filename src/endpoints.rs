//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/tags/{id}', use [format_endpoint].

/// The route for listing and creating categories.
pub const CATEGORIES: &str = "/api/categories";
/// The route for a single category.
pub const CATEGORY: &str = "/api/categories/{id}";
/// The route for looking up a category by its name.
pub const CATEGORY_BY_NAME: &str = "/api/categories/name/{name}";
/// The route for the paginated transactions of a category.
pub const CATEGORY_TRANSACTIONS: &str = "/api/categories/{id}/transactions";

/// The route for listing and creating payment methods.
pub const PAYMENT_METHODS: &str = "/api/payment-methods";
/// The route for a single payment method.
pub const PAYMENT_METHOD: &str = "/api/payment-methods/{id}";
/// The route for looking up a payment method by its name.
pub const PAYMENT_METHOD_BY_NAME: &str = "/api/payment-methods/name/{name}";
/// The route for the paginated transactions of a payment method.
pub const PAYMENT_METHOD_TRANSACTIONS: &str = "/api/payment-methods/{id}/transactions";

/// The route for listing and creating tags.
pub const TAGS: &str = "/api/tags";
/// The route for a single tag.
pub const TAG: &str = "/api/tags/{id}";
/// The route for looking up a tag by its name.
pub const TAG_BY_NAME: &str = "/api/tags/name/{name}";
/// The route for the paginated transactions of a tag.
pub const TAG_TRANSACTIONS: &str = "/api/tags/{id}/transactions";

/// The route for listing and creating vendors.
pub const VENDORS: &str = "/api/vendors";
/// The route for a single vendor.
pub const VENDOR: &str = "/api/vendors/{id}";
/// The route for looking up a vendor by its name.
pub const VENDOR_BY_NAME: &str = "/api/vendors/name/{name}";
/// The route for the paginated transactions of a vendor.
pub const VENDOR_TRANSACTIONS: &str = "/api/vendors/{id}/transactions";

/// The route for listing and creating transactions.
pub const TRANSACTIONS: &str = "/api/transactions";
/// The route for a single transaction.
pub const TRANSACTION: &str = "/api/transactions/{id}";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/api/tags/{id}', '{id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let mut param_start = None;
    let mut param_end = None;

    for (i, c) in endpoint_path.chars().enumerate() {
        if c == '{' {
            param_start = Some(i);
        } else if param_start.is_some() && c == '}' {
            param_end = Some(i + 1);
            break;
        }
    }

    let param_start = match param_start {
        Some(start) => start,
        None => return endpoint_path.to_string(),
    };

    let param_end = param_end.unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
