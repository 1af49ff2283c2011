/// Source file stem to destination feature area. Stems are matched case-sensitively.
pub const SCOPES: &[(&str, &str)] = &[
    ("general", "api-information"),
    ("content", "work-with-products"),
    ("prices", "work-with-products"),
    ("supplies", "orders-fbw"),
    ("marketplace", "orders-fbs"),
    ("statistics", "reports"),
    ("analytics", "analytics"),
    ("promotion", "promotion"),
    ("recommendations", "work-with-products"),
    ("feedbacks-questions", "user-communication"),
    ("tariffs", "wb-tariffs"),
    ("buyers-chat", "user-communication"),
    ("returns", "user-communication"),
];

/// Scope for a file stem, or `""` when the stem is unknown.
pub fn scope_for_stem(stem: &str) -> &'static str {
    SCOPES
        .iter()
        .find(|(known, _)| *known == stem)
        .map(|(_, scope)| *scope)
        .unwrap_or("")
}

/// Everything before the first `.` of a file name.
pub fn file_stem(filename: &str) -> &str {
    filename.split('.').next().unwrap_or(filename)
}

/// Scope for a file name such as `prices.yaml`.
pub fn scope_for_filename(filename: &str) -> &'static str {
    scope_for_stem(file_stem(filename))
}
