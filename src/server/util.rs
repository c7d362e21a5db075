use axum::http::HeaderMap;

// HTTP helpers
pub fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

// 密钥脱敏，仅用于日志；按字符截取，非 ASCII 密钥不会切断 UTF-8
pub fn mask_key(key: &str) -> String {
    let count = key.chars().count();
    if count <= 8 {
        return "****".to_string();
    }
    let start: String = key.chars().take(4).collect();
    let end: String = key.chars().skip(count - 4).collect();
    format!("{}****{}", start, end)
}
