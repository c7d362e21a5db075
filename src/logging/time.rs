use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};

// 北京时间时区 (UTC+8)
pub const BEIJING_OFFSET: FixedOffset = FixedOffset::east_opt(8 * 3600).unwrap();
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 将 UTC 时间转换为北京时间的人类友好格式
pub fn to_beijing_string(dt: &DateTime<Utc>) -> String {
    dt.with_timezone(&BEIJING_OFFSET)
        .format(DATETIME_FORMAT)
        .to_string()
}

/// 将 UTC 时间转换为 ISO-8601 / RFC3339（UTC, `Z`）
pub fn to_iso8601_utc_string(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Secs, true)
}

// tracing_subscriber 自定义时间格式
pub struct BeijingTimer;

impl tracing_subscriber::fmt::time::FormatTime for BeijingTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        let now = Utc::now();
        write!(w, "{}", to_beijing_string(&now))
    }
}

pub struct UtcTimer;

impl tracing_subscriber::fmt::time::FormatTime for UtcTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        let now = Utc::now();
        write!(w, "{}", now.to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}
