//! Helper macro enforcing consistent status log fields.
//!
//! Keeps the `kind` (and, for keyed dependencies, `topic`) field present on
//! every transition log so downstream parsing can rely on them.

/// Log a registry event for a dependency kind plus any extra fields.
#[macro_export]
macro_rules! status_event {
    ($level:ident, $event:expr, kind = $kind:expr, topic = $topic:expr $(, $field:ident = $value:expr )* $(,)?) => {
        tracing::$level!(
            target: "vitals::status",
            event = $event,
            kind = $kind,
            topic = $topic,
            $($field = %$value,)*
        )
    };
    ($level:ident, $event:expr, kind = $kind:expr $(, $field:ident = $value:expr )* $(,)?) => {
        tracing::$level!(
            target: "vitals::status",
            event = $event,
            kind = $kind,
            $($field = %$value,)*
        )
    };
}
